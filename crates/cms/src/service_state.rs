use crate::credentials::CredentialStore;
use crate::documents::DocumentStore;
use crate::service_config::Config;
use crate::session_store::SessionRecords;

/// Shared handles every request handler works against. The document and
/// credential stores wrap paths; session records are behind an `Arc`.
#[derive(Debug, Clone)]
pub struct State {
    documents: DocumentStore,
    credentials: CredentialStore,
    sessions: SessionRecords,
}

impl State {
    pub fn new(documents: DocumentStore, credentials: CredentialStore) -> Self {
        Self {
            documents,
            credentials,
            sessions: SessionRecords::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        if !config.data_dir.is_dir() {
            return Err(StateSetupError::DataDirDoesNotExist(
                config.data_dir.display().to_string(),
            ));
        }
        if !config.credentials_path.is_file() {
            return Err(StateSetupError::CredentialsDoNotExist(
                config.credentials_path.display().to_string(),
            ));
        }

        tracing::info!("Document root: {}", config.data_dir.display());
        tracing::info!("Credentials: {}", config.credentials_path.display());

        Ok(Self::new(
            DocumentStore::new(&config.data_dir),
            CredentialStore::new(&config.credentials_path),
        ))
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn sessions(&self) -> &SessionRecords {
        &self.sessions
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("document directory does not exist: {0}")]
    DataDirDoesNotExist(String),
    #[error("credentials file does not exist: {0}")]
    CredentialsDoNotExist(String),
}
