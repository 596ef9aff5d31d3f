use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Username to bcrypt hash mapping backed by a YAML file.
///
/// The file is parsed on every call so edits made outside the service apply
/// to the next sign-in attempt without a restart.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, CredentialError> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Stored password hash for `username`.
    pub fn lookup(&self, username: &str) -> Result<String, CredentialError> {
        self.load()?
            .remove(username)
            .ok_or_else(|| CredentialError::NotFound(username.to_string()))
    }

    /// Whether `password` matches the stored hash for `username`.
    ///
    /// Unknown users and wrong passwords both yield `Ok(false)`. Errors are
    /// reserved for an unreadable or malformed credential file.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let hash = match self.lookup(username) {
            Ok(hash) => hash,
            Err(CredentialError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        match bcrypt::verify(password, &hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(username, error = %e, "stored password hash is malformed");
                Ok(false)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("no credential for user: {0}")]
    NotFound(String),
    #[error("failed to read credentials: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse credentials: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_users(dir: &TempDir, body: &str) -> CredentialStore {
        let path = dir.path().join("users.yml");
        fs::write(&path, body).unwrap();
        CredentialStore::new(path)
    }

    #[test]
    fn test_verify_known_user() {
        let dir = TempDir::new().unwrap();
        let hash = bcrypt::hash("secret", 4).unwrap();
        let store = write_users(&dir, &format!("admin: \"{}\"\n", hash));

        assert!(store.verify("admin", "secret").unwrap());
        assert!(!store.verify("admin", "wrong").unwrap());
    }

    #[test]
    fn test_unknown_user_is_indistinguishable() {
        let dir = TempDir::new().unwrap();
        let hash = bcrypt::hash("secret", 4).unwrap();
        let store = write_users(&dir, &format!("admin: \"{}\"\n", hash));

        assert!(!store.verify("guest", "secret").unwrap());
        assert!(matches!(
            store.lookup("guest"),
            Err(CredentialError::NotFound(user)) if user == "guest"
        ));
    }

    #[test]
    fn test_edits_apply_without_reload() {
        let dir = TempDir::new().unwrap();
        let store = write_users(&dir, "");
        assert!(!store.verify("editor", "pw").unwrap());

        let hash = bcrypt::hash("pw", 4).unwrap();
        fs::write(store.path(), format!("editor: \"{}\"\n", hash)).unwrap();

        assert!(store.verify("editor", "pw").unwrap());
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        let dir = TempDir::new().unwrap();
        let store = write_users(&dir, "admin: not-a-bcrypt-hash\n");

        assert!(!store.verify("admin", "anything").unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("absent.yml"));

        assert!(matches!(
            store.verify("admin", "secret"),
            Err(CredentialError::Io(_))
        ));
    }
}
