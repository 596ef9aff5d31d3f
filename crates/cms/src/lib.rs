//! A small file-backed content service.
//!
//! Documents are plain files in one directory. Anyone may list and read
//! them; creating, editing and deleting require signing in against a YAML
//! file of bcrypt hashes. `.txt` documents are served verbatim and `.md`
//! documents are rendered to HTML.

pub mod content;
pub mod credentials;
pub mod documents;
pub mod gate;
pub mod http_server;
pub mod process;
pub mod response;
pub mod service_config;
pub mod service_state;
pub mod session;
pub mod session_store;
pub mod version;

// App state (configuration, paths)
pub mod state;

pub use process::spawn_service;
pub use service_config::Config as ServiceConfig;
pub use service_state::State as ServiceState;
pub use state::{AppConfig, AppState, StateError};
