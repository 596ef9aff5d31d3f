use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Everything needed to run the service, after CLI flags and `config.toml`
/// have been merged.
#[derive(Debug, Clone)]
pub struct Config {
    /// address for the HTML server to listen on
    pub listen_addr: SocketAddr,
    /// directory whose files are the documents
    pub data_dir: PathBuf,
    /// YAML file mapping usernames to bcrypt hashes
    pub credentials_path: PathBuf,
    /// mark the session cookie `Secure`
    pub secure_cookies: bool,
    /// idle time before a session expires
    pub session_inactivity: Duration,

    // misc
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 4567),
            data_dir: PathBuf::from("data"),
            credentials_path: PathBuf::from("users.yml"),
            secure_cookies: false,
            session_inactivity: Duration::from_secs(24 * 60 * 60),
            log_level: tracing::Level::INFO,
        }
    }
}
