use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // log level for http tracing
    pub log_level: tracing::Level,
    // Only send the session cookie over https
    pub secure_cookies: bool,
    // Idle time after which a session is dropped
    pub session_inactivity: Duration,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, secure_cookies: bool, session_inactivity: Duration) -> Self {
        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, secure_cookies={}, session_inactivity={:?}",
            listen_addr,
            secure_cookies,
            session_inactivity
        );
        Self {
            listen_addr,
            log_level: tracing::Level::INFO,
            secure_cookies,
            session_inactivity,
        }
    }
}
