pub(crate) use crate::config::credentials::Credentials;
use confique::Config;
use std::net::{AddrParseError, IpAddr, SocketAddr};

pub mod credentials;

/// Optional configuration file read next to the working directory
const CONFIG_FILE: &str = "mock-auth-server.toml";

/// Listener and timing configuration for the mock server.
///
/// Credentials are deliberately absent here, see [`Credentials`].
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// Interface the listener binds to (default: 0.0.0.0)
    #[config(env = "MOCK_AUTH_HOST", default = "0.0.0.0")]
    pub host: String,

    /// The port the mock server will listen to (default: 8000)
    #[config(env = "MOCK_AUTH_PORT", default = 8000)]
    pub port: u16,

    /// How long `/slow` suspends before answering, in milliseconds (default: 1000).
    /// Values below 1000 are raised to 1000.
    #[config(env = "MOCK_AUTH_SLOW_DELAY_MS", default = 1000)]
    pub slow_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            slow_delay_ms: 1000,
        }
    }
}

impl Settings {
    /// Loads settings from the environment, then the optional TOML file, then defaults
    pub fn new() -> Result<Self, confique::Error> {
        Self::builder().env().file(CONFIG_FILE).load()
    }

    /// Address the listener should bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    #[cfg(test)]
    pub fn for_test() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0, // Let the OS choose a port
            slow_delay_ms: 1000,
        }
    }
}
