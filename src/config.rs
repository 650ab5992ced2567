pub const HOSTNAME: &str = "localhost";
pub const PORT: u16 = 3000;

/// Same backlog the Node.js http server passes to `listen(2)`.
pub const LISTEN_BACKLOG: i32 = 511;

/// Address the responder listens on. The binary only ever uses [`Default`];
/// tests bind `127.0.0.1:0` so they can run side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    /// `host:port` as shown in logs and errors.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(HOSTNAME, PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_localhost_3000() {
        let config = ServerConfig::default();
        assert_eq!(config.hostname, "localhost");
        assert_eq!(config.port, 3000);
        assert_eq!(config.authority(), "localhost:3000");
    }
}
