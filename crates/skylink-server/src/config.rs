//! Server configuration, read from the environment at startup.

use std::net::SocketAddr;

/// Runtime configuration for the telemetry server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the listener binds.
    pub listen_addr: SocketAddr,
    /// RNG seed handed to each connection's simulation.
    pub seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            seed: 42,
        }
    }
}

impl ServerConfig {
    /// Build a config from `SKYLINK_*` environment variables, keeping
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(addr) = read_env("SKYLINK_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Some(seed) = read_env("SKYLINK_SIM_SEED") {
            config.seed = seed;
        }
        config
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr.port(), 8000);
        assert_eq!(config.seed, 42);
    }
}
