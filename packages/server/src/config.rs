//! Server configuration from environment variables.

use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8050;
/// Default location of the population CSV, relative to the working
/// directory.
pub const DEFAULT_DATASET_PATH: &str = "data/population_zurich.csv";
/// Default directory of the browser page.
pub const DEFAULT_STATIC_DIR: &str = "app";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Population CSV to load (`POPULATION_CSV`).
    pub dataset_path: PathBuf,
    /// Directory served at `/` (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Unset
    /// variables and an unparseable `PORT` fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            dataset_path: lookup("POPULATION_CSV")
                .map_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH), PathBuf::from),
            static_dir: lookup("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8050);
        assert_eq!(config.dataset_path, PathBuf::from("data/population_zurich.csv"));
        assert_eq!(config.static_dir, PathBuf::from("app"));
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(|name| match name {
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9000".to_string()),
            "POPULATION_CSV" => Some("/srv/pop.csv".to_string()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.dataset_path, PathBuf::from("/srv/pop.csv"));
        assert_eq!(config.static_dir, PathBuf::from("app"));
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = ServerConfig::from_lookup(|name| (name == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
