//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or an environment variable; a `.env`
//! file in the working directory is loaded first by the binary.

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono_tz::Tz;
use clap::Parser;
use unari_core::{CampusDirectory, env::parse_timezone};

use crate::{ServerError, fetch::DEFAULT_MENU_URL};

/// Unari menu terminal server
#[derive(Parser, Debug, Clone)]
#[command(name = "unari-server")]
#[command(about = "Cafeteria menus over SSH")]
#[command(version)]
#[command(args_override_self = true)]
pub struct Args {
    /// Host to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "23234")]
    pub port: String,

    /// Path to the server's OpenSSH private key
    #[arg(long, env = "HOST_KEY_PATH", default_value = ".ssh/id_ed25519")]
    pub host_key: PathBuf,

    /// IANA timezone in which "today" is evaluated
    #[arg(long, env = "MENU_TIMEZONE", default_value = "Europe/Helsinki")]
    pub timezone: String,

    /// Restaurants endpoint
    #[arg(long, env = "MENU_URL", default_value = DEFAULT_MENU_URL)]
    pub menu_url: String,

    /// JSON file replacing the built-in campus list
    #[arg(long, env = "CAMPUS_FILE")]
    pub campus_file: Option<PathBuf>,

    /// Seconds sessions get to finish after a shutdown signal
    #[arg(long, default_value = "30")]
    pub shutdown_grace_secs: u64,

    /// Seconds before a menu fetch is abandoned
    #[arg(long, default_value = "10")]
    pub fetch_timeout_secs: u64,

    /// Seconds of SSH inactivity before a connection is dropped
    #[arg(long, default_value = "3600")]
    pub idle_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `host:port` to bind.
    pub listen_addr: String,
    /// OpenSSH private key path.
    pub host_key: PathBuf,
    /// Reference timezone for "today".
    pub timezone: Tz,
    /// Restaurants endpoint.
    pub menu_url: String,
    /// Campus directory shared by every session.
    pub campuses: Arc<CampusDirectory>,
    /// Bound on how long shutdown waits for sessions.
    pub shutdown_grace: Duration,
    /// Menu fetch timeout.
    pub fetch_timeout: Duration,
    /// SSH inactivity timeout.
    pub idle_timeout: Duration,
}

impl ServerConfig {
    /// Configuration listening on `listen_addr` with built-in defaults.
    pub fn new(listen_addr: impl Into<String>, host_key: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            host_key: host_key.into(),
            timezone: chrono_tz::Europe::Helsinki,
            menu_url: DEFAULT_MENU_URL.to_string(),
            campuses: Arc::new(CampusDirectory::helsinki()),
            shutdown_grace: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(3600),
        }
    }
}

/// Join host and port into an address string, bracketing IPv6 hosts.
fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

impl TryFrom<Args> for ServerConfig {
    type Error = ServerError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let timezone = parse_timezone(&args.timezone)?;

        let campuses = match &args.campus_file {
            Some(path) => {
                let directory = CampusDirectory::load(path)?;
                tracing::info!(path = %path.display(), campuses = directory.len(), "loaded campus file");
                directory
            },
            None => CampusDirectory::helsinki(),
        };

        Ok(Self {
            listen_addr: join_host_port(&args.host, &args.port),
            host_key: args.host_key,
            timezone,
            menu_url: args.menu_url,
            campuses: Arc::new(campuses),
            shutdown_grace: Duration::from_secs(args.shutdown_grace_secs),
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use unari_core::ConfigError;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec![
            "unari-server",
            "--host",
            "127.0.0.1",
            "--port",
            "2222",
            "--timezone",
            "Europe/Helsinki",
            "--menu-url",
            "http://localhost/menus",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn host_and_port_join_into_listen_addr() {
        let config = ServerConfig::try_from(args(&[])).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:2222");
        assert_eq!(config.menu_url, "http://localhost/menus");
        assert_eq!(config.timezone, chrono_tz::Europe::Helsinki);
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let config = ServerConfig::try_from(args(&["--host", "::1"])).unwrap();

        assert_eq!(config.listen_addr, "[::1]:2222");
        let addr: std::net::SocketAddr = config.listen_addr.parse().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 2222);

        assert_eq!(join_host_port("[::]", "22"), "[::]:22");
        assert_eq!(join_host_port("localhost", "22"), "localhost:22");
    }

    #[test]
    fn durations_from_seconds() {
        let config = ServerConfig::try_from(args(&[
            "--shutdown-grace-secs",
            "5",
            "--fetch-timeout-secs",
            "3",
            "--idle-timeout-secs",
            "60",
        ]))
        .unwrap();

        assert_eq!(config.shutdown_grace, Duration::from_secs(5));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let err = ServerConfig::try_from(args(&["--timezone", "Mars/Olympus"])).unwrap_err();
        assert!(matches!(err, ServerError::Config(ConfigError::Timezone(_))));
    }

    #[test]
    fn campus_file_replaces_builtin_directory() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default": "Otaniemi", "campuses": [{{"name": "Otaniemi", "restaurants": ["Dipoli"]}}]}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = ServerConfig::try_from(args(&["--campus-file", &path])).unwrap();

        assert_eq!(config.campuses.len(), 1);
        assert_eq!(config.campuses.get(config.campuses.default_index()).map(|c| c.name.as_str()), Some("Otaniemi"));
    }

    #[test]
    fn missing_campus_file_is_config_error() {
        let err = ServerConfig::try_from(args(&["--campus-file", "/nonexistent/campuses.json"]))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(ConfigError::Read { .. })));
    }
}
