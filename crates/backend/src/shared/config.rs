use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `[auth] jwt_secret`.
pub const JWT_SECRET_ENV: &str = "FUNDEB_JWT_SECRET";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret shared with the auth provider that signs the tokens.
    #[serde(default)]
    pub jwt_secret: String,
}

/// Value shipped in `config.example.toml`; never accepted as a real secret.
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[database]
path = "target/db/fundeb.db"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `FUNDEB_JWT_SECRET` overrides the secret in either case. The embedded
/// config carries no secret, so without a config file the variable is
/// required.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            parse_config(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)?
        }
    };

    apply_jwt_secret(&mut config, std::env::var(JWT_SECRET_ENV).ok())?;
    Ok(config)
}

/// Applies the environment override and rejects missing or placeholder
/// secrets.
pub fn apply_jwt_secret(config: &mut Config, env_secret: Option<String>) -> anyhow::Result<()> {
    if let Some(secret) = env_secret.filter(|s| !s.trim().is_empty()) {
        config.auth.jwt_secret = secret;
    }

    let secret = config.auth.jwt_secret.trim();
    if secret.is_empty() || secret == PLACEHOLDER_JWT_SECRET {
        anyhow::bail!(
            "JWT secret is not configured; set {} or [auth] jwt_secret in config.toml",
            JWT_SECRET_ENV
        );
    }
    Ok(())
}

fn find_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    if config_path.exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "target/db/fundeb.db");
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_default_config_requires_secret_from_env() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        assert!(apply_jwt_secret(&mut config, None).is_err());
        assert!(apply_jwt_secret(&mut config, Some("  ".into())).is_err());

        apply_jwt_secret(&mut config, Some("from-env".into())).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-env");
    }

    #[test]
    fn test_placeholder_secret_is_rejected() {
        let mut config = parse_config(
            "[database]\npath = \"x.db\"\n\n[auth]\njwt_secret = \"change-me\"\n",
        )
        .unwrap();
        assert!(apply_jwt_secret(&mut config, None).is_err());

        // env override replaces the placeholder
        apply_jwt_secret(&mut config, Some("s3cret".into())).unwrap();
        assert_eq!(config.auth.jwt_secret, "s3cret");
    }

    #[test]
    fn test_secret_from_file_is_kept_without_env() {
        let mut config =
            parse_config("[database]\npath = \"x.db\"\n\n[auth]\njwt_secret = \"s3cret\"\n").unwrap();
        apply_jwt_secret(&mut config, None).unwrap();
        assert_eq!(config.auth.jwt_secret, "s3cret");
    }

    #[test]
    fn test_server_section_is_optional() {
        let config = parse_config(
            r#"
[database]
path = "/var/lib/fundeb/app.db"

[auth]
jwt_secret = "s3cret"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            get_database_path(&config),
            PathBuf::from("/var/lib/fundeb/app.db")
        );
    }

    #[test]
    fn test_missing_database_section_fails() {
        assert!(parse_config("[auth]\njwt_secret = \"s3cret\"\n").is_err());
    }
}
