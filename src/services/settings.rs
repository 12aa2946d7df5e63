use crate::cli::Cli;
use crate::domain::constants::{DEFAULT_ENDPOINT, DEFAULT_HOST};
use crate::domain::models::ConfigFile;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Resolved connection settings. Flags and env vars win over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub endpoint: String,
    pub token: Option<String>,
    pub debug: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Self {
        let pick = |flag: &Option<String>, file: Option<String>| {
            flag.clone()
                .filter(|v| !v.trim().is_empty())
                .or(file.filter(|v| !v.trim().is_empty()))
        };
        Self {
            host: pick(&cli.host, file.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            endpoint: pick(&cli.endpoint, file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token: pick(&cli.token, file.token),
            debug: cli.debug,
        }
    }

    /// Absolute GraphQL url: `{host}/{endpoint}`.
    pub fn graphql_url(&self) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/regent/config.toml"))
}

/// Without `HOME` there is no config file to read.
pub fn load_config() -> anyhow::Result<ConfigFile> {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(ConfigFile::default()),
    }
}

pub fn load_config_from(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))
}

pub fn validate_token(settings: &Settings) -> anyhow::Result<()> {
    match settings.token.as_deref() {
        Some(t) if !t.trim().is_empty() => Ok(()),
        _ => anyhow::bail!(
            "an api token is required: pass --token, set REGENT_TOKEN, or add `token` to {}",
            config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "~/.config/regent/config.toml".to_string())
        ),
    }
}

/// `RUST_LOG` wins; otherwise `--debug` turns on this crate's debug events.
pub fn init_logging(debug: bool) {
    let default = if debug { "regent=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["regent"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["namespace", "delete-alias", "x"]);
        Cli::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let s = Settings::resolve(&cli(&[]), ConfigFile::default());
        assert_eq!(s.host, DEFAULT_HOST);
        assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
        assert!(s.token.is_none());
        assert_eq!(s.graphql_url(), "https://circleci.com/graphql-unstable");
    }

    #[test]
    fn flags_override_config_file() {
        let file = ConfigFile {
            host: Some("https://file.example".into()),
            endpoint: None,
            token: Some("file-token".into()),
        };
        let s = Settings::resolve(&cli(&["--host", "https://flag.example/"]), file);
        assert_eq!(s.host, "https://flag.example/");
        assert_eq!(s.token.as_deref(), Some("file-token"));
        assert_eq!(s.graphql_url(), "https://flag.example/graphql-unstable");
    }

    #[test]
    fn config_file_is_optional_and_parsed_when_present() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(load_config_from(&path).unwrap(), ConfigFile::default());

        std::fs::write(&path, "host = \"https://h\"\ntoken = \"t\"\n").unwrap();
        let file = load_config_from(&path).unwrap();
        assert_eq!(file.host.as_deref(), Some("https://h"));
        assert_eq!(file.token.as_deref(), Some("t"));

        std::fs::write(&path, "host = [").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn blank_token_fails_validation() {
        let mut s = Settings::resolve(&cli(&[]), ConfigFile::default());
        assert!(validate_token(&s).is_err());
        s.token = Some("  ".into());
        assert!(validate_token(&s).is_err());
        s.token = Some("abc".into());
        assert!(validate_token(&s).is_ok());
    }
}
