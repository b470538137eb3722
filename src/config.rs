use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// API credentials for the application-only auth flow.
///
/// Resolution order: `TWITTER_API_KEY` / `TWITTER_API_SECRET` environment
/// variables, then the given TOML file, then the platform config directory
/// (`<config dir>/tweetcorpus/config.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let (Ok(api_key), Ok(api_secret)) = (
            std::env::var("TWITTER_API_KEY"),
            std::env::var("TWITTER_API_SECRET"),
        ) {
            return Ok(Self {
                api_key,
                api_secret,
            });
        }

        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading credentials from {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing credentials file {}", path.display()))?;
        Ok(config)
    }
}

fn default_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("no config directory on this platform")?;
    Ok(dir.join("tweetcorpus").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"key\"\napi_secret = \"secret\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
    }

    #[test]
    fn test_from_file_missing_field_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"key\"").unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_file_missing_file_fails() {
        assert!(Config::from_file(Path::new("/nonexistent/config.toml")).is_err());
    }
}
