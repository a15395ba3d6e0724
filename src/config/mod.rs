//! Configuration management.
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! environment variables prefixed with `PAPER_RANKER_` (nested keys use `__`,
//! e.g. `PAPER_RANKER_RANKING__TOP_K=10`).
//!
//! # Configuration File Format
//!
//! ```toml
//! [search]
//! max_results = 20
//! detail_max_results = 50
//! default_query = "machine learning"
//!
//! [ranking]
//! top_k = 5
//! summary_sentences = 4
//!
//! [downloads]
//! directory = "./papers"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ranking::{DEFAULT_MAX_SENTENCES, DEFAULT_TOP_K};
use crate::sources::ARXIV_API_URL;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "paper-ranker.toml";

/// Prefix of environment overrides
const ENV_PREFIX: &str = "PAPER_RANKER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Provider search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Ranking and summary settings
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// MCP HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Provider search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Papers fetched for a ranked search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Papers fetched when looking a paper up by id
    #[serde(default = "default_detail_max_results")]
    pub detail_max_results: usize,

    /// Query used by detail lookups without keywords
    #[serde(default = "default_query")]
    pub default_query: String,

    /// arXiv API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            detail_max_results: default_detail_max_results(),
            default_query: default_query(),
            api_url: default_api_url(),
        }
    }
}

fn default_max_results() -> usize {
    20
}

fn default_detail_max_results() -> usize {
    50
}

fn default_query() -> String {
    "machine learning".to_string()
}

fn default_api_url() -> String {
    ARXIV_API_URL.to_string()
}

/// Ranking and summary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Size of the top-K subset
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Sentences kept in a paper summary
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            summary_sentences: default_summary_sentences(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_summary_sentences() -> usize {
    DEFAULT_MAX_SENTENCES
}

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory PDFs are saved into, created on demand
    #[serde(default = "default_download_dir")]
    pub directory: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./papers")
}

/// MCP HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from `path` if given, else from the first config file
/// found, else from defaults and the environment only
pub fn load(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    match find_config_file() {
        Some(path) => {
            tracing::debug!("Using config file {}", path.display());
            load_config(&path)
        }
        None => config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize(),
    }
}

/// Look for `./paper-ranker.toml`, then `<config dir>/paper-ranker/config.toml`
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-ranker").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.detail_max_results, 50);
        assert_eq!(config.search.default_query, "machine learning");
        assert_eq!(config.ranking.top_k, 5);
        assert_eq!(config.ranking.summary_sentences, 4);
        assert_eq!(config.downloads.directory, PathBuf::from("./papers"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[ranking]
top_k = 3

[downloads]
directory = "/tmp/pdfs"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.ranking.top_k, 3);
        assert_eq!(config.ranking.summary_sentences, 4);
        assert_eq!(config.downloads.directory, PathBuf::from("/tmp/pdfs"));
        assert_eq!(config.search.max_results, 20);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_environment_override() {
        std::env::set_var("PAPER_RANKER_SERVER__PORT", "9123");
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let config = load_config(file.path()).unwrap();
        std::env::remove_var("PAPER_RANKER_SERVER__PORT");

        assert_eq!(config.server.port, 9123);
    }

    #[test]
    fn test_toml_output_loads_back() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[ranking]"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
