use companysearch::{QueryBuilder, SearchConfig};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "companysearch.toml";
pub const CONFIG_ENV: &str = "COMPANYSEARCH_CONFIG";

/// A loaded search configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// `None` when no file was found and defaults are in use.
    pub config_path: Option<PathBuf>,
    pub search: SearchConfig,
}

impl ProjectConfig {
    /// Resolve and load the config file.
    ///
    /// An explicit `--config` path (or `COMPANYSEARCH_CONFIG`) must exist.
    /// The implicit `companysearch.toml` is optional.
    pub fn resolve(explicit: Option<PathBuf>) -> anyhow::Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        match explicit.or(from_env) {
            Some(path) => Self::load(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    tracing::debug!(target: "companysearch.cli", "no config file, using defaults");
                    Ok(Self {
                        config_path: None,
                        search: SearchConfig::default(),
                    })
                }
            }
        }
    }

    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let search = parse(&raw, &config_path)?;
        tracing::debug!(
            target: "companysearch.cli",
            path = %config_path.display(),
            "loaded config"
        );

        Ok(Self {
            config_path: Some(config_path),
            search,
        })
    }

    pub fn query_builder(&self) -> anyhow::Result<QueryBuilder> {
        QueryBuilder::new(self.search.clone())
            .map_err(|e| anyhow::anyhow!("{}: {e}", self.describe()))
    }

    fn describe(&self) -> String {
        match &self.config_path {
            Some(path) => format!("invalid config file {}", path.display()),
            None => "invalid default config".to_string(),
        }
    }
}

fn parse(raw: &str, config_path: &Path) -> anyhow::Result<SearchConfig> {
    let search: SearchConfig = toml::from_str(raw).map_err(|e| {
        anyhow::anyhow!(
            "failed to parse config file {}: {e}",
            config_path.display()
        )
    })?;

    search
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid config file {}: {e}", config_path.display()))?;
    Ok(search)
}
