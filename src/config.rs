use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tokio::fs;

pub const CONFIG_ENV: &str = "BOUNDARY_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: Http,
    #[serde(default)]
    pub log: Log,
}

impl Config {
    pub async fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path.or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from)) {
            Some(p) => p,
            None => {
                let base = env::current_dir()?;
                let mut found = None;
                let list = ["config.toml", "config.example.toml"];

                for fragment in list {
                    let path = base.join(fragment);
                    if fs::try_exists(&path).await.unwrap_or(false) {
                        found = Some(path);
                        break;
                    }
                }

                let Some(path) = found else {
                    bail!("no configuration file found");
                };

                path
            }
        };

        Self::load_from_file(&path).await
    }

    async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}
