use anyhow::{Context, Result};
use pxparser::{SessionOptions, WebEndpoint};
use serde::Deserialize;
use serde_json::from_str;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG: &str = "config.json";

#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    host: Option<String>,
    proxy: Option<String>,
    connect_timeout: Option<u64>,
    timeout: Option<u64>,
    user_agent: Option<String>,
    thumbs_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    pub endpoint: WebEndpoint,
    pub session: SessionOptions,
    pub thumbs_dir: Option<PathBuf>,
}

impl Config {
    fn from_file(config: ConfigFile) -> Result<Self> {
        let endpoint = WebEndpoint::with_host(config.host.as_deref())
            .with_context(|| format!("bad host {:?}", config.host))?;
        Ok(Self {
            endpoint,
            session: SessionOptions {
                proxy: config.proxy,
                connect_timeout: config.connect_timeout.map(Duration::from_secs),
                timeout: config.timeout.map(Duration::from_secs),
                user_agent: config.user_agent,
            },
            thumbs_dir: config.thumbs_dir,
        })
    }
}

/// Reads the config at `path`, or the default one when `path` is `None`.
/// Only the default config may be absent.
pub fn read_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG), false),
    };
    let config: ConfigFile = match fs::read_to_string(path) {
        Ok(s) => from_str(&s).with_context(|| format!("parsing {}", path.display()))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => ConfigFile::default(),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    Config::from_file(config)
}
