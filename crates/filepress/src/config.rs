use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{self, Format, Serialized},
};
use filepress_archive::UnpackOptions;
use filepress_archive::options::{
    DEFAULT_COMPRESSION_LEVEL, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_TOTAL_BYTES,
};
use serde::{Deserialize, Serialize};

/// Directory created under the user's home when no root is configured.
const DEFAULT_ROOT_DIR: &str = "FileCompressorOutput";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: PathBuf,
    pub max_entries: usize,
    pub max_total_bytes: u64,
    pub compression_level: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_entries: DEFAULT_MAX_ENTRIES,
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Config {
    const FILE_NAME: &str = "filepress.toml";
    const ENV_PREFIX: &str = "FILEPRESS_";

    /// Defaults, then the config file, then `FILEPRESS_*` variables.
    ///
    /// An explicit `path` must exist; the implicit `./filepress.toml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
        }
        let file = path.unwrap_or(Path::new(Self::FILE_NAME));

        Self::figment(file)
            .extract()
            .with_context(|| format!("invalid configuration (file: {})", file.display()))
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(providers::Toml::file(file))
            .merge(providers::Env::prefixed(Self::ENV_PREFIX).only(&[
                "root",
                "max_entries",
                "max_total_bytes",
                "compression_level",
            ]))
    }

    pub fn unpack_options(&self) -> UnpackOptions {
        UnpackOptions::default()
            .max_entries(self.max_entries)
            .max_total_bytes(self.max_total_bytes)
            .compression_level(self.compression_level)
    }
}

fn default_root() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIR)
}
