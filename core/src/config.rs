use std::time::Duration;

use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

use crate::compliance::ComplianceCriteria;

pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 150 * 1024 * 1024;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlServer {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<String>,
    pub upload_dir: Option<String>,
    pub max_upload_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlBinPaths {
    pub ffprobe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlProbe {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TomlCriteria {
    pub resolutions: Option<Vec<(u32, u32)>>,
    pub target_frame_rate: Option<f64>,
    pub frame_rate_tolerance: Option<f64>,
    pub target_frame_count: Option<u64>,
    pub frame_count_tolerance: Option<u64>,
    pub max_file_size: Option<String>,
    pub container_tokens: Option<Vec<String>>,
    pub codec_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Server")]
    pub server: Option<TomlServer>,
    #[serde(rename = "BinPaths")]
    pub bin_paths: Option<TomlBinPaths>,
    #[serde(rename = "Probe")]
    pub probe: Option<TomlProbe>,
    #[serde(rename = "Criteria")]
    pub criteria: Option<TomlCriteria>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: Option<String>,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: DEFAULT_PORT,
            static_dir: None,
            upload_dir: None,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinPaths {
    pub ffprobe: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub bin_paths: BinPaths,
    pub probe_timeout: Duration,
    pub criteria: ComplianceCriteria,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            bin_paths: BinPaths::default(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            criteria: ComplianceCriteria::default(),
        }
    }
}

pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    // all paths in config are relative to this
    let config_dir = path.parent().unwrap_or(Path::new("."));
    parse_config(&toml_str, config_dir)
}

pub fn parse_config(toml_str: &str, config_dir: &Path) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let resolve = |p: String| {
        let path = PathBuf::from(p);
        if path.is_absolute() {
            path
        } else {
            config_dir.join(path)
        }
    };

    let server = match toml_config.server {
        None => ServerConfig::default(),
        Some(server) => ServerConfig {
            address: server.address,
            port: server.port.unwrap_or(DEFAULT_PORT),
            static_dir: server.static_dir.map(resolve),
            upload_dir: server.upload_dir.map(resolve),
            max_upload_size: server
                .max_upload_size
                .map(|s| parse_size::parse_size(&s).context("Error parsing Server.max_upload_size"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
        },
    };
    let bin_paths = BinPaths {
        ffprobe: toml_config
            .bin_paths
            .and_then(|bin_paths| bin_paths.ffprobe)
            .map(resolve),
    };
    let probe_timeout = toml_config
        .probe
        .and_then(|probe| probe.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_PROBE_TIMEOUT);
    let criteria = match toml_config.criteria {
        None => ComplianceCriteria::default(),
        Some(toml_criteria) => criteria_with_overrides(toml_criteria)?,
    };
    Ok(Config {
        server,
        bin_paths,
        probe_timeout,
        criteria,
    })
}

fn criteria_with_overrides(toml_criteria: TomlCriteria) -> Result<ComplianceCriteria> {
    let default = ComplianceCriteria::default();
    let max_file_size = toml_criteria
        .max_file_size
        .map(|s| parse_size::parse_size(&s).context("Error parsing Criteria.max_file_size"))
        .transpose()?
        .unwrap_or(default.max_file_size);
    Ok(ComplianceCriteria {
        resolutions: toml_criteria.resolutions.unwrap_or(default.resolutions),
        target_frame_rate: toml_criteria
            .target_frame_rate
            .unwrap_or(default.target_frame_rate),
        frame_rate_tolerance: toml_criteria
            .frame_rate_tolerance
            .unwrap_or(default.frame_rate_tolerance),
        target_frame_count: toml_criteria
            .target_frame_count
            .unwrap_or(default.target_frame_count),
        frame_count_tolerance: toml_criteria
            .frame_count_tolerance
            .unwrap_or(default.frame_count_tolerance),
        max_file_size,
        container_tokens: toml_criteria
            .container_tokens
            .unwrap_or(default.container_tokens),
        codec_tokens: toml_criteria.codec_tokens.unwrap_or(default.codec_tokens),
    })
}
