use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Regions swept for region-scoped kinds when the config names none.
pub const DEFAULT_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "eu-west-1",
    "eu-central-1",
    "ap-southeast-1",
    "ap-northeast-1",
];

pub const DEFAULT_MARKER: &str = "serverless";

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    // TOML wants plain values ahead of tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    pub discover: DiscoverConfig,
    pub thresholds: ThresholdsConfig,
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverConfig {
    pub regions: Vec<String>,
    pub marker: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdsConfig {
    pub age_days: u64,
    pub invoke_threshold: u64,
    pub monitor_days: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanupConfig {
    pub serverless_timeout_secs: u64,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            discover: DiscoverConfig {
                regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
                marker: DEFAULT_MARKER.to_string(),
            },
            thresholds: ThresholdsConfig {
                age_days: 90,
                invoke_threshold: 0,
                monitor_days: 30,
            },
            cleanup: CleanupConfig {
                serverless_timeout_secs: 300,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    discover: Option<RawDiscoverConfig>,
    thresholds: Option<RawThresholdsConfig>,
    cleanup: Option<RawCleanupConfig>,
}

#[derive(Debug, Deserialize)]
struct RawDiscoverConfig {
    regions: Option<Vec<String>>,
    marker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawThresholdsConfig {
    age_days: Option<u64>,
    invoke_threshold: Option<u64>,
    monitor_days: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawCleanupConfig {
    serverless_timeout_secs: Option<u64>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/awsweep/config.toml")
}

pub fn effective_home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s).context("parse config file (TOML)")?;
        apply_raw_config(&mut cfg, raw);
        cfg.config_path = Some(path.display().to_string());
    }

    apply_env_overrides(&mut cfg)?;

    // The marker is a fixed lowercase token; fold whatever the operator set.
    cfg.discover.marker = cfg.discover.marker.trim().to_lowercase();

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(discover) = raw.discover {
        if let Some(regions) = discover.regions {
            cfg.discover.regions = regions;
        }
        if let Some(marker) = discover.marker {
            cfg.discover.marker = marker;
        }
    }

    if let Some(thresholds) = raw.thresholds {
        if let Some(age_days) = thresholds.age_days {
            cfg.thresholds.age_days = age_days;
        }
        if let Some(invoke_threshold) = thresholds.invoke_threshold {
            cfg.thresholds.invoke_threshold = invoke_threshold;
        }
        if let Some(monitor_days) = thresholds.monitor_days {
            cfg.thresholds.monitor_days = monitor_days;
        }
    }

    if let Some(cleanup) = raw.cleanup {
        if let Some(secs) = cleanup.serverless_timeout_secs {
            cfg.cleanup.serverless_timeout_secs = secs;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("AWSWEEP_REGIONS") {
        let parts: Vec<String> = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        if !parts.is_empty() {
            cfg.discover.regions = parts;
        }
    }
    if let Ok(v) = std::env::var("AWSWEEP_MARKER") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.discover.marker = v.to_string();
        }
    }
    if let Ok(v) = std::env::var("AWSWEEP_AGE_DAYS") {
        cfg.thresholds.age_days = parse_u64(&v).with_context(|| "AWSWEEP_AGE_DAYS")?;
    }
    if let Ok(v) = std::env::var("AWSWEEP_INVOKE_THRESHOLD") {
        cfg.thresholds.invoke_threshold =
            parse_u64(&v).with_context(|| "AWSWEEP_INVOKE_THRESHOLD")?;
    }
    if let Ok(v) = std::env::var("AWSWEEP_MONITOR_DAYS") {
        cfg.thresholds.monitor_days = parse_u64(&v).with_context(|| "AWSWEEP_MONITOR_DAYS")?;
    }
    if let Ok(v) = std::env::var("AWSWEEP_SERVERLESS_TIMEOUT_SECS") {
        cfg.cleanup.serverless_timeout_secs =
            parse_u64(&v).with_context(|| "AWSWEEP_SERVERLESS_TIMEOUT_SECS")?;
    }

    Ok(())
}

fn parse_u64(s: &str) -> Result<u64> {
    s.trim()
        .parse::<u64>()
        .with_context(|| format!("expected a non-negative integer, got: {s}"))
}
