use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::core::{ApiGatewayFinding, BucketFinding, LambdaFinding, StackFinding, TableFinding};

/// The interchange artifact between discovery and cleanup.
///
/// Every bucket defaults to empty so a report with missing keys still
/// deserializes; cleanup must tolerate partially-absent structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub stacks: Vec<StackFinding>,
    #[serde(default)]
    pub lambdas: Vec<LambdaFinding>,
    #[serde(default)]
    pub s3_buckets: Vec<BucketFinding>,
    #[serde(default)]
    pub api_gateways: Vec<ApiGatewayFinding>,
    #[serde(default)]
    pub dynamodb_tables: Vec<TableFinding>,
}

impl Report {
    /// `orphan_resources_report_<YYYYMMDD_HHMMSS>.json`, UTC, second
    /// granularity. Collisions within the same second are out of scope.
    pub fn file_name(generated_at: OffsetDateTime) -> Result<String> {
        let stamp = generated_at
            .format(format_description!(
                "[year][month][day]_[hour][minute][second]"
            ))
            .context("format report timestamp")?;
        Ok(format!("orphan_resources_report_{stamp}.json"))
    }

    pub fn save(&self, dir: &Path, generated_at: OffsetDateTime) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create report directory: {}", dir.display()))?;
        let path = dir.join(Self::file_name(generated_at)?);
        let json = serde_json::to_string_pretty(self).context("serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write report: {}", path.display()))?;
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read report: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parse report: {}", path.display()))
    }

    pub fn total(&self) -> usize {
        self.stacks.len()
            + self.lambdas.len()
            + self.s3_buckets.len()
            + self.api_gateways.len()
            + self.dynamodb_tables.len()
    }
}
