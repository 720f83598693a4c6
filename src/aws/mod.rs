//! Thin plumbing over the AWS SDK: per-region client configuration and the
//! per-kind enumeration and deletion calls.

use std::collections::HashMap;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_smithy_types::DateTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub mod apigw;
pub mod delete;
pub mod dynamodb;
pub mod lambdas;
pub mod metrics;
pub mod s3;
pub mod stacks;

pub use delete::AwsDeleter;

/// Lazily-built SDK configuration per region, owned by an orchestrator for
/// one run. Clients are cheap to construct from a config, so only configs
/// are cached.
#[derive(Default)]
pub struct RegionConfigs {
    base: Option<SdkConfig>,
    per_region: HashMap<String, SdkConfig>,
}

impl RegionConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the ambient credential/region chain, used for the
    /// global S3 listing and for report entries that predate region capture.
    pub async fn base(&mut self) -> SdkConfig {
        if let Some(cfg) = &self.base {
            return cfg.clone();
        }
        let cfg = aws_config::load_defaults(BehaviorVersion::latest()).await;
        self.base = Some(cfg.clone());
        cfg
    }

    pub async fn get(&mut self, region: &str) -> SdkConfig {
        if let Some(cfg) = self.per_region.get(region) {
            return cfg.clone();
        }
        let cfg = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        self.per_region.insert(region.to_string(), cfg.clone());
        cfg
    }

    /// Empty region means "whatever the ambient chain says".
    pub async fn for_region(&mut self, region: &str) -> SdkConfig {
        if region.is_empty() {
            self.base().await
        } else {
            self.get(region).await
        }
    }
}

pub(crate) fn to_offset(dt: &DateTime) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(dt.secs()).ok()
}

pub(crate) fn to_rfc3339(dt: &DateTime) -> Option<String> {
    to_offset(dt)?.format(&Rfc3339).ok()
}
