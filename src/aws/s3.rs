use anyhow::{Context, Result};
use aws_config::SdkConfig;

use crate::classify::OrphanCheck;
use crate::core::BucketFinding;

/// Enumerates S3 buckets once per run; the listing is global.
pub async fn discover(config: &SdkConfig, check: &OrphanCheck) -> Result<Vec<BucketFinding>> {
    let client = aws_sdk_s3::Client::new(config);
    let resp = client.list_buckets().send().await.context("ListBuckets")?;

    let mut findings = Vec::new();
    for bucket in resp.buckets() {
        let Some(name) = bucket.name() else {
            continue;
        };
        let Some(created) = bucket.creation_date().and_then(crate::aws::to_offset) else {
            continue;
        };
        if !check.matches(name, created) {
            continue;
        }
        findings.push(BucketFinding {
            name: name.to_string(),
            creation_time: bucket
                .creation_date()
                .and_then(crate::aws::to_rfc3339)
                .unwrap_or_default(),
        });
    }

    Ok(findings)
}
