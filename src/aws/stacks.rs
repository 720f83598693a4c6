use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudformation::types::StackStatus;

use crate::classify::OrphanCheck;
use crate::core::{StackFinding, StackTag};

/// Enumerates CloudFormation stacks in one region and keeps the ones the
/// classifier accepts. One `DescribeStacks` detail fetch per candidate.
pub async fn discover(
    config: &SdkConfig,
    region: &str,
    check: &OrphanCheck,
) -> Result<Vec<StackFinding>> {
    let client = aws_sdk_cloudformation::Client::new(config);
    let mut findings = Vec::new();

    let mut pages = client.list_stacks().into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.context("ListStacks")?;
        for summary in page.stack_summaries() {
            if matches!(summary.stack_status(), Some(StackStatus::DeleteComplete)) {
                continue;
            }
            let Some(name) = summary.stack_name() else {
                continue;
            };
            let Some(created) = summary.creation_time().and_then(crate::aws::to_offset) else {
                continue;
            };
            if !check.matches(name, created) {
                continue;
            }

            let detail = client
                .describe_stacks()
                .stack_name(name)
                .send()
                .await
                .with_context(|| format!("DescribeStacks: {name}"))?;
            let stack = detail.stacks().first();

            findings.push(StackFinding {
                name: name.to_string(),
                creation_time: summary
                    .creation_time()
                    .and_then(crate::aws::to_rfc3339)
                    .unwrap_or_default(),
                status: summary
                    .stack_status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                last_updated: summary
                    .last_updated_time()
                    .and_then(crate::aws::to_rfc3339),
                description: stack
                    .and_then(|s| s.description())
                    .unwrap_or_default()
                    .to_string(),
                tags: stack
                    .map(|s| {
                        s.tags()
                            .iter()
                            .map(|t| StackTag {
                                key: t.key().unwrap_or_default().to_string(),
                                value: t.value().unwrap_or_default().to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
                region: region.to_string(),
            });
        }
    }

    Ok(findings)
}
