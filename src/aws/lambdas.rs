use anyhow::{Context, Result};
use aws_config::SdkConfig;

use crate::aws::metrics;
use crate::classify::{self, OrphanCheck};
use crate::core::{LambdaFinding, Thresholds};

/// Enumerates Lambda functions in one region. Marked, old functions get one
/// CloudWatch invocation-sum query each; a failed query excludes that
/// function (fail-closed) without aborting the region.
pub async fn discover(
    config: &SdkConfig,
    region: &str,
    check: &OrphanCheck,
    thresholds: &Thresholds,
) -> Result<Vec<LambdaFinding>> {
    let client = aws_sdk_lambda::Client::new(config);
    let metrics_client = aws_sdk_cloudwatch::Client::new(config);
    let mut findings = Vec::new();

    let mut pages = client.list_functions().into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.context("ListFunctions")?;
        for function in page.functions() {
            let Some(name) = function.function_name() else {
                continue;
            };
            if !classify::name_has_marker(name, &check.marker) {
                continue;
            }
            // LastModified arrives as a string with a non-colon offset.
            let Some(raw_modified) = function.last_modified() else {
                continue;
            };
            let modified = match classify::parse_timestamp(raw_modified) {
                Ok(ts) => ts,
                Err(err) => {
                    tracing::warn!(
                        region = %region,
                        function = %name,
                        error = %format!("{err:#}"),
                        "skipping function with unparseable LastModified"
                    );
                    continue;
                }
            };
            if !classify::is_older_than(modified, check.age_days, check.now) {
                continue;
            }

            let invocations = metrics::summed_invocations(
                &metrics_client,
                name,
                thresholds.monitor_days,
                check.now,
            )
            .await;
            if !classify::lambda_is_idle(invocations, thresholds.invoke_threshold) {
                continue;
            }

            findings.push(LambdaFinding {
                name: name.to_string(),
                runtime: function
                    .runtime()
                    .map(|r| r.as_str().to_string())
                    .unwrap_or_default(),
                creation_time: raw_modified.to_string(),
                description: function.description().unwrap_or_default().to_string(),
                memory: function.memory_size().unwrap_or_default(),
                timeout: function.timeout().unwrap_or_default(),
                region: region.to_string(),
            });
        }
    }

    Ok(findings)
}
