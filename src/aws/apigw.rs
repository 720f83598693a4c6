use anyhow::{Context, Result};
use aws_config::SdkConfig;

use crate::classify::OrphanCheck;
use crate::core::ApiGatewayFinding;

/// Enumerates API Gateway REST APIs in one region. No detail fetch; the
/// listing already carries everything the finding records.
pub async fn discover(
    config: &SdkConfig,
    region: &str,
    check: &OrphanCheck,
) -> Result<Vec<ApiGatewayFinding>> {
    let client = aws_sdk_apigateway::Client::new(config);
    let mut findings = Vec::new();

    let mut pages = client.get_rest_apis().into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.context("GetRestApis")?;
        for api in page.items() {
            let (Some(id), Some(name)) = (api.id(), api.name()) else {
                continue;
            };
            let Some(created) = api.created_date().and_then(crate::aws::to_offset) else {
                continue;
            };
            if !check.matches(name, created) {
                continue;
            }
            findings.push(ApiGatewayFinding {
                id: id.to_string(),
                name: name.to_string(),
                creation_time: api
                    .created_date()
                    .and_then(crate::aws::to_rfc3339)
                    .unwrap_or_default(),
                description: api.description().unwrap_or_default().to_string(),
                region: region.to_string(),
            });
        }
    }

    Ok(findings)
}
