use anyhow::{Context, Result};
use aws_config::SdkConfig;

use crate::classify::{self, OrphanCheck};
use crate::core::TableFinding;

/// Enumerates DynamoDB tables in one region. The listing is names-only, so
/// marked names get one `DescribeTable` each before the age check.
pub async fn discover(
    config: &SdkConfig,
    region: &str,
    check: &OrphanCheck,
) -> Result<Vec<TableFinding>> {
    let client = aws_sdk_dynamodb::Client::new(config);
    let mut findings = Vec::new();

    let mut pages = client.list_tables().into_paginator().send();
    while let Some(page) = pages.next().await {
        let page = page.context("ListTables")?;
        for name in page.table_names() {
            let name = name.as_str();
            if !classify::name_has_marker(name, &check.marker) {
                continue;
            }

            let detail = client
                .describe_table()
                .table_name(name)
                .send()
                .await
                .with_context(|| format!("DescribeTable: {name}"))?;
            let Some(table) = detail.table() else {
                continue;
            };
            let Some(created) = table
                .creation_date_time()
                .and_then(crate::aws::to_offset)
            else {
                continue;
            };
            if !classify::is_older_than(created, check.age_days, check.now) {
                continue;
            }

            findings.push(TableFinding {
                name: name.to_string(),
                creation_time: table
                    .creation_date_time()
                    .and_then(crate::aws::to_rfc3339)
                    .unwrap_or_default(),
                status: table
                    .table_status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                size_bytes: table.table_size_bytes().unwrap_or_default(),
                item_count: table.item_count().unwrap_or_default(),
                region: region.to_string(),
            });
        }
    }

    Ok(findings)
}
