use std::process::Stdio;
use std::time::Duration;

use aws_smithy_types::error::display::DisplayErrorContext;
use tokio::process::Command;

use crate::aws::RegionConfigs;
use crate::cleanup::ResourceDeleter;

/// Deletion against real AWS. Owns the per-region config cache for the
/// duration of one cleanup run.
pub struct AwsDeleter {
    configs: RegionConfigs,
    serverless_timeout: Duration,
}

impl AwsDeleter {
    pub fn new(serverless_timeout: Duration) -> Self {
        Self {
            configs: RegionConfigs::new(),
            serverless_timeout,
        }
    }

    /// `serverless remove` first; any failure (missing binary, non-zero
    /// exit, timeout) falls back to the native call.
    async fn try_serverless_remove(&self, name: &str, region: &str) -> bool {
        let mut cmd = Command::new("serverless");
        cmd.args(["remove", "--stack", name])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if !region.is_empty() {
            cmd.env("AWS_REGION", region);
        }

        match tokio::time::timeout(self.serverless_timeout, cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => {
                tracing::debug!(stack = %name, "removed via serverless framework");
                true
            }
            Ok(Ok(output)) => {
                tracing::debug!(
                    stack = %name,
                    exit_code = ?output.status.code(),
                    "serverless remove failed, falling back to CloudFormation"
                );
                false
            }
            Ok(Err(err)) => {
                tracing::debug!(
                    stack = %name,
                    error = %err,
                    "serverless CLI unavailable, falling back to CloudFormation"
                );
                false
            }
            Err(_) => {
                tracing::debug!(
                    stack = %name,
                    timeout = ?self.serverless_timeout,
                    "serverless remove timed out, falling back to CloudFormation"
                );
                false
            }
        }
    }
}

fn sdk_error<E>(err: E) -> String
where
    E: std::error::Error,
{
    format!("{}", DisplayErrorContext(err))
}

impl ResourceDeleter for AwsDeleter {
    async fn delete_stack(&mut self, name: &str, region: &str) -> Result<(), String> {
        if self.try_serverless_remove(name, region).await {
            return Ok(());
        }

        // DeleteStack only initiates deletion; completion is not awaited.
        let config = self.configs.for_region(region).await;
        aws_sdk_cloudformation::Client::new(&config)
            .delete_stack()
            .stack_name(name)
            .send()
            .await
            .map(|_| ())
            .map_err(sdk_error)
    }

    async fn empty_and_delete_bucket(&mut self, name: &str) -> Result<(), String> {
        let config = self.configs.base().await;
        let client = aws_sdk_s3::Client::new(&config);

        // The bucket must be fully empty (all versions and delete markers)
        // before DeleteBucket can succeed. ListObjectVersions paginates with
        // a key marker and a version-id marker pair.
        let mut key_marker: Option<String> = None;
        let mut version_id_marker: Option<String> = None;
        loop {
            let page = client
                .list_object_versions()
                .bucket(name)
                .set_key_marker(key_marker.take())
                .set_version_id_marker(version_id_marker.take())
                .send()
                .await
                .map_err(sdk_error)?;

            for version in page.versions() {
                let Some(key) = version.key() else {
                    continue;
                };
                client
                    .delete_object()
                    .bucket(name)
                    .key(key)
                    .set_version_id(version.version_id().map(String::from))
                    .send()
                    .await
                    .map_err(sdk_error)?;
            }
            for marker in page.delete_markers() {
                let Some(key) = marker.key() else {
                    continue;
                };
                client
                    .delete_object()
                    .bucket(name)
                    .key(key)
                    .set_version_id(marker.version_id().map(String::from))
                    .send()
                    .await
                    .map_err(sdk_error)?;
            }

            if page.is_truncated() == Some(true) {
                key_marker = page.next_key_marker().map(String::from);
                version_id_marker = page.next_version_id_marker().map(String::from);
            } else {
                break;
            }
        }

        client
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map(|_| ())
            .map_err(sdk_error)
    }

    async fn delete_function(&mut self, name: &str, region: &str) -> Result<(), String> {
        let config = self.configs.for_region(region).await;
        aws_sdk_lambda::Client::new(&config)
            .delete_function()
            .function_name(name)
            .send()
            .await
            .map(|_| ())
            .map_err(sdk_error)
    }

    async fn delete_rest_api(&mut self, api_id: &str, region: &str) -> Result<(), String> {
        let config = self.configs.for_region(region).await;
        aws_sdk_apigateway::Client::new(&config)
            .delete_rest_api()
            .rest_api_id(api_id)
            .send()
            .await
            .map(|_| ())
            .map_err(sdk_error)
    }

    async fn delete_table(&mut self, name: &str, region: &str) -> Result<(), String> {
        // DeleteTable is asynchronous on the provider side; not awaited.
        let config = self.configs.for_region(region).await;
        aws_sdk_dynamodb::Client::new(&config)
            .delete_table()
            .table_name(name)
            .send()
            .await
            .map(|_| ())
            .map_err(sdk_error)
    }
}
