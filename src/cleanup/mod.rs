//! Cleanup: match caller-supplied identifiers against a report and issue
//! best-effort deletions, one attempt per matching kind per identifier.

use serde::Serialize;

use crate::core::{Report, ResourceKind};

/// One deletion to attempt. `region` is empty for globally-scoped kinds and
/// for report entries written before region capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupTarget {
    pub kind: ResourceKind,
    pub id: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupResults {
    pub succeeded: Vec<(ResourceKind, String)>,
    pub failed: Vec<(ResourceKind, String)>,
}

/// Deletion calls behind a seam so the orchestration is testable without a
/// provider. Errors are plain strings; the orchestrator only tallies them.
#[allow(async_fn_in_trait)]
pub trait ResourceDeleter {
    async fn delete_stack(&mut self, name: &str, region: &str) -> Result<(), String>;
    async fn empty_and_delete_bucket(&mut self, name: &str) -> Result<(), String>;
    async fn delete_function(&mut self, name: &str, region: &str) -> Result<(), String>;
    async fn delete_rest_api(&mut self, api_id: &str, region: &str) -> Result<(), String>;
    async fn delete_table(&mut self, name: &str, region: &str) -> Result<(), String>;
}

/// Scans every kind bucket for each identifier. An identifier that collides
/// across kinds yields one target per matching kind; that multiplicity is
/// deliberate and mirrors what operators already rely on. Stacks, buckets,
/// functions, and tables match on `name`; REST APIs match on `id`.
pub fn match_targets(report: &Report, resource_ids: &[String]) -> Vec<CleanupTarget> {
    let mut targets = Vec::new();

    for id in resource_ids {
        if let Some(stack) = report.stacks.iter().find(|s| &s.name == id) {
            targets.push(CleanupTarget {
                kind: ResourceKind::Stack,
                id: id.clone(),
                region: stack.region.clone(),
            });
        }
        if report.s3_buckets.iter().any(|b| &b.name == id) {
            targets.push(CleanupTarget {
                kind: ResourceKind::S3Bucket,
                id: id.clone(),
                region: String::new(),
            });
        }
        if let Some(function) = report.lambdas.iter().find(|f| &f.name == id) {
            targets.push(CleanupTarget {
                kind: ResourceKind::Lambda,
                id: id.clone(),
                region: function.region.clone(),
            });
        }
        if let Some(api) = report.api_gateways.iter().find(|a| &a.id == id) {
            targets.push(CleanupTarget {
                kind: ResourceKind::ApiGateway,
                id: id.clone(),
                region: api.region.clone(),
            });
        }
        if let Some(table) = report.dynamodb_tables.iter().find(|t| &t.name == id) {
            targets.push(CleanupTarget {
                kind: ResourceKind::Dynamodb,
                id: id.clone(),
                region: table.region.clone(),
            });
        }
    }

    targets
}

/// Attempts every target in order. A failed call is terminal for that
/// (kind, identifier) pair in this run; there are no retries.
pub async fn run_cleanup<D: ResourceDeleter>(
    deleter: &mut D,
    targets: &[CleanupTarget],
) -> CleanupResults {
    let mut results = CleanupResults::default();

    for target in targets {
        let outcome = match target.kind {
            ResourceKind::Stack => deleter.delete_stack(&target.id, &target.region).await,
            ResourceKind::S3Bucket => deleter.empty_and_delete_bucket(&target.id).await,
            ResourceKind::Lambda => deleter.delete_function(&target.id, &target.region).await,
            ResourceKind::ApiGateway => deleter.delete_rest_api(&target.id, &target.region).await,
            ResourceKind::Dynamodb => deleter.delete_table(&target.id, &target.region).await,
        };

        match outcome {
            Ok(()) => results.succeeded.push((target.kind, target.id.clone())),
            Err(err) => {
                tracing::warn!(
                    kind = %target.kind,
                    id = %target.id,
                    error = %err,
                    "deletion failed"
                );
                results.failed.push((target.kind, target.id.clone()));
            }
        }
    }

    results
}
