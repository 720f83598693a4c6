use std::collections::HashSet;

use awsweep::cleanup::{self, CleanupTarget, ResourceDeleter};
use awsweep::core::{BucketFinding, LambdaFinding, Report, ResourceKind, StackFinding};

/// Records every call and fails for identifiers in `gone`, the way AWS
/// reports not-found for an already-deleted resource.
#[derive(Default)]
struct RecordingDeleter {
    calls: Vec<(ResourceKind, String, String)>,
    gone: HashSet<(ResourceKind, String)>,
}

impl RecordingDeleter {
    fn outcome(&mut self, kind: ResourceKind, id: &str, region: &str) -> Result<(), String> {
        self.calls.push((kind, id.to_string(), region.to_string()));
        if self.gone.contains(&(kind, id.to_string())) {
            Err(format!("{kind} not found: {id}"))
        } else {
            self.gone.insert((kind, id.to_string()));
            Ok(())
        }
    }
}

impl ResourceDeleter for RecordingDeleter {
    async fn delete_stack(&mut self, name: &str, region: &str) -> Result<(), String> {
        self.outcome(ResourceKind::Stack, name, region)
    }

    async fn empty_and_delete_bucket(&mut self, name: &str) -> Result<(), String> {
        self.outcome(ResourceKind::S3Bucket, name, "")
    }

    async fn delete_function(&mut self, name: &str, region: &str) -> Result<(), String> {
        self.outcome(ResourceKind::Lambda, name, region)
    }

    async fn delete_rest_api(&mut self, api_id: &str, region: &str) -> Result<(), String> {
        self.outcome(ResourceKind::ApiGateway, api_id, region)
    }

    async fn delete_table(&mut self, name: &str, region: &str) -> Result<(), String> {
        self.outcome(ResourceKind::Dynamodb, name, region)
    }
}

fn sample_report() -> Report {
    Report {
        stacks: vec![StackFinding {
            name: "serverless-app-dev".to_string(),
            creation_time: "2025-01-01T00:00:00Z".to_string(),
            status: "CREATE_COMPLETE".to_string(),
            last_updated: None,
            description: String::new(),
            tags: vec![],
            region: "eu-west-1".to_string(),
        }],
        lambdas: vec![LambdaFinding {
            name: "my-bucket".to_string(),
            runtime: "nodejs20.x".to_string(),
            creation_time: "2025-01-01T00:00:00.000+0000".to_string(),
            description: String::new(),
            memory: 128,
            timeout: 3,
            region: "us-east-2".to_string(),
        }],
        s3_buckets: vec![BucketFinding {
            name: "my-bucket".to_string(),
            creation_time: "2025-01-01T00:00:00Z".to_string(),
        }],
        ..Report::default()
    }
}

#[tokio::test]
async fn collision_identifier_triggers_one_attempt_per_kind() {
    let report = sample_report();
    let targets = cleanup::match_targets(&report, &["my-bucket".to_string()]);

    let mut deleter = RecordingDeleter::default();
    let results = cleanup::run_cleanup(&mut deleter, &targets).await;

    assert_eq!(deleter.calls.len(), 2);
    assert_eq!(deleter.calls[0].0, ResourceKind::S3Bucket);
    assert_eq!(deleter.calls[1].0, ResourceKind::Lambda);
    assert_eq!(deleter.calls[1].2, "us-east-2");
    assert_eq!(results.succeeded.len(), 2);
    assert!(results.failed.is_empty());
}

#[tokio::test]
async fn second_pass_reports_failure_not_success() {
    let report = sample_report();
    let targets = cleanup::match_targets(&report, &["serverless-app-dev".to_string()]);

    let mut deleter = RecordingDeleter::default();
    let first = cleanup::run_cleanup(&mut deleter, &targets).await;
    assert_eq!(
        first.succeeded,
        vec![(ResourceKind::Stack, "serverless-app-dev".to_string())]
    );

    let second = cleanup::run_cleanup(&mut deleter, &targets).await;
    assert!(second.succeeded.is_empty());
    assert_eq!(
        second.failed,
        vec![(ResourceKind::Stack, "serverless-app-dev".to_string())]
    );
}

#[tokio::test]
async fn one_failure_does_not_stop_the_rest() {
    let targets = vec![
        CleanupTarget {
            kind: ResourceKind::Lambda,
            id: "already-gone".to_string(),
            region: "us-east-1".to_string(),
        },
        CleanupTarget {
            kind: ResourceKind::Dynamodb,
            id: "serverless-sessions".to_string(),
            region: "us-east-1".to_string(),
        },
    ];

    let mut deleter = RecordingDeleter {
        gone: HashSet::from([(ResourceKind::Lambda, "already-gone".to_string())]),
        ..RecordingDeleter::default()
    };
    let results = cleanup::run_cleanup(&mut deleter, &targets).await;

    assert_eq!(deleter.calls.len(), 2);
    assert_eq!(
        results.failed,
        vec![(ResourceKind::Lambda, "already-gone".to_string())]
    );
    assert_eq!(
        results.succeeded,
        vec![(ResourceKind::Dynamodb, "serverless-sessions".to_string())]
    );
}

#[tokio::test]
async fn report_with_missing_keys_matches_without_panicking() {
    let report: Report = serde_json::from_str(r#"{"stacks": []}"#).expect("parse partial report");
    let targets = cleanup::match_targets(&report, &["anything".to_string()]);

    let mut deleter = RecordingDeleter::default();
    let results = cleanup::run_cleanup(&mut deleter, &targets).await;

    assert!(deleter.calls.is_empty());
    assert!(results.succeeded.is_empty());
    assert!(results.failed.is_empty());
}
