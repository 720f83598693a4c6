use awsweep::core::{
    ApiGatewayFinding, BucketFinding, LambdaFinding, Report, StackFinding, StackTag, TableFinding,
};

fn sample_report() -> Report {
    Report {
        stacks: vec![StackFinding {
            name: "my-serverless-app-dev".to_string(),
            creation_time: "2025-11-01T08:30:00Z".to_string(),
            status: "CREATE_COMPLETE".to_string(),
            last_updated: None,
            description: "dev stack".to_string(),
            tags: vec![StackTag {
                key: "STAGE".to_string(),
                value: "dev".to_string(),
            }],
            region: "us-east-1".to_string(),
        }],
        lambdas: vec![LambdaFinding {
            name: "my-serverless-app-dev-hello".to_string(),
            runtime: "python3.12".to_string(),
            creation_time: "2025-11-01T08:31:12.000+0000".to_string(),
            description: String::new(),
            memory: 128,
            timeout: 6,
            region: "us-east-1".to_string(),
        }],
        s3_buckets: vec![BucketFinding {
            name: "my-serverless-app-dev-deploymentbucket".to_string(),
            creation_time: "2025-11-01T08:29:41Z".to_string(),
        }],
        api_gateways: vec![ApiGatewayFinding {
            id: "a1b2c3d4e5".to_string(),
            name: "dev-my-serverless-app".to_string(),
            creation_time: "2025-11-01T08:31:40Z".to_string(),
            description: String::new(),
            region: "us-east-1".to_string(),
        }],
        dynamodb_tables: vec![TableFinding {
            name: "my-serverless-app-dev-sessions".to_string(),
            creation_time: "2025-11-01T08:30:55Z".to_string(),
            status: "ACTIVE".to_string(),
            size_bytes: 1024,
            item_count: 3,
            region: "us-east-1".to_string(),
        }],
    }
}

#[test]
fn report_json_matches_golden() {
    let actual = serde_json::to_value(sample_report()).expect("serialize report");
    let expected: serde_json::Value =
        serde_json::from_str(include_str!("golden/report.json")).expect("parse golden json");

    assert_eq!(actual, expected);
}

// Identifiers must cross the discovery/cleanup boundary byte-for-byte.
#[test]
fn report_round_trip_preserves_identifiers() {
    let report = sample_report();
    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    let back: Report = serde_json::from_str(&json).expect("parse report");

    assert_eq!(back, report);
    assert_eq!(back.stacks[0].name, "my-serverless-app-dev");
    assert_eq!(back.api_gateways[0].id, "a1b2c3d4e5");
    assert_eq!(
        back.lambdas[0].creation_time,
        "2025-11-01T08:31:12.000+0000"
    );
}
