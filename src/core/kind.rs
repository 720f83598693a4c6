use std::fmt;

use serde::{Deserialize, Serialize};

/// The five resource kinds a report can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Stack,
    Lambda,
    S3Bucket,
    ApiGateway,
    Dynamodb,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Stack => "stack",
            ResourceKind::Lambda => "lambda",
            ResourceKind::S3Bucket => "s3_bucket",
            ResourceKind::ApiGateway => "api_gateway",
            ResourceKind::Dynamodb => "dynamodb",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
