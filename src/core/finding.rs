use serde::{Deserialize, Serialize};

/// One CloudFormation stack classified as orphaned.
///
/// `region` is absent from reports written by older tooling, so every
/// region-scoped finding defaults it to the empty string; cleanup falls back
/// to the ambient AWS region in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackFinding {
    pub name: String,
    pub creation_time: String,
    pub status: String,
    pub last_updated: Option<String>,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<StackTag>,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaFinding {
    pub name: String,
    pub runtime: String,
    pub creation_time: String,
    pub description: String,
    pub memory: i32,
    pub timeout: i32,
    #[serde(default)]
    pub region: String,
}

/// The bucket listing is global, so buckets carry no region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketFinding {
    pub name: String,
    pub creation_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiGatewayFinding {
    pub id: String,
    pub name: String,
    pub creation_time: String,
    pub description: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFinding {
    pub name: String,
    pub creation_time: String,
    pub status: String,
    pub size_bytes: i64,
    pub item_count: i64,
    #[serde(default)]
    pub region: String,
}
