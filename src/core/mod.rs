mod finding;
mod kind;
mod report;
mod thresholds;

pub use finding::{
    ApiGatewayFinding, BucketFinding, LambdaFinding, StackFinding, StackTag, TableFinding,
};
pub use kind::ResourceKind;
pub use report::Report;
pub use thresholds::Thresholds;
