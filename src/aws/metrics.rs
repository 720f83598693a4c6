use aws_sdk_cloudwatch::types::{Dimension, Statistic};
use aws_smithy_types::DateTime;
use aws_smithy_types::error::display::DisplayErrorContext;
use time::{Duration, OffsetDateTime};

const DAY_SECS: i32 = 86_400;

/// Sum of the `AWS/Lambda Invocations` metric for one function over the last
/// `monitor_days`. Returns `None` when the query fails or the window cannot
/// be computed; the classifier treats `None` as "not idle".
pub async fn summed_invocations(
    client: &aws_sdk_cloudwatch::Client,
    function_name: &str,
    monitor_days: u64,
    now: OffsetDateTime,
) -> Option<f64> {
    let days = i64::try_from(monitor_days).ok()?;
    let start = now.checked_sub(Duration::days(days))?;

    let resp = client
        .get_metric_statistics()
        .namespace("AWS/Lambda")
        .metric_name("Invocations")
        .dimensions(
            Dimension::builder()
                .name("FunctionName")
                .value(function_name)
                .build(),
        )
        .start_time(DateTime::from_secs(start.unix_timestamp()))
        .end_time(DateTime::from_secs(now.unix_timestamp()))
        .period(DAY_SECS)
        .statistics(Statistic::Sum)
        .send()
        .await;

    match resp {
        Ok(out) => Some(out.datapoints().iter().filter_map(|d| d.sum()).sum()),
        Err(err) => {
            tracing::warn!(
                function = %function_name,
                error = %DisplayErrorContext(&err),
                "Invocations metric query failed; function excluded from findings"
            );
            None
        }
    }
}
