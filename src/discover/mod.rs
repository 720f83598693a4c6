//! Discovery: enumerate every kind across the configured regions, classify,
//! and persist exactly one report.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use time::OffsetDateTime;

use crate::aws::{self, RegionConfigs};
use crate::classify::OrphanCheck;
use crate::core::{Report, Thresholds};

#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    pub regions: Vec<String>,
    pub marker: String,
    pub thresholds: Thresholds,
    pub output_dir: PathBuf,
    pub show_progress: bool,
}

/// Runs one discovery pass and writes the report. A failure in one
/// (region, kind) unit is logged and contributes zero findings; only the
/// final report write can fail the run.
pub async fn run(opts: &DiscoverOptions) -> Result<(Report, PathBuf)> {
    let now = OffsetDateTime::now_utc();
    let check = OrphanCheck {
        marker: opts.marker.clone(),
        age_days: opts.thresholds.age_days,
        now,
    };

    let mut configs = RegionConfigs::new();
    let mut report = Report::default();

    for region in &opts.regions {
        let config = configs.get(region).await;

        let pb = spinner(opts.show_progress, &format!("CloudFormation stacks ({region})"));
        match aws::stacks::discover(&config, region, &check).await {
            Ok(mut found) => report.stacks.append(&mut found),
            Err(err) => unit_failed(region, "stacks", &err),
        }
        clear(pb);

        let pb = spinner(opts.show_progress, &format!("Lambda functions ({region})"));
        match aws::lambdas::discover(&config, region, &check, &opts.thresholds).await {
            Ok(mut found) => report.lambdas.append(&mut found),
            Err(err) => unit_failed(region, "lambdas", &err),
        }
        clear(pb);

        let pb = spinner(opts.show_progress, &format!("API gateways ({region})"));
        match aws::apigw::discover(&config, region, &check).await {
            Ok(mut found) => report.api_gateways.append(&mut found),
            Err(err) => unit_failed(region, "api_gateways", &err),
        }
        clear(pb);

        let pb = spinner(opts.show_progress, &format!("DynamoDB tables ({region})"));
        match aws::dynamodb::discover(&config, region, &check).await {
            Ok(mut found) => report.dynamodb_tables.append(&mut found),
            Err(err) => unit_failed(region, "dynamodb_tables", &err),
        }
        clear(pb);
    }

    // Buckets are listed globally, once.
    let pb = spinner(opts.show_progress, "S3 buckets (global)");
    let base = configs.base().await;
    match aws::s3::discover(&base, &check).await {
        Ok(mut found) => report.s3_buckets.append(&mut found),
        Err(err) => unit_failed("global", "s3_buckets", &err),
    }
    clear(pb);

    let path = report.save(&opts.output_dir, now)?;
    Ok((report, path))
}

fn unit_failed(region: &str, kind: &str, err: &anyhow::Error) {
    tracing::warn!(
        region = %region,
        kind = %kind,
        error = %format!("{err:#}"),
        "discovery unit failed; it contributes zero findings"
    );
}

fn spinner(show_progress: bool, what: &str) -> Option<indicatif::ProgressBar> {
    if !show_progress {
        return None;
    }
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    pb.set_message(format!("Scanning {what}..."));
    pb.enable_steady_tick(Duration::from_millis(120));
    Some(pb)
}

fn clear(pb: Option<indicatif::ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
