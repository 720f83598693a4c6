use std::io::{self, Write};
use std::path::Path;

use anyhow::Error;

use crate::cleanup::{CleanupResults, CleanupTarget};
use crate::core::{Report, Thresholds};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "next:");
    let _ = writeln!(stderr, "  - re-run with `--verbose` for more detail");
    let _ = writeln!(stderr, "  - see `awsweep --help` for commands and options");
}

pub fn print_discovery_summary(
    report: &Report,
    thresholds: &Thresholds,
    path: &Path,
    cfg: &UiConfig,
) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(out, "Discovery complete! Report saved to: {}", path.display());
    let _ = writeln!(out);
    let _ = writeln!(out, "Resource Discovery Summary:");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "CloudFormation Stacks: {}", report.stacks.len());
    let _ = writeln!(out, "Lambda Functions: {}", report.lambdas.len());
    let _ = writeln!(out, "S3 Buckets: {}", report.s3_buckets.len());
    let _ = writeln!(out, "API Gateways: {}", report.api_gateways.len());
    let _ = writeln!(out, "DynamoDB Tables: {}", report.dynamodb_tables.len());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Thresholds: older than {}d, at most {} invocations over {}d",
        thresholds.age_days, thresholds.invoke_threshold, thresholds.monitor_days
    );
}

pub fn print_cleanup_results(results: &CleanupResults, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(out, "Cleanup Results:");
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out);
    let _ = writeln!(out, "Successfully deleted:");
    for (kind, id) in &results.succeeded {
        let _ = writeln!(out, "- {kind}: {id}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Failed to delete:");
    for (kind, id) in &results.failed {
        let _ = writeln!(out, "- {kind}: {id}");
    }
}

pub fn print_dry_run(targets: &[CleanupTarget], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    if targets.is_empty() {
        let _ = writeln!(out, "dry-run: no report entries match the given identifiers");
        return;
    }
    let _ = writeln!(out, "dry-run: would attempt the following deletions:");
    for target in targets {
        if target.region.is_empty() {
            let _ = writeln!(out, "- {}: {}", target.kind, target.id);
        } else {
            let _ = writeln!(out, "- {}: {} ({})", target.kind, target.id, target.region);
        }
    }
}
