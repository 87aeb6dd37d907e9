//! Report files for a finished planning run

mod report;
mod summary;

pub use report::render_markdown;
pub use summary::{build_report, TripReport};

use crate::coordinator::PlanningOutcome;
use crate::error::OutputError;
use crate::trip::TripRequest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Write `<slug>-<fingerprint>.json` and `.md` into `report_dir`
pub fn write_outcome(
    report_dir: &Path,
    request: &TripRequest,
    outcome: &PlanningOutcome,
) -> Result<ReportPaths, OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let stem = format!("{}-{}", request.slug(), request.fingerprint());
    let report = build_report(request, outcome);

    let json_path = report_dir.join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join(format!("{}.md", stem));
    fs::write(&md_path, render_markdown(&report)).map_err(OutputError::WriteReport)?;

    info!("Wrote reports to {:?}", report_dir);
    Ok(ReportPaths {
        json: json_path,
        markdown: md_path,
    })
}
