use std::path::PathBuf;
use std::process::ExitCode;

use petition_tracker_core::errors::TrackerError;
use petition_tracker_core::models::settings::Settings;
use petition_tracker_core::providers::provider_from_settings;
use petition_tracker_core::PetitionTracker;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const CHART_FILE: &str = "chart.json";
const LIST_FILE: &str = "country-list.html";
const TOP_MOVERS: usize = 5;

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let provider = provider_from_settings(&settings);
    let Some(tracker) = PetitionTracker::fetch_or_log(provider.as_ref(), settings).await else {
        return ExitCode::FAILURE;
    };

    match write_outputs(&tracker, &out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, dir = %out_dir.display(), "failed to write output");
            ExitCode::FAILURE
        }
    }
}

fn write_outputs(
    tracker: &PetitionTracker,
    out_dir: &std::path::Path,
) -> Result<(), TrackerError> {
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(out_dir.join(CHART_FILE), tracker.chart_json()?)?;

    let report = tracker.comparison()?;
    std::fs::write(
        out_dir.join(LIST_FILE),
        petition_tracker_core::services::report_service::render_country_list(&report),
    )?;

    info!(
        date = %report.reference_date(),
        total_since_yesterday = report.totals.increase_from_yesterday,
        total_since_last_week = report.totals.increase_from_last_week,
        "wrote {} and {}",
        CHART_FILE,
        LIST_FILE
    );
    for row in report.rows.iter().take(TOP_MOVERS) {
        info!(
            country = %row.country_name,
            since_yesterday = row.increase_from_yesterday,
            rate_change = %format!("{:.2}%", row.rate_change_from_yesterday),
            "top mover"
        );
    }

    Ok(())
}
