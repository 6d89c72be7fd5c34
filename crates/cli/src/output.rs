use crate::error::CliError;
use engine_core::{metrics::MetricsSnapshot, report::TransferOutcome};
use model::transfer::watermark::Watermark;
use serde_json::json;

pub fn print_outcome(
    outcome: &TransferOutcome,
    metrics: &MetricsSnapshot,
    as_json: bool,
) -> Result<(), CliError> {
    if as_json {
        let doc = json!({ "outcome": outcome, "metrics": metrics });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", render_outcome(outcome));
    }
    Ok(())
}

pub fn print_watermark(watermark: Option<&Watermark>, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&json!({ "watermark": watermark }))?);
    } else {
        match watermark {
            Some(w) => println!("{:<16} {}\n{:<16} {}", "Mode", w.mode, "Start", w.start),
            None => println!("Nothing to transfer"),
        }
    }
    Ok(())
}

fn render_outcome(outcome: &TransferOutcome) -> String {
    let Some(report) = outcome.report() else {
        return "Nothing to transfer".to_string();
    };

    let mut lines = vec![
        format!("Transfer {}", if report.truncated { "stopped at max_windows" } else { "completed" }),
        "-----------------------------".to_string(),
    ];
    lines.push(format!("{:<16} {}", "Mode", report.mode));
    lines.push(format!("{:<16} {}", "Start", report.start));
    lines.push(format!("{:<16} {}", "Windows loaded", report.windows_loaded));
    lines.push(format!("{:<16} {}", "Rows loaded", report.rows_loaded));
    lines.push(format!("{:<16} {}", "Stopped at", report.last_window_end));
    lines.push(format!("{:<16} {} ms", "Elapsed", report.elapsed_ms));
    lines.join("\n")
}
