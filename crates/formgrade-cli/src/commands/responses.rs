//! The `formgrade responses` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;

use formgrade_core::model::Response;
use formgrade_core::statistics::{summarize_responses, ResponseSummary};
use formgrade_store::config::load_config_from;
use formgrade_store::FormStore;

pub async fn execute(form_id: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = config.open_store();

    let responses = store
        .list_responses(&form_id)
        .await
        .with_context(|| format!("failed to list responses for '{form_id}'"))?;
    let summary = summarize_responses(&responses);

    match format.as_str() {
        "json" => {
            let output = json!({ "responses": responses, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            if responses.is_empty() {
                println!("No responses for '{form_id}'.");
                return Ok(());
            }
            print_responses(&responses);
            print_summary(&summary);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_responses(responses: &[Response]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Response", "Respondent", "Score", "%", "Submitted"]);

    for r in responses {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(r.respondent()),
            Cell::new(format!("{}/{}", r.score, r.max_score)),
            Cell::new(format!("{}%", r.score_percentage())),
            Cell::new(r.submitted_at.format("%Y-%m-%d %H:%M:%S")),
        ]);
    }

    println!("{table}");
}

fn print_summary(summary: &ResponseSummary) {
    println!(
        "\n{} response(s): {} signed in, {} anonymous",
        summary.count, summary.authenticated, summary.anonymous
    );
    println!(
        "Mean {:.1}%, best {}%, worst {}%, {} perfect",
        summary.mean_percentage,
        summary.best_percentage,
        summary.worst_percentage,
        summary.perfect_scores
    );
}
