//! The `formgrade score` command.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use formgrade_core::answer::sanitize_answers;
use formgrade_core::engine::score_questions;
use formgrade_core::observer::{NoopObserver, ScoreObserver, TracingObserver};
use formgrade_core::parser;
use formgrade_core::results::{Outcome, ScoreBreakdown};

pub fn execute(form_path: PathBuf, answers_path: PathBuf, explain: bool, format: String) -> Result<()> {
    let form = parser::parse_form(&form_path)?;
    let raw = super::read_answers(&answers_path)?;
    let answers = sanitize_answers(&raw);

    let observer: &dyn ScoreObserver = if explain { &TracingObserver } else { &NoopObserver };
    let breakdown = score_questions(&form.questions, &answers, observer);
    let total = breakdown.total();

    match format.as_str() {
        "json" => {
            let output = if explain {
                json!({ "result": total, "breakdown": breakdown })
            } else {
                serde_json::to_value(total)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            println!("Form: {}", form.title);
            println!(
                "Score: {}/{} ({}%)",
                total.score,
                total.max_score,
                total.percentage()
            );
            if explain {
                print_breakdown(&breakdown);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Type", "Score", "Correct", "Missed", "Unanswered"]);

    for q in &breakdown.questions {
        let count = |outcome: Outcome| q.items.iter().filter(|i| i.outcome == outcome).count();
        table.add_row(vec![
            Cell::new(&q.question_id),
            Cell::new(q.kind.as_str()),
            Cell::new(format!("{}/{}", q.score, q.max_score)),
            Cell::new(count(Outcome::Correct)),
            Cell::new(count(Outcome::Incorrect) + count(Outcome::NoKey)),
            Cell::new(count(Outcome::Unanswered)),
        ]);
    }

    println!("\n{table}");

    for skipped in &breakdown.skipped {
        println!(
            "Skipped [{}] ({}): {:?}",
            skipped.question_id, skipped.kind, skipped.reason
        );
    }
}
