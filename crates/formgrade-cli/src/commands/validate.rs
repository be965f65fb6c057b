//! The `formgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use formgrade_core::parser;

pub fn execute(form_path: PathBuf) -> Result<()> {
    let forms = if form_path.is_dir() {
        parser::load_form_directory(&form_path)?
    } else {
        vec![parser::parse_form(&form_path)?]
    };

    let mut total_warnings = 0;

    for form in &forms {
        println!("Form: {} ({} questions)", form.title, form.questions.len());

        let warnings = parser::validate_form(form);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All forms valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
