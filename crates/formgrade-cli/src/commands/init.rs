//! The `formgrade init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("formgrade.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("formgrade-data/forms")?;
    write_if_missing(Path::new("formgrade-data/forms/example.json"), EXAMPLE_FORM)?;
    write_if_missing(Path::new("example-answers.json"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: formgrade validate --form formgrade-data/forms/example.json");
    println!(
        "  2. Run: formgrade score --form formgrade-data/forms/example.json --answers example-answers.json --explain"
    );
    println!("  3. Run: formgrade submit --form-id example --answers example-answers.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# formgrade configuration

# Where forms and responses are stored. ${VAR} references are expanded.
store_dir = "./formgrade-data"

# Log raw answer payloads at debug level (RUST_LOG=formgrade=debug).
log_answers = false
"#;

const EXAMPLE_FORM: &str = r#"{
  "id": "example",
  "title": "Example Quiz",
  "description": "One question of each scorable type",
  "questions": [
    {
      "id": "reading",
      "type": "comprehension",
      "title": "Read the passage",
      "required": true,
      "settings": {
        "passage": "The quick brown fox jumps over the lazy dog.",
        "questions": [
          {
            "question": "What colour is the fox?",
            "options": ["red", "grey", "brown"],
            "correctAnswer": 2,
            "score": 5
          }
        ]
      }
    },
    {
      "id": "fill-in",
      "type": "cloze",
      "title": "Fill in the blanks",
      "settings": {
        "text": "The quick ___ fox jumps over the ___ dog.",
        "blanks": ["brown", "lazy"],
        "correctAnswers": { "0": "brown", "1": "lazy" },
        "blankScores": { "0": 1, "1": 2 }
      }
    },
    {
      "id": "sorting",
      "type": "categorize",
      "title": "Sort the words",
      "settings": {
        "categories": ["Animals", "Colors"],
        "items": ["Dog", "Red"],
        "correctAnswers": { "0": 0, "1": 1 },
        "itemScores": { "0": 2, "1": 1 }
      }
    }
  ]
}
"#;

const EXAMPLE_ANSWERS: &str = r#"[
  { "questionId": "reading", "questionType": "comprehension", "answer": { "0": 2 } },
  { "questionId": "fill-in", "questionType": "cloze", "answer": { "0": "Brown", "1": "LAZY" } },
  { "questionId": "sorting", "questionType": "categorize", "answer": { "Animals": ["Dog"], "Colors": [] } }
]
"#;
