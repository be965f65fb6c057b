//! The `formgrade publish` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use formgrade_store::config::load_config_from;
use formgrade_store::FormStore;

pub async fn execute(form_id: String, published: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = config.open_store();

    let form = store
        .set_published(&form_id, published)
        .await
        .with_context(|| format!("failed to update form '{form_id}'"))?;

    if form.is_published {
        println!("Published '{}' (share id: {})", form.title, form.share_id);
    } else {
        println!("Unpublished '{}'", form.title);
    }

    Ok(())
}
