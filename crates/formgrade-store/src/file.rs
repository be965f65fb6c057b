//! JSON-file store.
//!
//! Layout under the root directory:
//!
//! ```text
//! forms/<form-id>.json
//! responses/<form-id>/<response-id>.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use formgrade_core::model::{Form, Response};

use crate::error::{StoreError, StoreResult};
use crate::store::FormStore;

/// A `FormStore` that keeps one pretty-printed JSON document per record.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn forms_dir(&self) -> PathBuf {
        self.root.join("forms")
    }

    fn form_path(&self, id: &str) -> StoreResult<PathBuf> {
        Ok(self.forms_dir().join(format!("{}.json", checked_id(id)?)))
    }

    fn responses_dir(&self, form_id: &str) -> StoreResult<PathBuf> {
        Ok(self.root.join("responses").join(checked_id(form_id)?))
    }

    async fn read_form(&self, path: &Path) -> StoreResult<Option<Form>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn json_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Identifiers become file names, so they must not escape their directory.
fn checked_id(id: &str) -> StoreResult<&str> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if invalid {
        Err(StoreError::InvalidId(id.to_string()))
    } else {
        Ok(id)
    }
}

/// Write through a temporary sibling and rename so readers never see a
/// partially written document.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl FormStore for FileStore {
    async fn get_form(&self, id: &str) -> StoreResult<Option<Form>> {
        let path = self.form_path(id)?;
        self.read_form(&path).await
    }

    async fn get_form_by_share_id(&self, share_id: &str) -> StoreResult<Option<Form>> {
        for path in Self::json_files(&self.forms_dir()).await? {
            match self.read_form(&path).await {
                Ok(Some(form)) if form.share_id == share_id && form.is_published => {
                    return Ok(Some(form));
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }
        Ok(None)
    }

    async fn save_form(&self, form: &Form) -> StoreResult<()> {
        write_json(&self.form_path(&form.id)?, form).await
    }

    async fn set_published(&self, id: &str, published: bool) -> StoreResult<Form> {
        let path = self.form_path(id)?;
        let mut form = self
            .read_form(&path)
            .await?
            .ok_or_else(|| StoreError::FormNotFound(id.to_string()))?;
        form.is_published = published;
        form.updated_at = chrono::Utc::now();
        write_json(&path, &form).await?;
        Ok(form)
    }

    async fn save_response(&self, response: &Response) -> StoreResult<()> {
        let path = self
            .responses_dir(&response.form_id)?
            .join(format!("{}.json", response.id));
        write_json(&path, response).await
    }

    async fn list_responses(&self, form_id: &str) -> StoreResult<Vec<Response>> {
        let mut responses = Vec::new();
        for path in Self::json_files(&self.responses_dir(form_id)?).await? {
            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<Response>(&content) {
                Ok(response) => responses.push(response),
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }
        responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn response(form_id: &str, minutes_ago: i64) -> Response {
        Response {
            id: Uuid::new_v4(),
            form_id: form_id.into(),
            user_id: None,
            answers: vec![],
            score: 1,
            max_score: 2,
            submitted_at: Utc::now() - Duration::minutes(minutes_ago),
            ip_address: None,
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn form_roundtrip_and_publish() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let form = Form::new("quiz", "Quiz", vec![]);

        assert!(store.get_form("quiz").await.unwrap().is_none());
        store.save_form(&form).await.unwrap();
        assert_eq!(store.get_form("quiz").await.unwrap().unwrap().title, "Quiz");
        assert!(dir.path().join("forms/quiz.json").exists());

        assert!(store
            .get_form_by_share_id(&form.share_id)
            .await
            .unwrap()
            .is_none());
        store.set_published("quiz", true).await.unwrap();
        let shared = store.get_form_by_share_id(&form.share_id).await.unwrap();
        assert_eq!(shared.map(|f| f.id), Some("quiz".to_string()));
    }

    #[tokio::test]
    async fn responses_are_listed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let older = response("quiz", 10);
        let newer = response("quiz", 1);
        store.save_response(&older).await.unwrap();
        store.save_response(&newer).await.unwrap();
        store.save_response(&response("other", 0)).await.unwrap();

        let listed = store.list_responses("quiz").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
        assert!(store.list_responses("none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_response_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save_response(&response("quiz", 0)).await.unwrap();
        std::fs::write(dir.path().join("responses/quiz/broken.json"), "{").unwrap();

        assert_eq!(store.list_responses("quiz").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for id in ["", "..", "a/b", "a\\b"] {
            let err = store.get_form(id).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidId(_)), "{id:?}: {err}");
        }
    }

    #[tokio::test]
    async fn publish_missing_form_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store
            .set_published("ghost", true)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
