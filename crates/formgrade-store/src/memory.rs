//! In-memory store for tests and previews.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use formgrade_core::model::{Form, Response};

use crate::error::{StoreError, StoreResult};
use crate::store::FormStore;

/// A `FormStore` backed by hash maps.
#[derive(Default)]
pub struct MemoryStore {
    forms: RwLock<HashMap<String, Form>>,
    responses: RwLock<HashMap<String, Vec<Response>>>,
    /// When set, every form lookup fails with an I/O error.
    fail_reads: bool,
    /// Number of form lookups made.
    form_reads: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with forms.
    pub fn with_forms(forms: impl IntoIterator<Item = Form>) -> Self {
        let forms = forms.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self {
            forms: RwLock::new(forms),
            ..Self::default()
        }
    }

    /// A store whose form lookups always fail, for exercising fail-soft paths.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Get the number of form lookups made against this store.
    pub fn form_reads(&self) -> u32 {
        self.form_reads.load(Ordering::Relaxed)
    }

    fn check_reads(&self) -> StoreResult<()> {
        self.form_reads.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads {
            return Err(StoreError::Io(std::io::Error::other("simulated read failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn get_form(&self, id: &str) -> StoreResult<Option<Form>> {
        self.check_reads()?;
        Ok(self.forms.read().await.get(id).cloned())
    }

    async fn get_form_by_share_id(&self, share_id: &str) -> StoreResult<Option<Form>> {
        self.check_reads()?;
        Ok(self
            .forms
            .read()
            .await
            .values()
            .find(|f| f.share_id == share_id && f.is_published)
            .cloned())
    }

    async fn save_form(&self, form: &Form) -> StoreResult<()> {
        self.forms
            .write()
            .await
            .insert(form.id.clone(), form.clone());
        Ok(())
    }

    async fn set_published(&self, id: &str, published: bool) -> StoreResult<Form> {
        let mut forms = self.forms.write().await;
        let form = forms
            .get_mut(id)
            .ok_or_else(|| StoreError::FormNotFound(id.to_string()))?;
        form.is_published = published;
        form.updated_at = chrono::Utc::now();
        Ok(form.clone())
    }

    async fn save_response(&self, response: &Response) -> StoreResult<()> {
        self.responses
            .write()
            .await
            .entry(response.form_id.clone())
            .or_default()
            .push(response.clone());
        Ok(())
    }

    async fn list_responses(&self, form_id: &str) -> StoreResult<Vec<Response>> {
        let mut responses = self
            .responses
            .read()
            .await
            .get(form_id)
            .cloned()
            .unwrap_or_default();
        responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(responses)
    }
}
