//! The storage trait the submission service is written against.

use async_trait::async_trait;

use formgrade_core::model::{Form, Response};

use crate::error::StoreResult;

/// Persistence for forms and their responses.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Fetch a form by identifier. `Ok(None)` when it doesn't exist.
    async fn get_form(&self, id: &str) -> StoreResult<Option<Form>>;

    /// Fetch a *published* form by its share identifier.
    async fn get_form_by_share_id(&self, share_id: &str) -> StoreResult<Option<Form>>;

    /// Insert or replace a form.
    async fn save_form(&self, form: &Form) -> StoreResult<()>;

    /// Toggle publishing; returns the updated form.
    async fn set_published(&self, id: &str, published: bool) -> StoreResult<Form>;

    /// Persist a response as a single write.
    async fn save_response(&self, response: &Response) -> StoreResult<()>;

    /// All responses for a form, newest first.
    async fn list_responses(&self, form_id: &str) -> StoreResult<Vec<Response>>;
}
