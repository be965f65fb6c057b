//! formgrade-store: Form/response storage and the submission service.
//!
//! Implements the `FormStore` trait over memory and JSON files, and the
//! service that scores submissions against stored forms.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod service;
pub mod store;

pub use config::{load_config, load_config_from, FormgradeConfig};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use service::{Submission, SubmissionService, TestScoring};
pub use store::FormStore;
