//! Storage Layer
//!
//! In-memory entity stores with repository pattern.

mod entity;
mod fixtures;
mod models;
mod repository;
mod store;

pub use entity::{Entity, EntityId};
pub use models::{Category, CategoryFilter, Habit, HabitFilter, User, UserFilter};
pub use repository::{Collection, Repository};
pub use store::{EntityStore, Page};

use data_validator::ValidationReport;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{kind} with id {id} already exists")]
    DuplicateIdentifier { kind: &'static str, id: EntityId },
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: EntityId },
    #[error("Invalid {kind}: {report}")]
    Validation {
        kind: &'static str,
        report: ValidationReport,
    },
    #[error("Lock error: {0}")]
    Lock(String),
}
