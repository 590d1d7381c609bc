//! Entity Contract

use data_validator::Validate;
use std::fmt::Debug;

/// Unique integer identifier within one store
pub type EntityId = i64;

/// A record that can live in an [`EntityStore`](crate::EntityStore)
pub trait Entity: Clone + Debug + Validate + Send + Sync + 'static {
    /// Human readable kind, used in messages ("User")
    const KIND: &'static str;
    /// Resource name, used in routes and metrics ("users")
    const RESOURCE: &'static str;

    /// Equality filters accepted by `list`
    type Filter: Default + Debug;

    fn id(&self) -> EntityId;

    /// Whether every set field of `filter` matches this record
    fn matches(&self, filter: &Self::Filter) -> bool;
}
