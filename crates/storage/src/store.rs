//! Generic In-Memory Entity Store

use crate::entity::{Entity, EntityId};
use crate::StorageError;
use data_validator::{FieldViolation, ValidationReport};
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Default page size for `list`
pub const DEFAULT_LIMIT: usize = 10;

/// Window over the filtered, insertion-ordered records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

struct Records<T> {
    by_id: HashMap<EntityId, T>,
    /// Insertion order of the ids in `by_id`
    order: Vec<EntityId>,
}

/// Store for one entity kind, keyed by unique id
pub struct EntityStore<T: Entity> {
    records: RwLock<Records<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Create a store holding `records`, subject to the same checks as `create`
    pub fn with_records(records: Vec<T>) -> Result<Self, StorageError> {
        let store = Self::new();
        if !records.is_empty() {
            store.create(records)?;
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records<T>>, StorageError> {
        self.records
            .read()
            .map_err(|e| StorageError::Lock(format!("{} store: {}", T::RESOURCE, e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records<T>>, StorageError> {
        self.records
            .write()
            .map_err(|e| StorageError::Lock(format!("{} store: {}", T::RESOURCE, e)))
    }

    /// Records matching `filter`, in insertion order, windowed by `page`
    pub fn list(&self, filter: &T::Filter, page: Page) -> Result<Vec<T>, StorageError> {
        let records = self.read()?;

        let found: Vec<T> = records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id))
            .filter(|record| record.matches(filter))
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect();

        debug!(
            "Listed {} {} with {:?} at {:?}",
            found.len(),
            T::RESOURCE,
            filter,
            page
        );
        Ok(found)
    }

    /// Look up a single record
    pub fn get(&self, id: EntityId) -> Result<Option<T>, StorageError> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    /// Insert a batch of new records, all or nothing
    ///
    /// Fails if any candidate is invalid, its id is already stored, or the
    /// same id appears twice in the batch. Returns the inserted records.
    pub fn create(&self, batch: Vec<T>) -> Result<Vec<T>, StorageError> {
        if batch.is_empty() {
            let violation = FieldViolation::new(
                Vec::new(),
                "too_short",
                "List should have at least 1 item after validation, not 0",
            );
            return Err(StorageError::Validation {
                kind: T::KIND,
                report: ValidationReport::single(violation),
            });
        }
        ValidationReport::check_batch(&batch)
            .map_err(|report| StorageError::Validation { kind: T::KIND, report })?;

        let mut records = self.write()?;

        let mut seen = HashSet::with_capacity(batch.len());
        for candidate in &batch {
            let id = candidate.id();
            if records.by_id.contains_key(&id) || !seen.insert(id) {
                warn!("Rejected {} batch: duplicate id {}", T::RESOURCE, id);
                return Err(StorageError::DuplicateIdentifier { kind: T::KIND, id });
            }
        }

        for candidate in &batch {
            records.order.push(candidate.id());
            records.by_id.insert(candidate.id(), candidate.clone());
        }

        info!("Created {} {}", batch.len(), T::RESOURCE);
        Ok(batch)
    }

    /// Overwrite every field of the stored record with the same id
    pub fn update(&self, entity: T) -> Result<T, StorageError> {
        ValidationReport::check(&entity)
            .map_err(|report| StorageError::Validation { kind: T::KIND, report })?;

        let mut records = self.write()?;
        let id = entity.id();
        let slot = records
            .by_id
            .get_mut(&id)
            .ok_or(StorageError::NotFound { kind: T::KIND, id })?;
        *slot = entity.clone();

        info!("Updated {} with id {}", T::KIND, id);
        Ok(entity)
    }

    /// Remove the record with `id`, returning it
    pub fn delete(&self, id: EntityId) -> Result<T, StorageError> {
        let mut records = self.write()?;
        let removed = records
            .by_id
            .remove(&id)
            .ok_or(StorageError::NotFound { kind: T::KIND, id })?;
        records.order.retain(|stored| *stored != id);

        info!("Deleted {} with id {}", T::KIND, id);
        Ok(removed)
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.order.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
