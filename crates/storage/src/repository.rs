//! Repository Implementation

use crate::entity::Entity;
use crate::fixtures;
use crate::models::{Category, Habit, User};
use crate::store::EntityStore;
use crate::StorageError;
use tracing::info;

/// Owns one store per entity kind
pub struct Repository {
    users: EntityStore<User>,
    categories: EntityStore<Category>,
    habits: EntityStore<Habit>,
}

impl Repository {
    /// Create a repository with empty stores
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            users: EntityStore::new(),
            categories: EntityStore::new(),
            habits: EntityStore::new(),
        }
    }

    /// Create a repository loaded with the seed records
    pub fn seeded() -> Result<Self, StorageError> {
        let repository = Self {
            users: EntityStore::with_records(fixtures::users())?,
            categories: EntityStore::with_records(fixtures::categories())?,
            habits: EntityStore::with_records(fixtures::habits())?,
        };
        info!(
            "Seeded repository with {} users, {} categories, {} habits",
            repository.users.len()?,
            repository.categories.len()?,
            repository.habits.len()?
        );
        Ok(repository)
    }

    pub fn users(&self) -> &EntityStore<User> {
        &self.users
    }

    pub fn categories(&self) -> &EntityStore<Category> {
        &self.categories
    }

    pub fn habits(&self) -> &EntityStore<Habit> {
        &self.habits
    }

    /// The store for entity kind `T`
    pub fn store<T: Collection>(&self) -> &EntityStore<T> {
        T::collection(self)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity kinds held by a [`Repository`]
pub trait Collection: Entity {
    fn collection(repository: &Repository) -> &EntityStore<Self>;
}

impl Collection for User {
    fn collection(repository: &Repository) -> &EntityStore<Self> {
        repository.users()
    }
}

impl Collection for Category {
    fn collection(repository: &Repository) -> &EntityStore<Self> {
        repository.categories()
    }
}

impl Collection for Habit {
    fn collection(repository: &Repository) -> &EntityStore<Self> {
        repository.habits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryFilter, HabitFilter};
    use crate::store::Page;

    #[test]
    fn test_seeded_counts() {
        let repo = Repository::seeded().unwrap();
        assert_eq!(repo.users().len().unwrap(), 3);
        assert_eq!(repo.categories().len().unwrap(), 3);
        assert_eq!(repo.habits().len().unwrap(), 4);
    }

    #[test]
    fn test_new_is_empty() {
        let repo = Repository::new();
        assert!(repo.users().is_empty().unwrap());
        assert!(repo.categories().is_empty().unwrap());
        assert!(repo.habits().is_empty().unwrap());
    }

    #[test]
    fn test_store_dispatch() {
        let repo = Repository::seeded().unwrap();
        let found = repo
            .store::<Category>()
            .list(&CategoryFilter { id: Some(2) }, Page::default())
            .unwrap();
        assert_eq!(found[0].name, "health");
        assert_eq!(found[0].emoji, "💰");
    }

    #[test]
    fn test_habits_reference_unknown_user() {
        let repo = Repository::seeded().unwrap();
        let orphan = Habit {
            id: 10,
            user_id: 999,
            category_id: 999,
            name: "orphan".to_string(),
        };
        repo.habits().create(vec![orphan]).unwrap();

        let found = repo
            .habits()
            .list(
                &HabitFilter {
                    user_id: Some(999),
                    ..Default::default()
                },
                Page::default(),
            )
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_seeded_habits_by_user() {
        let repo = Repository::seeded().unwrap();
        let names: Vec<_> = repo
            .habits()
            .list(
                &HabitFilter {
                    user_id: Some(3),
                    ..Default::default()
                },
                Page::default(),
            )
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["save money", "earn money"]);
    }
}
