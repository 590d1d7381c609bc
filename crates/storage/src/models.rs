//! Entity Models

use crate::entity::{Entity, EntityId};
use data_validator::{check_char_count, check_min, collect, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Application user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub age: i64,
}

/// Equality filters for users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<EntityId>,
}

impl Validate for User {
    fn validate(&self) -> Vec<ValidationError> {
        collect([check_min("id", self.id, 0), check_min("age", self.age, 0)])
    }
}

impl Entity for User {
    const KIND: &'static str = "User";
    const RESOURCE: &'static str = "users";
    type Filter = UserFilter;

    fn id(&self) -> EntityId {
        self.id
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.id.map_or(true, |id| self.id == id)
    }
}

/// Habit category, tagged with a single emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub emoji: String,
}

/// Equality filters for categories
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub id: Option<EntityId>,
}

impl Validate for Category {
    fn validate(&self) -> Vec<ValidationError> {
        collect([
            check_min("id", self.id, 0),
            check_char_count("emoji", &self.emoji, 1),
        ])
    }
}

impl Entity for Category {
    const KIND: &'static str = "Category";
    const RESOURCE: &'static str = "categories";
    type Filter = CategoryFilter;

    fn id(&self) -> EntityId {
        self.id
    }

    fn matches(&self, filter: &CategoryFilter) -> bool {
        filter.id.map_or(true, |id| self.id == id)
    }
}

/// A habit a user is training
///
/// `user_id` and `category_id` are not checked against the other stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: EntityId,
    pub user_id: EntityId,
    pub category_id: EntityId,
    pub name: String,
}

/// Equality filters for habits
#[derive(Debug, Clone, Default)]
pub struct HabitFilter {
    pub id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
}

impl Validate for Habit {
    fn validate(&self) -> Vec<ValidationError> {
        collect([
            check_min("id", self.id, 0),
            check_min("user_id", self.user_id, 0),
            check_min("category_id", self.category_id, 0),
        ])
    }
}

impl Entity for Habit {
    const KIND: &'static str = "Habit";
    const RESOURCE: &'static str = "habits";
    type Filter = HabitFilter;

    fn id(&self) -> EntityId {
        self.id
    }

    fn matches(&self, filter: &HabitFilter) -> bool {
        filter.id.map_or(true, |id| self.id == id)
            && filter.user_id.map_or(true, |id| self.user_id == id)
            && filter.category_id.map_or(true, |id| self.category_id == id)
    }
}
