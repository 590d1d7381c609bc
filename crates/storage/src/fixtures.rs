//! Seed records loaded at startup

use crate::models::{Category, Habit, User};

pub(crate) fn users() -> Vec<User> {
    [(1, "Andrey", 15), (2, "Roman", 14), (3, "Svetlana", 10)]
        .into_iter()
        .map(|(id, name, age)| User {
            id,
            name: name.to_string(),
            age,
        })
        .collect()
}

pub(crate) fn categories() -> Vec<Category> {
    [(1, "economy", "❤"), (2, "health", "💰"), (3, "study", "📗")]
        .into_iter()
        .map(|(id, name, emoji)| Category {
            id,
            name: name.to_string(),
            emoji: emoji.to_string(),
        })
        .collect()
}

pub(crate) fn habits() -> Vec<Habit> {
    [
        (1, 1, 3, "Russian language"),
        (2, 2, 3, "math"),
        (3, 3, 1, "save money"),
        (4, 3, 1, "earn money"),
    ]
    .into_iter()
    .map(|(id, user_id, category_id, name)| Habit {
        id,
        user_id,
        category_id,
        name: name.to_string(),
    })
    .collect()
}
