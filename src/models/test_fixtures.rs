use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::database::run_migrations;
use crate::models::Difficulty;
use crate::models::api::{Instruction, Recipe, RecipeIngredient};

/// In-memory recipe store with migrations applied
///
/// A single connection keeps every query on the same in-memory database.
#[fixture]
pub async fn test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// A stored recipe for 4 with a numeric, a free-text and a bare-count quantity
#[fixture]
pub fn sample_recipe() -> Recipe {
    Recipe {
        id: 1,
        title: "Crêpes".to_string(),
        description: "Des crêpes légères".to_string(),
        image: String::new(),
        prep_time: 10,
        cook_time: 20,
        servings: 4,
        difficulty: Difficulty::Facile,
        is_favorite: false,
        author: "Food Chief".to_string(),
        ingredients: vec![
            RecipeIngredient {
                name: "Farine".to_string(),
                quantity: "250g".to_string(),
            },
            RecipeIngredient {
                name: "Sel".to_string(),
                quantity: "Une pincée".to_string(),
            },
            RecipeIngredient {
                name: "Oeufs".to_string(),
                quantity: "3".to_string(),
            },
        ],
        instructions: vec![
            Instruction {
                step: 1,
                description: "Mélanger la farine et les oeufs".to_string(),
            },
            Instruction {
                step: 2,
                description: "Cuire à la poêle".to_string(),
            },
        ],
        utensils: vec!["Poêle".to_string(), "Fouet".to_string()],
        created_at: "2024-01-15 10:30:00".to_string(),
        updated_at: "2024-01-15 10:30:00".to_string(),
    }
}
