use std::path::Path;

use sqlx::SqlitePool;
use tracing::info;

use super::recipe_controller::seed_recipes;
use crate::error::Result;
use crate::models::api::NewRecipe;

/// Read a JSON array of recipes
pub fn load_seed_file(path: &Path) -> Result<Vec<NewRecipe>> {
    let contents = std::fs::read_to_string(path)?;
    let recipes: Vec<NewRecipe> = serde_json::from_str(&contents)?;
    info!(path = %path.display(), count = recipes.len(), "Loaded seed file");
    Ok(recipes)
}

/// Load a seed file and store every recipe in it
pub async fn seed_from_file(pool: &SqlitePool, path: &Path) -> Result<Vec<i64>> {
    let recipes = load_seed_file(path)?;
    seed_recipes(pool, &recipes).await
}
