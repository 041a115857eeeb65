use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{FoodChiefError, Result};
use crate::models::api::{NewRecipe, Recipe, RecipeFilter, RecipeSummary};
use crate::models::{IngredientRecord, InstructionRecord, RecipeRecord};

/// Fetch a recipe by ID with its ingredients, steps and utensils
pub async fn get_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<Recipe> {
    let record = sqlx::query_as::<_, RecipeRecord>(&format!(
        "SELECT {} FROM recipes WHERE id = ?",
        RecipeRecord::COLUMNS
    ))
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?
    .ok_or(FoodChiefError::RecipeNotFound(recipe_id))?;

    let ingredients = sqlx::query_as::<_, IngredientRecord>(
        r#"
        SELECT id, recipe_id, position, name, quantity
        FROM recipe_ingredients
        WHERE recipe_id = ?
        ORDER BY position, id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    let instructions = sqlx::query_as::<_, InstructionRecord>(
        r#"
        SELECT id, recipe_id, step, description
        FROM recipe_instructions
        WHERE recipe_id = ?
        ORDER BY step, id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    let utensils: Vec<String> =
        sqlx::query_scalar("SELECT name FROM recipe_utensils WHERE recipe_id = ? ORDER BY id")
            .bind(recipe_id)
            .fetch_all(pool)
            .await?;

    Recipe::from_records(record, ingredients, instructions, utensils)
}

/// List recipes matching `filter`, newest first
pub async fn list_recipes(pool: &SqlitePool, filter: &RecipeFilter) -> Result<Vec<RecipeSummary>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {} FROM recipes WHERE 1 = 1",
        RecipeRecord::COLUMNS
    ));

    if let Some(difficulty) = filter.difficulty {
        query
            .push(" AND difficulty = ")
            .push_bind(difficulty.as_str());
    }

    if filter.favorites_only {
        query.push(" AND is_favorite = 1");
    }

    query.push(" ORDER BY created_at DESC, id DESC");

    let records = query
        .build_query_as::<RecipeRecord>()
        .fetch_all(pool)
        .await?;

    // SQLite's LIKE only folds ASCII, so text search runs here
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let records: Vec<RecipeRecord> = match needle {
        Some(needle) => records
            .into_iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
            })
            .collect(),
        None => records,
    };

    debug!(count = records.len(), "Listed recipes");

    records.into_iter().map(RecipeSummary::from_record).collect()
}

/// Create a new recipe with all its children in one transaction
/// Returns the recipe ID
pub async fn create_recipe(pool: &SqlitePool, recipe: &NewRecipe) -> Result<i64> {
    check(recipe)?;

    let mut tx = pool.begin().await?;
    let recipe_id = insert_recipe(&mut tx, &recipe.normalized()).await?;
    tx.commit().await?;

    info!(recipe_id, title = %recipe.title.trim(), "Created recipe");

    Ok(recipe_id)
}

/// Create several recipes; either all of them are stored or none is
pub async fn seed_recipes(pool: &SqlitePool, recipes: &[NewRecipe]) -> Result<Vec<i64>> {
    let mut errors = Vec::new();
    for (index, recipe) in recipes.iter().enumerate() {
        if let Err(FoodChiefError::Validation(problems)) = recipe.validate() {
            errors.extend(
                problems
                    .into_iter()
                    .map(|problem| format!("recipe {}: {}", index + 1, problem)),
            );
        }
    }
    if !errors.is_empty() {
        warn!(count = errors.len(), "Rejected seed data");
        return Err(FoodChiefError::Validation(errors));
    }

    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        ids.push(insert_recipe(&mut tx, &recipe.normalized()).await?);
    }
    tx.commit().await?;

    info!(count = ids.len(), "Seeded recipes");

    Ok(ids)
}

/// Replace a recipe's content. The favorite flag is left as is.
pub async fn update_recipe(pool: &SqlitePool, recipe_id: i64, recipe: &NewRecipe) -> Result<Recipe> {
    check(recipe)?;
    let recipe = recipe.normalized();

    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE recipes
        SET title = ?, description = ?, image = ?, prep_time = ?, cook_time = ?,
            servings = ?, difficulty = ?, author = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(&recipe.image)
    .bind(i64::from(recipe.prep_time))
    .bind(i64::from(recipe.cook_time))
    .bind(i64::from(recipe.servings))
    .bind(recipe.difficulty.as_str())
    .bind(&recipe.author)
    .bind(recipe_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(FoodChiefError::RecipeNotFound(recipe_id));
    }

    delete_children(&mut tx, recipe_id).await?;
    insert_children(&mut tx, recipe_id, &recipe).await?;

    tx.commit().await?;

    info!(recipe_id, "Updated recipe");

    get_recipe(pool, recipe_id).await
}

/// Delete a recipe. Its children go with it through `ON DELETE CASCADE`.
pub async fn delete_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<()> {
    let deleted = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(FoodChiefError::RecipeNotFound(recipe_id));
    }

    info!(recipe_id, "Deleted recipe");

    Ok(())
}

/// Flip the favorite flag. Returns the new state.
pub async fn toggle_favorite(pool: &SqlitePool, recipe_id: i64) -> Result<bool> {
    let is_favorite: bool = sqlx::query_scalar(
        r#"
        UPDATE recipes
        SET is_favorite = NOT is_favorite, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING is_favorite
        "#,
    )
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?
    .ok_or(FoodChiefError::RecipeNotFound(recipe_id))?;

    info!(recipe_id, is_favorite, "Toggled favorite");

    Ok(is_favorite)
}

fn check(recipe: &NewRecipe) -> Result<()> {
    recipe.validate().inspect_err(|e| {
        warn!(title = %recipe.title, error = %e, "Rejected recipe");
    })
}

async fn insert_recipe(conn: &mut SqliteConnection, recipe: &NewRecipe) -> Result<i64> {
    let recipe_id = sqlx::query(
        r#"
        INSERT INTO recipes
            (title, description, image, prep_time, cook_time, servings, difficulty, is_favorite, author)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(&recipe.image)
    .bind(i64::from(recipe.prep_time))
    .bind(i64::from(recipe.cook_time))
    .bind(i64::from(recipe.servings))
    .bind(recipe.difficulty.as_str())
    .bind(recipe.is_favorite)
    .bind(&recipe.author)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    insert_children(conn, recipe_id, recipe).await?;

    Ok(recipe_id)
}

async fn insert_children(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    recipe: &NewRecipe,
) -> Result<()> {
    for (position, ingredient) in recipe.ingredients.iter().enumerate() {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, position, name, quantity) VALUES (?, ?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(position as i64)
        .bind(&ingredient.name)
        .bind(&ingredient.quantity)
        .execute(&mut *conn)
        .await?;
    }

    for instruction in &recipe.instructions {
        sqlx::query(
            "INSERT INTO recipe_instructions (recipe_id, step, description) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(i64::from(instruction.step))
        .bind(&instruction.description)
        .execute(&mut *conn)
        .await?;
    }

    for utensil in &recipe.utensils {
        sqlx::query("INSERT INTO recipe_utensils (recipe_id, name) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(utensil)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn delete_children(conn: &mut SqliteConnection, recipe_id: i64) -> Result<()> {
    for table in ["recipe_ingredients", "recipe_instructions", "recipe_utensils"] {
        sqlx::query(&format!("DELETE FROM {} WHERE recipe_id = ?", table))
            .bind(recipe_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::models::api::{Instruction, RecipeIngredient};
    use crate::models::test_fixtures::test_db;
    use rstest::*;

    fn crepes() -> NewRecipe {
        NewRecipe {
            title: "Crêpes".to_string(),
            description: "Des crêpes légères pour le goûter".to_string(),
            image: String::new(),
            prep_time: 10,
            cook_time: 20,
            servings: 4,
            difficulty: Difficulty::Facile,
            ingredients: vec![
                RecipeIngredient {
                    name: "Farine".to_string(),
                    quantity: "250g".to_string(),
                },
                RecipeIngredient {
                    name: "Lait".to_string(),
                    quantity: "1/2 litre".to_string(),
                },
                RecipeIngredient {
                    name: "Sel".to_string(),
                    quantity: "Une pincée".to_string(),
                },
            ],
            instructions: vec![
                Instruction {
                    step: 2,
                    description: "Cuire à la poêle".to_string(),
                },
                Instruction {
                    step: 1,
                    description: "Mélanger".to_string(),
                },
            ],
            utensils: vec!["Poêle".to_string()],
            is_favorite: false,
            author: "Food Chief".to_string(),
        }
    }

    fn gratin() -> NewRecipe {
        NewRecipe {
            title: "Gratin dauphinois".to_string(),
            description: "Pommes de terre, crème et ail".to_string(),
            prep_time: 30,
            cook_time: 90,
            servings: 6,
            difficulty: Difficulty::Moyen,
            ..crepes()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_and_get_recipe(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create recipe");

        assert!(recipe_id > 0);

        let recipe = get_recipe(&pool, recipe_id)
            .await
            .expect("Failed to fetch recipe");

        assert_eq!(recipe.id, recipe_id);
        assert_eq!(recipe.title, "Crêpes");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Facile);
        assert_eq!(recipe.total_time(), 30);
        assert_eq!(recipe.utensils, vec!["Poêle".to_string()]);
        assert!(!recipe.created_at.is_empty());

        // Stored verbatim, in authoring order
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[0].name, "Farine");
        assert_eq!(recipe.ingredients[1].quantity, "1/2 litre");
        assert_eq!(recipe.ingredients[2].quantity, "Une pincée");

        // Steps come back sorted
        assert_eq!(recipe.instructions[0].step, 1);
        assert_eq!(recipe.instructions[0].description, "Mélanger");
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_recipe_not_found(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let result = get_recipe(&pool, 999).await;

        match result {
            Err(FoodChiefError::RecipeNotFound(id)) => assert_eq!(id, 999),
            _ => panic!("Expected RecipeNotFound error"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_recipe_trims_fields(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe = NewRecipe {
            title: "  Crêpes  ".to_string(),
            ..crepes()
        };

        let recipe_id = create_recipe(&pool, &recipe)
            .await
            .expect("Failed to create recipe");
        let fetched = get_recipe(&pool, recipe_id)
            .await
            .expect("Failed to fetch recipe");

        assert_eq!(fetched.title, "Crêpes");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_invalid_recipe_stores_nothing(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe = NewRecipe {
            servings: 0,
            ingredients: vec![],
            ..crepes()
        };

        let result = create_recipe(&pool, &recipe).await;
        assert!(matches!(result, Err(FoodChiefError::Validation(ref errors)) if errors.len() == 2));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&pool)
            .await
            .expect("Failed to count recipes");
        assert_eq!(count, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_recipes_filters(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let crepes_id = create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create crêpes");
        let gratin_id = create_recipe(&pool, &gratin())
            .await
            .expect("Failed to create gratin");

        let all = list_recipes(&pool, &RecipeFilter::default())
            .await
            .expect("Failed to list recipes");
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].id, gratin_id);
        assert_eq!(all[0].total_time, 120);

        let by_search = list_recipes(
            &pool,
            &RecipeFilter {
                search: Some("crème".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to search recipes");
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].id, gratin_id);

        let by_title = list_recipes(
            &pool,
            &RecipeFilter {
                search: Some("GRATIN".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to search recipes");
        assert_eq!(by_title.len(), 1);

        let by_difficulty = list_recipes(
            &pool,
            &RecipeFilter {
                difficulty: Some(Difficulty::Facile),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to filter recipes");
        assert_eq!(by_difficulty.len(), 1);
        assert_eq!(by_difficulty[0].id, crepes_id);

        let favorites = list_recipes(
            &pool,
            &RecipeFilter {
                favorites_only: true,
                ..Default::default()
            },
        )
        .await
        .expect("Failed to list favorites");
        assert!(favorites.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_search_treats_wildcards_literally(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create recipe");

        let results = list_recipes(
            &pool,
            &RecipeFilter {
                search: Some("%".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to search recipes");

        assert!(results.is_empty());
    }

    #[rstest]
    #[case("île", 1)]
    #[case("ÎLE", 1)]
    #[case("CRÈME", 1)]
    #[case("crème anglaise", 1)]
    #[case("Flottante", 1)]
    #[case("crêpe", 0)]
    #[tokio::test]
    async fn test_search_folds_accented_capitals(
        #[future] test_db: SqlitePool,
        #[case] search: &str,
        #[case] expected: usize,
    ) {
        let pool = test_db.await;

        let ile = NewRecipe {
            title: "Île flottante".to_string(),
            description: "Crème anglaise et blancs en neige".to_string(),
            ..crepes()
        };
        create_recipe(&pool, &ile)
            .await
            .expect("Failed to create recipe");

        let results = list_recipes(
            &pool,
            &RecipeFilter {
                search: Some(search.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to search recipes");

        assert_eq!(results.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_toggle_favorite(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create recipe");

        assert!(toggle_favorite(&pool, recipe_id).await.expect("toggle on"));

        let favorites = list_recipes(
            &pool,
            &RecipeFilter {
                favorites_only: true,
                ..Default::default()
            },
        )
        .await
        .expect("Failed to list favorites");
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].is_favorite);

        assert!(!toggle_favorite(&pool, recipe_id).await.expect("toggle off"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_toggle_favorite_not_found(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        assert!(matches!(
            toggle_favorite(&pool, 42).await,
            Err(FoodChiefError::RecipeNotFound(42))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_recipe_replaces_children(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create recipe");
        toggle_favorite(&pool, recipe_id)
            .await
            .expect("Failed to toggle favorite");

        let changed = NewRecipe {
            servings: 2,
            ingredients: vec![RecipeIngredient {
                name: "Farine de sarrasin".to_string(),
                quantity: "125g".to_string(),
            }],
            utensils: vec![],
            ..crepes()
        };

        let updated = update_recipe(&pool, recipe_id, &changed)
            .await
            .expect("Failed to update recipe");

        assert_eq!(updated.servings, 2);
        assert_eq!(updated.ingredients.len(), 1);
        assert_eq!(updated.ingredients[0].name, "Farine de sarrasin");
        assert!(updated.utensils.is_empty());
        assert!(updated.is_favorite, "update keeps the favorite flag");
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_missing_recipe(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        assert!(matches!(
            update_recipe(&pool, 7, &crepes()).await,
            Err(FoodChiefError::RecipeNotFound(7))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_recipe(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = create_recipe(&pool, &crepes())
            .await
            .expect("Failed to create recipe");

        delete_recipe(&pool, recipe_id)
            .await
            .expect("Failed to delete recipe");

        assert!(matches!(
            get_recipe(&pool, recipe_id).await,
            Err(FoodChiefError::RecipeNotFound(_))
        ));

        for table in ["recipe_ingredients", "recipe_instructions", "recipe_utensils"] {
            let orphans: i64 = sqlx::query_scalar(&format!(
                "SELECT COUNT(*) FROM {} WHERE recipe_id = ?",
                table
            ))
            .bind(recipe_id)
            .fetch_one(&pool)
            .await
            .expect("Failed to count children");
            assert_eq!(orphans, 0, "{} rows left behind", table);
        }

        assert!(matches!(
            delete_recipe(&pool, recipe_id).await,
            Err(FoodChiefError::RecipeNotFound(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_seed_is_all_or_nothing(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let broken = NewRecipe {
            title: String::new(),
            ..gratin()
        };

        match seed_recipes(&pool, &[crepes(), broken]).await {
            Err(FoodChiefError::Validation(errors)) => {
                assert_eq!(errors, vec!["recipe 2: title is required".to_string()]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&pool)
            .await
            .expect("Failed to count recipes");
        assert_eq!(count, 0);

        let ids = seed_recipes(&pool, &[crepes(), gratin()])
            .await
            .expect("Failed to seed recipes");
        assert_eq!(ids.len(), 2);
    }
}
