use sqlx::prelude::FromRow;

/// One ingredient line of a recipe. `quantity` is free text, stored verbatim.
#[derive(Debug, Clone, FromRow)]
pub struct IngredientRecord {
    pub id: i64,
    pub recipe_id: i64,
    pub position: i64,
    pub name: String,
    pub quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;
    use sqlx::SqlitePool;

    #[rstest]
    #[tokio::test]
    async fn test_ingredient_model_keeps_quantity_text(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = sqlx::query(
            "INSERT INTO recipes (title, description, prep_time, cook_time, servings, difficulty) \
             VALUES ('Limonade', 'Fraîche', 10, 0, 1, 'Facile')",
        )
        .execute(&pool)
        .await
        .expect("Failed to insert recipe")
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, position, name, quantity) VALUES (?, ?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(0)
        .bind("Glaçons")
        .bind("À volonté")
        .execute(&pool)
        .await
        .expect("Failed to insert ingredient");

        let ingredient = sqlx::query_as::<_, IngredientRecord>(
            "SELECT id, recipe_id, position, name, quantity FROM recipe_ingredients WHERE recipe_id = ?",
        )
        .bind(recipe_id)
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch ingredient");

        assert_eq!(ingredient.recipe_id, recipe_id);
        assert_eq!(ingredient.position, 0);
        assert_eq!(ingredient.name, "Glaçons");
        assert_eq!(ingredient.quantity, "À volonté");
        assert!(ingredient.id > 0);
    }
}
