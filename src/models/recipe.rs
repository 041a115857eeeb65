use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub difficulty: String,
    pub is_favorite: bool,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RecipeRecord {
    pub(crate) const COLUMNS: &'static str = "id, title, description, image, prep_time, cook_time, \
         servings, difficulty, is_favorite, author, created_at, updated_at";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;
    use sqlx::SqlitePool;

    #[rstest]
    #[tokio::test]
    async fn test_recipe_model_compatibility_with_defaults(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        sqlx::query(
            "INSERT INTO recipes (title, description, prep_time, cook_time, servings, difficulty) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind("Poulet coco")
        .bind("Un classique réunionnais")
        .bind(20)
        .bind(60)
        .bind(4)
        .bind("Moyen")
        .execute(&pool)
        .await
        .expect("Failed to insert recipe");

        let recipe = sqlx::query_as::<_, RecipeRecord>(&format!(
            "SELECT {} FROM recipes WHERE title = ?",
            RecipeRecord::COLUMNS
        ))
        .bind("Poulet coco")
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch recipe");

        assert_eq!(recipe.title, "Poulet coco");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, "Moyen");
        assert_eq!(recipe.author, "Food Chief");
        assert!(!recipe.is_favorite);
        assert!(recipe.id > 0);
        assert!(!recipe.created_at.is_empty());
        assert!(!recipe.updated_at.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_recipe_rejects_zero_servings(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let result = sqlx::query(
            "INSERT INTO recipes (title, description, prep_time, cook_time, servings, difficulty) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind("Rien")
        .bind("Pour personne")
        .bind(0)
        .bind(0)
        .bind(0)
        .bind("Facile")
        .execute(&pool)
        .await;

        assert!(result.is_err(), "servings CHECK constraint should reject 0");
    }
}
