use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodChiefError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Recipe not found with id: {0}")]
    RecipeNotFound(i64),

    #[error("Invalid recipe: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown difficulty '{0}' (expected Facile, Moyen or Difficile)")]
    InvalidDifficulty(String),

    #[error("Column {column} holds out-of-range value {value}")]
    InvalidColumn { column: &'static str, value: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed seed file: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FoodChiefError>;
