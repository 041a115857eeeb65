use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct InstructionRecord {
    pub id: i64,
    pub recipe_id: i64,
    pub step: i64,
    pub description: String,
}
