mod difficulty;
mod ingredient;
mod instruction;
mod recipe;

pub mod api;

#[cfg(test)]
pub mod test_fixtures;

pub use difficulty::Difficulty;
pub use ingredient::IngredientRecord;
pub use instruction::InstructionRecord;
pub use recipe::RecipeRecord;
