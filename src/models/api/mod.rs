mod new_recipe;
mod recipe;

pub use new_recipe::{DEFAULT_AUTHOR, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, NewRecipe};
pub use recipe::{Instruction, Recipe, RecipeFilter, RecipeIngredient, RecipeSummary, ScaledIngredient};
