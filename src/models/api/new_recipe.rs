use serde::{Deserialize, Serialize};

use super::recipe::{Instruction, RecipeIngredient};
use crate::error::{FoodChiefError, Result};
use crate::models::Difficulty;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const DEFAULT_AUTHOR: &str = "Food Chief";

/// A recipe as authored, before it has an id. Also the seed file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default, alias = "ustensiles")]
    pub utensils: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl NewRecipe {
    /// Copy with every text field trimmed and empty utensils dropped
    pub fn normalized(&self) -> NewRecipe {
        NewRecipe {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            ingredients: self
                .ingredients
                .iter()
                .map(|i| RecipeIngredient {
                    name: i.name.trim().to_string(),
                    quantity: i.quantity.trim().to_string(),
                })
                .collect(),
            instructions: self
                .instructions
                .iter()
                .map(|i| Instruction {
                    step: i.step,
                    description: i.description.trim().to_string(),
                })
                .collect(),
            utensils: self
                .utensils
                .iter()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .collect(),
            author: match self.author.trim() {
                "" => default_author(),
                author => author.to_string(),
            },
            ..self.clone()
        }
    }

    /// Check the constraints a stored recipe must satisfy.
    /// Every violation is reported, not just the first.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title is required".to_string());
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.push(format!("title cannot exceed {} characters", MAX_TITLE_LEN));
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("description is required".to_string());
        } else if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            ));
        }

        if self.servings < 1 {
            errors.push("at least 1 serving is required".to_string());
        }

        if self.ingredients.is_empty() {
            errors.push("at least one ingredient is required".to_string());
        }
        for (index, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                errors.push(format!("ingredient {} has no name", index + 1));
            }
            if ingredient.quantity.trim().is_empty() {
                errors.push(format!("ingredient {} has no quantity", index + 1));
            }
        }

        if self.instructions.is_empty() {
            errors.push("at least one instruction is required".to_string());
        }
        for instruction in &self.instructions {
            if instruction.description.trim().is_empty() {
                errors.push(format!("step {} has no description", instruction.step));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FoodChiefError::Validation(errors))
        }
    }
}
