use serde::{Deserialize, Serialize};

use crate::error::{FoodChiefError, Result};
use crate::models::{Difficulty, IngredientRecord, InstructionRecord, RecipeRecord};
use crate::scaling::{RoundingTiers, rescale_quantity_with};

/// Complete recipe with ingredients, steps and utensils
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub is_favorite: bool,
    pub author: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<Instruction>,
    pub utensils: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A single ingredient within a recipe, quantity as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub description: String,
}

/// An ingredient as displayed for a given serving count. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledIngredient {
    pub name: String,
    pub quantity: String,
}

impl ScaledIngredient {
    /// `"<quantity> <name>"`, the way the detail view lists it
    pub fn label(&self) -> String {
        if self.quantity.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.quantity, self.name)
        }
    }
}

/// One row of a recipe listing
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub total_time: u32,
    pub is_favorite: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Matched against title and description
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub favorites_only: bool,
}

pub(crate) fn column_u32(column: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| FoodChiefError::InvalidColumn { column, value })
}

impl RecipeSummary {
    pub(crate) fn from_record(record: RecipeRecord) -> Result<Self> {
        let prep_time = column_u32("prep_time", record.prep_time)?;
        let cook_time = column_u32("cook_time", record.cook_time)?;

        Ok(Self {
            id: record.id,
            title: record.title,
            difficulty: record.difficulty.parse()?,
            servings: column_u32("servings", record.servings)?,
            total_time: prep_time.saturating_add(cook_time),
            is_favorite: record.is_favorite,
            created_at: record.created_at,
        })
    }
}

impl Recipe {
    pub(crate) fn from_records(
        record: RecipeRecord,
        ingredients: Vec<IngredientRecord>,
        instructions: Vec<InstructionRecord>,
        utensils: Vec<String>,
    ) -> Result<Self> {
        let instructions = instructions
            .into_iter()
            .map(|row| {
                Ok(Instruction {
                    step: column_u32("step", row.step)?,
                    description: row.description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            image: record.image,
            prep_time: column_u32("prep_time", record.prep_time)?,
            cook_time: column_u32("cook_time", record.cook_time)?,
            servings: column_u32("servings", record.servings)?,
            difficulty: record.difficulty.parse()?,
            is_favorite: record.is_favorite,
            author: record.author,
            ingredients: ingredients
                .into_iter()
                .map(|row| RecipeIngredient {
                    name: row.name,
                    quantity: row.quantity,
                })
                .collect(),
            instructions,
            utensils,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Preparation plus cooking time, in minutes
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    /// Every ingredient rescaled from the stored serving count to `servings`
    pub fn scaled_ingredients(&self, servings: u32) -> Vec<ScaledIngredient> {
        self.scaled_ingredients_with(servings, &RoundingTiers::default())
    }

    pub fn scaled_ingredients_with(
        &self,
        servings: u32,
        tiers: &RoundingTiers,
    ) -> Vec<ScaledIngredient> {
        self.ingredients
            .iter()
            .map(|ingredient| ScaledIngredient {
                name: ingredient.name.clone(),
                quantity: rescale_quantity_with(
                    &ingredient.quantity,
                    self.servings,
                    servings,
                    tiers,
                ),
            })
            .collect()
    }

    /// Format the recipe as a human-readable string for `servings` people
    pub fn render(&self, servings: u32, tiers: &RoundingTiers) -> String {
        let mut output = String::new();

        output.push_str(&format!("Recipe: {}\n", self.title));
        output.push_str(&format!("ID: {}\n", self.id));
        output.push_str(&format!("By: {}\n", self.author));
        output.push_str(&format!("Created: {}\n", self.created_at));
        output.push_str(&format!(
            "Difficulty: {} | Time: {} min (prep {}, cook {})\n",
            self.difficulty,
            self.total_time(),
            self.prep_time,
            self.cook_time
        ));
        if self.is_favorite {
            output.push_str("Favorite\n");
        }
        output.push_str(&format!("\n{}\n", self.description));

        if servings == self.servings {
            output.push_str(&format!("\nIngredients ({} servings):\n", servings));
        } else {
            output.push_str(&format!(
                "\nIngredients ({} servings, recipe written for {}):\n",
                servings, self.servings
            ));
        }

        for ingredient in self.scaled_ingredients_with(servings, tiers) {
            output.push_str(&format!("  - {}\n", ingredient.label()));
        }

        if !self.utensils.is_empty() {
            output.push_str(&format!("\nUtensils: {}\n", self.utensils.join(", ")));
        }

        if !self.instructions.is_empty() {
            output.push_str("\nInstructions:\n");
            for instruction in &self.instructions {
                output.push_str(&format!(
                    "  {}. {}\n",
                    instruction.step, instruction.description
                ));
            }
        }

        output
    }
}
