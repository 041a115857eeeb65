use std::io;

use crossterm::event::KeyCode;
use indexmap::IndexMap;
use ratatui::{Frame, Terminal, backend::Backend};

use super::authoring::TextField;
use crate::models::Difficulty;
use crate::models::api::{DEFAULT_AUTHOR, Instruction, NewRecipe, RecipeIngredient};

pub enum AppAction {
    Continue,      // Keep running
    SaveAndExit,   // Finished - save recipe
    CancelAndExit, // Esc pressed - don't save
}

pub struct RecipeApp {
    state: Box<dyn RecipeState>,
    context: RecipeContext,
}

/// Everything entered so far
pub struct RecipeContext {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: IndexMap<String, String>, // name -> quantity, as typed
    pub instructions: Vec<String>,
    pub finished: bool, // Set to true when ready to save
}

impl RecipeContext {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            servings: 1,
            difficulty: Difficulty::Facile,
            prep_time: 0,
            cook_time: 0,
            ingredients: IndexMap::new(),
            instructions: Vec::new(),
            finished: false,
        }
    }

    pub fn to_new_recipe(&self) -> NewRecipe {
        NewRecipe {
            title: self.title.clone(),
            description: self.description.clone(),
            image: String::new(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            ingredients: self
                .ingredients
                .iter()
                .map(|(name, quantity)| RecipeIngredient {
                    name: name.clone(),
                    quantity: quantity.clone(),
                })
                .collect(),
            instructions: self
                .instructions
                .iter()
                .zip(1..)
                .map(|(description, step)| Instruction {
                    step,
                    description: description.clone(),
                })
                .collect(),
            utensils: Vec::new(),
            is_favorite: false,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl Default for RecipeContext {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) trait RecipeState {
    fn render(&self, context: &RecipeContext, frame: &mut Frame);
    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>>;
}

impl RecipeApp {
    pub fn new() -> Self {
        Self {
            state: Box::new(TextField::title()),
            context: RecipeContext::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        self.state.render(&self.context, frame);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        // global exit behavior
        if key == KeyCode::Esc {
            return AppAction::CancelAndExit;
        }

        // otherwise let the state handle it
        if let Some(next_state) = self.state.handle_key(key, &mut self.context) {
            self.state = next_state
        }

        if self.context.finished {
            AppAction::SaveAndExit
        } else {
            AppAction::Continue
        }
    }

    /// Draw and feed keys until the user saves or cancels.
    /// Errors are returned as is; restoring the terminal is up to the caller.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut next_key: impl FnMut() -> io::Result<KeyCode>,
    ) -> io::Result<AppAction> {
        loop {
            terminal.draw(|f| self.render(f))?;

            match self.handle_key(next_key()?) {
                AppAction::Continue => {}
                action => return Ok(action),
            }
        }
    }

    /// Consume the app and return the recipe context
    pub fn into_context(self) -> RecipeContext {
        self.context
    }
}

impl Default for RecipeApp {
    fn default() -> Self {
        Self::new()
    }
}
