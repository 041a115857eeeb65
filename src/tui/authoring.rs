use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{RecipeContext, RecipeState};
use crate::models::Difficulty;
use crate::models::api::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Title,
    Description,
    Servings,
    PrepTime,
    CookTime,
}

impl Field {
    fn prompt(self) -> &'static str {
        match self {
            Field::Title => "Recipe Title (Enter to Continue)",
            Field::Description => "Description (Enter to Continue)",
            Field::Servings => "Servings (at least 1)",
            Field::PrepTime => "Preparation time in minutes",
            Field::CookTime => "Cooking time in minutes",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Field::Servings | Field::PrepTime | Field::CookTime)
    }
}

/// Single-line input for one of the recipe's scalar fields
pub(crate) struct TextField {
    field: Field,
    current_input: String,
    error_message: Option<String>,
}

impl TextField {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            current_input: String::new(),
            error_message: None,
        }
    }

    pub fn title() -> Self {
        Self::new(Field::Title)
    }

    /// Store the input into `context`, or explain why it can't be
    fn commit(&self, context: &mut RecipeContext) -> Result<(), String> {
        let input = self.current_input.trim();
        match self.field {
            Field::Title if input.is_empty() => Err("title is required".to_string()),
            Field::Title if input.chars().count() > MAX_TITLE_LEN => Err(format!(
                "title cannot exceed {} characters",
                MAX_TITLE_LEN
            )),
            Field::Title => {
                context.title = input.to_string();
                Ok(())
            }
            Field::Description if input.is_empty() => Err("description is required".to_string()),
            Field::Description if input.chars().count() > MAX_DESCRIPTION_LEN => Err(format!(
                "description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            )),
            Field::Description => {
                context.description = input.to_string();
                Ok(())
            }
            Field::Servings => match input.parse::<u32>() {
                Ok(servings) if servings >= 1 => {
                    context.servings = servings;
                    Ok(())
                }
                _ => Err("at least 1 serving is required".to_string()),
            },
            Field::PrepTime | Field::CookTime => {
                let minutes = input
                    .parse::<u32>()
                    .map_err(|_| "enter a number of minutes".to_string())?;
                if self.field == Field::PrepTime {
                    context.prep_time = minutes;
                } else {
                    context.cook_time = minutes;
                }
                Ok(())
            }
        }
    }

    fn next(&self) -> Box<dyn RecipeState> {
        match self.field {
            Field::Title => Box::new(TextField::new(Field::Description)),
            Field::Description => Box::new(TextField::new(Field::Servings)),
            Field::Servings => Box::new(DifficultyChoice),
            Field::PrepTime => Box::new(TextField::new(Field::CookTime)),
            Field::CookTime => Box::new(IngredientList::new()),
        }
    }
}

impl RecipeState for TextField {
    fn render(&self, _context: &RecipeContext, frame: &mut Frame) {
        let title = match &self.error_message {
            Some(error) => format!("{} - ERROR: {}", self.field.prompt(), error),
            None => self.field.prompt().to_string(),
        };

        let input = Paragraph::new(self.current_input.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, frame.area());
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char(c) if self.field.is_numeric() && !c.is_ascii_digit() => None,
            KeyCode::Char(c) => {
                self.current_input.push(c);
                self.error_message = None;
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                self.error_message = None;
                None
            }
            KeyCode::Enter => match self.commit(context) {
                Ok(()) => Some(self.next()),
                Err(error) => {
                    self.error_message = Some(error);
                    self.current_input.clear();
                    None
                }
            },
            _ => None,
        }
    }
}

pub(crate) struct DifficultyChoice;

impl RecipeState for DifficultyChoice {
    fn render(&self, context: &RecipeContext, frame: &mut Frame) {
        let options: Vec<Line> = Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(i, difficulty)| Line::from(format!("({}) {}", i + 1, difficulty)))
            .collect();

        let block = Paragraph::new(options).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Difficulty of {}", context.title)),
        );
        frame.render_widget(block, frame.area());
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>> {
        let index = match key {
            KeyCode::Char('1') => 0,
            KeyCode::Char('2') => 1,
            KeyCode::Char('3') => 2,
            _ => return None, // Ignore other keys
        };
        context.difficulty = Difficulty::ALL[index];
        Some(Box::new(TextField::new(Field::PrepTime)))
    }
}

fn ingredient_lines(context: &RecipeContext) -> Vec<Line<'static>> {
    context
        .ingredients
        .iter()
        .map(|(name, quantity)| Line::from(format!("{} {}", quantity, name)))
        .collect()
}

pub(crate) struct IngredientList {
    current_input: String,
    error_message: Option<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
            error_message: None,
        }
    }
}

impl RecipeState for IngredientList {
    fn render(&self, context: &RecipeContext, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(frame.area());

        let ingredient_list = Paragraph::new(ingredient_lines(context)).block(
            Block::default().borders(Borders::ALL).title(format!(
                "Ingredients for {} ({} servings)",
                context.title, context.servings
            )),
        );
        frame.render_widget(ingredient_list, chunks[0]);

        let title = if let Some(error) = &self.error_message {
            format!("Enter ingredients - ERROR: {}", error)
        } else {
            "Enter ingredient name (Enter on empty to continue)".to_string()
        };

        let input = Paragraph::new(self.current_input.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, chunks[1]);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char(c) => {
                self.current_input.push(c);
                self.error_message = None; // Clear error when user types
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                self.error_message = None;
                None
            }
            KeyCode::Enter => {
                let ingredient_name = self.current_input.trim().to_string();

                if ingredient_name.is_empty() {
                    if context.ingredients.is_empty() {
                        self.error_message = Some("at least one ingredient is required".to_string());
                        None
                    } else {
                        Some(Box::new(Instructions::new()))
                    }
                } else if context.ingredients.contains_key(&ingredient_name) {
                    self.error_message = Some(format!("'{}' already added", ingredient_name));
                    self.current_input.clear();
                    None
                } else {
                    Some(Box::new(IngredientQuantity::new(ingredient_name)))
                }
            }
            _ => None,
        }
    }
}

/// Free-text quantity: "250g", "1/2 tasse", "À volonté" are all fine
pub(crate) struct IngredientQuantity {
    current_input: String,
    ingredient: String,
    error_message: Option<String>,
}

impl IngredientQuantity {
    pub fn new(ingredient: String) -> Self {
        Self {
            ingredient,
            current_input: String::new(),
            error_message: None,
        }
    }
}

impl RecipeState for IngredientQuantity {
    fn render(&self, context: &RecipeContext, frame: &mut Frame) {
        let title = match &self.error_message {
            Some(error) => format!("Quantity for {} - ERROR: {}", self.ingredient, error),
            None => format!(
                "Quantity of {} for {} servings",
                self.ingredient, context.servings
            ),
        };

        let input = Paragraph::new(self.current_input.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, frame.area());
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char(c) => {
                self.current_input.push(c);
                self.error_message = None;
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let quantity = self.current_input.trim();
                if quantity.is_empty() {
                    self.error_message = Some("quantity is required".to_string());
                    return None;
                }
                context
                    .ingredients
                    .insert(self.ingredient.clone(), quantity.to_string());
                Some(Box::new(IngredientList::new()))
            }
            _ => None,
        }
    }
}

struct Instructions {
    current_input: String,
}

impl Instructions {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
        }
    }
}

impl RecipeState for Instructions {
    fn render(&self, context: &RecipeContext, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30), // Ingredients
                Constraint::Min(1),         // Instructions
                Constraint::Length(3),      // Input
            ])
            .split(frame.area());

        let ingredient_list = Paragraph::new(ingredient_lines(context)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Ingredients for {}", context.title)),
        );
        frame.render_widget(ingredient_list, chunks[0]);

        // Render numbered instructions
        let instructions_text: String = context
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        let instruction_list = Paragraph::new(instructions_text)
            .block(Block::default().borders(Borders::ALL).title("Instructions"));
        frame.render_widget(instruction_list, chunks[1]);

        let step_num = context.instructions.len() + 1;
        let title = if context.instructions.is_empty() {
            format!("Enter step {} (at least one step)", step_num)
        } else {
            format!("Enter step {} (Enter on empty to finish)", step_num)
        };

        let input = Paragraph::new(self.current_input.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, chunks[2]);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut RecipeContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char(c) => {
                self.current_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let instruction = self.current_input.trim().to_string();

                if !instruction.is_empty() {
                    context.instructions.push(instruction);
                    self.current_input.clear();
                } else if !context.instructions.is_empty() {
                    // Finished with instructions - signal to save
                    context.finished = true;
                }
                None
            }
            _ => None,
        }
    }
}
