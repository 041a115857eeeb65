use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::api::{Recipe, ScaledIngredient};
use crate::scaling::{RoundingTiers, Servings};

pub enum ViewerAction {
    Continue,
    ToggleFavorite,
    Exit,
}

/// Detail view of one recipe with a servings control.
///
/// Quantities are rescaled from the stored recipe on every render; the
/// recipe itself is never modified.
pub struct RecipeViewer {
    recipe: Recipe,
    servings: Servings,
    tiers: RoundingTiers,
    cursor: usize,
    checked: Vec<bool>,
}

impl RecipeViewer {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            servings: Servings::new(recipe.servings),
            checked: vec![false; recipe.ingredients.len()],
            recipe,
            tiers: RoundingTiers::default(),
            cursor: 0,
        }
    }

    pub fn with_tiers(mut self, tiers: RoundingTiers) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn servings(&self) -> u32 {
        self.servings.get()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn set_favorite(&mut self, is_favorite: bool) {
        self.recipe.is_favorite = is_favorite;
    }

    /// `"<quantity> <name>"` for every ingredient at the current servings
    pub fn ingredient_labels(&self) -> Vec<String> {
        self.recipe
            .scaled_ingredients_with(self.servings.get(), &self.tiers)
            .iter()
            .map(ScaledIngredient::label)
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> ViewerAction {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return ViewerAction::Exit,
            KeyCode::Char('f') => return ViewerAction::ToggleFavorite,
            KeyCode::Char('+') | KeyCode::Right => self.servings.increment(),
            KeyCode::Char('-') | KeyCode::Left => self.servings.decrement(),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < self.checked.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(checked) = self.checked.get_mut(self.cursor) {
                    *checked = !*checked;
                }
            }
            _ => {}
        }
        ViewerAction::Continue
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header
                Constraint::Min(1),    // Ingredients and steps
                Constraint::Length(1), // Key help
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.render_ingredients(frame, body[0]);
        self.render_instructions(frame, body[1]);

        let help = Paragraph::new(
            "+/- servings  ↑/↓ move  space check  f favorite  q quit",
        )
        .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(help, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let recipe = &self.recipe;

        let mut title = vec![Span::styled(
            recipe.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if recipe.is_favorite {
            title.push(Span::raw(" (favorite)"));
        }

        let servings = if self.servings.get() == recipe.servings {
            format!("Servings: {}", self.servings.get())
        } else {
            format!(
                "Servings: {} (written for {})",
                self.servings.get(),
                recipe.servings
            )
        };

        let header = Paragraph::new(vec![
            Line::from(title),
            Line::from(format!(
                "{} | {} min | by {}",
                recipe.difficulty,
                recipe.total_time(),
                recipe.author
            )),
            Line::from(servings),
        ])
        .block(Block::default().borders(Borders::ALL).title("Recipe"));
        frame.render_widget(header, area);
    }

    fn render_ingredients(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .ingredient_labels()
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                let checked = self.is_checked(index);
                let mut style = Style::default();
                if checked {
                    style = style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
                }
                if index == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let mark = if checked { "[x]" } else { "[ ]" };
                Line::from(Span::styled(format!("{} {}", mark, label), style))
            })
            .collect();

        let ingredients = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Ingredients ({} pers.)", self.servings.get())),
        );
        frame.render_widget(ingredients, area);
    }

    fn render_instructions(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let steps: Vec<Line> = self
            .recipe
            .instructions
            .iter()
            .map(|instruction| Line::from(format!("{}. {}", instruction.step, instruction.description)))
            .collect();

        let instructions = Paragraph::new(steps)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Instructions"));
        frame.render_widget(instructions, chunks[0]);

        let utensils = Paragraph::new(self.recipe.utensils.join(", "))
            .block(Block::default().borders(Borders::ALL).title("Utensils"));
        frame.render_widget(utensils, chunks[1]);
    }
}
