mod recipe_controller;
mod seed_controller;

pub use recipe_controller::{
    create_recipe, delete_recipe, get_recipe, list_recipes, seed_recipes, toggle_favorite,
    update_recipe,
};
pub use seed_controller::{load_seed_file, seed_from_file};
