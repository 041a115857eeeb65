use anyhow::Context;
use clap::Parser;
use foodchief::{
    controllers::create_recipe,
    database::{self, DEFAULT_DATABASE_URL},
    logging,
    tui::{
        self,
        app::{AppAction, RecipeApp},
    },
};

/// Write a new recipe interactively and store it
#[derive(Debug, Parser)]
#[command(name = "recipe_author", version)]
struct Args {
    #[arg(long, env = "FOODCHIEF_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init("warn");

    let pool = database::connect(&args.database_url)
        .await
        .with_context(|| format!("Failed to open {}", args.database_url))?;

    let mut terminal = tui::enter()?;
    let mut app = RecipeApp::new();
    let result = app.run(&mut terminal, tui::next_key);
    tui::leave(&mut terminal)?;
    let action = result?;

    if matches!(action, AppAction::SaveAndExit) {
        let recipe = app.into_context().to_new_recipe();
        println!("Saving recipe: {}", recipe.title);

        let recipe_id = create_recipe(&pool, &recipe).await?;
        println!("Recipe saved with ID: {}", recipe_id);
    } else {
        println!("Recipe entry cancelled.");
    }

    Ok(())
}
