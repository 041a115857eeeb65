use anyhow::Context;
use clap::Parser;
use foodchief::{
    cli::{Cli, Command, StoreCommand},
    controllers::{delete_recipe, get_recipe, list_recipes, seed_from_file, toggle_favorite},
    database, logging,
    models::api::RecipeFilter,
    scaling::{RoundingTiers, rescale_quantity_with},
    tui::{
        self,
        viewer::{RecipeViewer, ViewerAction},
    },
};
use sqlx::SqlitePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the alternate screen
    let interactive = matches!(cli.command, Command::Store(StoreCommand::View { .. }));
    logging::init(if interactive { "warn" } else { "info" });

    match cli.command {
        Command::Scale {
            quantity,
            from,
            to,
            rounding,
        } => {
            println!(
                "{}",
                rescale_quantity_with(&quantity, from, to, &rounding.into())
            );
        }
        Command::Store(command) => {
            let pool = database::connect(&cli.database_url)
                .await
                .with_context(|| format!("Failed to open {}", cli.database_url))?;
            run(&pool, command).await?;
        }
    }

    Ok(())
}

async fn run(pool: &SqlitePool, command: StoreCommand) -> anyhow::Result<()> {
    match command {
        StoreCommand::Migrate => println!("Database is up to date."),
        StoreCommand::List {
            search,
            difficulty,
            favorites,
        } => {
            let filter = RecipeFilter {
                search,
                difficulty,
                favorites_only: favorites,
            };
            let recipes = list_recipes(pool, &filter).await?;

            if recipes.is_empty() {
                println!("No recipes found.");
            }
            for recipe in recipes {
                println!(
                    "{:>4}  {:<40} {:<9} {:>3} pers. {:>4} min{}",
                    recipe.id,
                    recipe.title,
                    recipe.difficulty,
                    recipe.servings,
                    recipe.total_time,
                    if recipe.is_favorite { "  *" } else { "" }
                );
            }
        }
        StoreCommand::Show {
            id,
            servings,
            rounding,
        } => {
            let recipe = get_recipe(pool, id).await?;
            let servings = servings.unwrap_or(recipe.servings);
            print!("{}", recipe.render(servings, &rounding.into()));
        }
        StoreCommand::View { id, rounding } => view(pool, id, rounding.into()).await?,
        StoreCommand::Favorite { id } => {
            if toggle_favorite(pool, id).await? {
                println!("Recipe {} added to favorites.", id);
            } else {
                println!("Recipe {} removed from favorites.", id);
            }
        }
        StoreCommand::Delete { id } => {
            delete_recipe(pool, id).await?;
            println!("Recipe {} deleted.", id);
        }
        StoreCommand::Seed { path } => {
            let ids = seed_from_file(pool, &path)
                .await
                .with_context(|| format!("Failed to seed from {}", path.display()))?;
            println!("Imported {} recipes.", ids.len());
        }
    }

    Ok(())
}

async fn view(pool: &SqlitePool, id: i64, tiers: RoundingTiers) -> anyhow::Result<()> {
    let recipe = get_recipe(pool, id).await?;
    let mut viewer = RecipeViewer::new(recipe).with_tiers(tiers);

    let mut terminal = tui::enter()?;
    let result = view_loop(pool, &mut terminal, &mut viewer).await;
    tui::leave(&mut terminal)?;

    result
}

async fn view_loop(
    pool: &SqlitePool,
    terminal: &mut tui::Tui,
    viewer: &mut RecipeViewer,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| viewer.render(f))?;

        match viewer.handle_key(tui::next_key()?) {
            ViewerAction::Continue => {}
            ViewerAction::ToggleFavorite => {
                let is_favorite = toggle_favorite(pool, viewer.recipe().id).await?;
                viewer.set_favorite(is_favorite);
            }
            ViewerAction::Exit => return Ok(()),
        }
    }
}
