// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe client command-line driver.

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use recipe_client::{
    config::Config,
    error::ClientError,
    middleware::Guarded,
    routes::Route,
    services::{auth::display_name, CatalogFilter},
    RecipeApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recipe-client")]
#[command(about = "Session-aware client for the recipe API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a stored session is valid and when it expires
    Status,

    /// Sign in and store the session token
    Login {
        email: String,
        password: String,

        /// Keep the token across restarts
        #[arg(long)]
        remember: bool,
    },

    /// Sign out and clear stored credentials
    Logout,

    /// List recipes, optionally filtered by name
    Recipes {
        /// Case-insensitive name search
        query: Option<String>,

        /// Only recipes in this category
        #[arg(long)]
        category: Option<String>,

        /// Only recipes with this tag
        #[arg(long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting recipe client");

    let app = RecipeApp::new(config)?;
    let result = run(&app, cli.command).await;
    app.session.teardown();
    result
}

async fn run(app: &RecipeApp, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Status => {
            let state = app.session.evaluate();
            match app.session.expiry_display() {
                Some(expiry) => println!("Signed in (session expires {})", expiry),
                None => println!("Signed out ({:?})", state),
            }
        }
        Commands::Login {
            email,
            password,
            remember,
        } => {
            app.auth
                .login(&email, &password, remember)
                .await
                .map_err(notify)?;
            println!("Signed in as {}", display_name(&email));
        }
        Commands::Logout => {
            app.auth.logout();
            println!("Signed out");
        }
        Commands::Recipes {
            query,
            category,
            tag,
        } => {
            app.session.evaluate();
            if !matches!(
                app.guard.resolve_settled(Route::Recipes).await,
                Guarded::Allow(_)
            ) {
                bail!("Please sign in first");
            }

            let catalog = app.recipes.load_catalog().await.map_err(notify)?;
            let filter = CatalogFilter {
                query: query.unwrap_or_default(),
                category: category.unwrap_or_default(),
                tag: tag.unwrap_or_default(),
            };
            for recipe in catalog.filter(&filter) {
                println!("{:>6}  {}", recipe.id, recipe.name);
            }
        }
    }
    Ok(())
}

/// Surface a client error as its notification text.
fn notify(err: ClientError) -> anyhow::Error {
    tracing::debug!(error = %err, "Command failed");
    anyhow!(err.user_message())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> Result<(), tracing_subscriber::filter::ParseError> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recipe_client=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
