//! Catalog CLI - terminal front-end for the product catalog.
//!
//! Commands:
//! - `catalog list` - Show one page of products
//! - `catalog browse` - Interactive, debounced search and paging
//! - `catalog show` - Show a single product
//! - `catalog create` / `edit` / `delete` - Manage products (requires login)
//! - `catalog login` / `signup` / `logout` - Manage the stored token
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    BrowseArgs, ConfigArgs, CreateArgs, DeleteArgs, EditArgs, ListArgs, LoginArgs, ShowArgs,
    SignupArgs,
};
use config::BASE_URL_ENV;

/// Catalog CLI - Browse and manage products
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API base URL, including the /api prefix
    #[arg(long, global = true, env = BASE_URL_ENV)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    List(ListArgs),

    /// Browse products interactively
    Browse(BrowseArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Create a product
    Create(CreateArgs),

    /// Edit a product
    Edit(EditArgs),

    /// Delete a product
    Delete(DeleteArgs),

    /// Log in and store the token
    Login(LoginArgs),

    /// Create an account and store the token
    Signup(SignupArgs),

    /// Remove the stored token
    Logout,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Create(args) => commands::create::run(args, &ctx).await,
        Commands::Edit(args) => commands::edit::run(args, &ctx).await,
        Commands::Delete(args) => commands::delete::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Signup(args) => commands::auth::signup(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
