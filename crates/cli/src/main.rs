//! Cafe Nine CLI - Operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Hash an admin password for CAFE_ADMIN_PASSWORD_HASH (reads stdin)
//! echo 'correct horse battery' | cafe-cli admin hash-password
//!
//! # Export the built-in menu as YAML
//! cafe-cli menu list
//! cafe-cli menu list --category desserts
//!
//! # Price an order subtotal (tax, delivery, total)
//! cafe-cli quote 42.50
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cafe-cli")]
#[command(author, version, about = "Cafe Nine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the admin account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect the built-in menu
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Show tax, delivery, and total for a subtotal
    Quote {
        /// Order subtotal in dollars, e.g. `42.50`
        subtotal: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Hash a password read from stdin into an argon2 PHC string
    HashPassword,
}

#[derive(Subcommand)]
enum MenuAction {
    /// Print menu items as YAML
    List {
        /// Only this category (appetizers, mains, desserts, beverages, bar)
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Admin { action } => match action {
            AdminAction::HashPassword => commands::admin::hash_password()?,
        },
        Commands::Menu { action } => match action {
            MenuAction::List { category } => commands::menu::list(category.as_deref())?,
        },
        Commands::Quote { subtotal } => commands::quote::quote(&subtotal)?,
    }
    Ok(())
}
