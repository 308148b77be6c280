//! User Service - command line entry point.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::User;
use user_service_lib::config::SupportConfig;
use user_service_lib::service::ServiceContainer;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Support app user management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// User commands
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Print the gender options
    Genders {
        /// Gender to mark as selected
        #[arg(long)]
        selected: Option<String>,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Show a user by ID
    Show { id: Uuid },
    /// Create a user
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = SupportConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Users { action } => {
            let user = match run_user_command(&config, action).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::error!(code = e.code(), "User command failed: {}", e);
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Genders { selected } => {
            let options = domain::gender_options(selected.as_deref());
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }

    Ok(())
}

async fn run_user_command(config: &SupportConfig, action: UserCommands) -> AppResult<User> {
    let services = user_service_lib::open_scope(config).await?;

    match action {
        UserCommands::Show { id } => services
            .users()
            .get_user_by_id(id)
            .await?
            .ok_or_not_found(),
        UserCommands::Add {
            first_name,
            last_name,
        } => {
            services
                .users()
                .insert_user(User::new(first_name, last_name))
                .await
        }
    }
}
