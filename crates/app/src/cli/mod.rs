use clap::{Args, Parser, Subcommand};
use tantika_app::database::{self, Db};

mod admin;
mod db;
mod notifications;

#[derive(Debug, Parser)]
#[command(name = "tantika-app", about = "Tantika operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Admin(admin::AdminCommand),
    Db(db::DbCommand),
    Notifications(notifications::NotificationsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Admin(command) => admin::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Notifications(command) => notifications::run(command).await,
        }
    }
}

/// Connection flags shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url, 1)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(Db::new(pool))
    }
}
