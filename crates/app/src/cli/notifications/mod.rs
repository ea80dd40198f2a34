use clap::{Args, Subcommand};

mod purge;

#[derive(Debug, Args)]
pub(crate) struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
enum NotificationsSubcommand {
    /// Delete notifications past their expiry
    Purge(purge::PurgeArgs),
}

pub(crate) async fn run(command: NotificationsCommand) -> Result<(), String> {
    match command.command {
        NotificationsSubcommand::Purge(args) => purge::run(args).await,
    }
}
