use clap::Args;
use tantika_app::domain::notifications::{NotificationsService, PgNotificationsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct PurgeArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: PurgeArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let purged = PgNotificationsService::new(db)
        .purge_expired()
        .await
        .map_err(|error| format!("failed to purge notifications: {error}"))?;

    println!("purged: {purged}");

    Ok(())
}
