use clap::Args;
use tantika_app::auth::{AuthService, DEFAULT_SESSION_TTL_HOURS, NewAccount, PgAuthService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Sign-in email address
    #[arg(long)]
    email: String,

    /// Optional contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Initial password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant the super admin role, which may manage other admins
    #[arg(long)]
    super_admin: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let db = args.database.connect().await?;
    let service = PgAuthService::new(db, DEFAULT_SESSION_TTL_HOURS);

    let user = service
        .create_admin(
            NewAccount {
                name: args.name,
                email: args.email,
                phone: args.phone,
                password: args.password,
            },
            args.super_admin,
        )
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
