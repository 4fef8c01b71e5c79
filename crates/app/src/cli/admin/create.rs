use clap::Args;
use quarry_app::{
    auth::{DEFAULT_TOKEN_TTL, NewAdmin, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login name
    #[arg(long)]
    username: String,

    /// Login password
    #[arg(long, env = "QUARRY_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool, DEFAULT_TOKEN_TTL);

    let admin = service
        .create_admin(NewAdmin {
            username: args.username,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_username: {}", admin.username);
    println!("admin_created_at: {}", admin.created_at);

    Ok(())
}
