use clap::Args;

use quarry_client::{api::CatalogApi, config::ClientConfig};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Admin login name
    #[arg(long)]
    username: String,

    /// Admin password
    #[arg(long, env = "QUARRY_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(config: &ClientConfig, args: LoginArgs) -> Result<(), String> {
    let api = config
        .api()
        .map_err(|error| format!("failed to build client: {error}"))?;

    let session = api
        .login(&args.username, &args.password)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("QUARRY_TOKEN={}", session.token());

    if let Some(expires_at) = session.expires_at() {
        println!("expires_at: {expires_at}");
    }

    Ok(())
}
