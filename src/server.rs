use anyhow::Result;
use secrecy::SecretString;
use tokio::net::TcpListener;

use crate::cli::ServeArgs;
use crate::utils::get_credential;

mod listener;

pub(crate) async fn serve(args: ServeArgs) -> Result<()> {
    // If secret has not been passed via CLI or env, get it as a credential.
    let secret_token = args
        .secret_token
        .map(SecretString::from)
        .ok_or(())
        .or_else(|()| get_credential("webhook_secret"))?;

    let service = listener::listen(octocrab::instance(), secret_token);
    let tcp_listener = TcpListener::bind(&args.addr).await?;
    tracing::info!("Listening on {}", args.addr);

    axum::serve(tcp_listener, service).await?;
    Ok(())
}
