use color_eyre::eyre::{Result, eyre};
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vouch_adapters::{
    Argon2Scheme, PostgresUserStore, PostgresVerificationTokenStore, PostmarkEmailClient,
    SystemClock, config::AuthServiceSetting,
};
use vouch_auth_service::{AuthService, configure_postgresql};
use vouch_core::Email;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = AuthServiceSetting::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&config.postgres.url).await?;

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let token_store = PostgresVerificationTokenStore::new(pg_pool);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;

    let sender = Email::try_from(Secret::new(config.email_client.sender.clone()))
        .map_err(|e| eyre!("invalid sender address: {e}"))?;

    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        sender,
        config.email_client.auth_token.clone(),
        http_client,
    );

    let auth_service = AuthService::new(
        user_store,
        token_store,
        Argon2Scheme::new(),
        email_client,
        SystemClock,
        config.app.base_url.clone(),
    );

    let allowed_origins = (!config.app.allowed_origins.is_empty())
        .then(|| config.app.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;

    auth_service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
