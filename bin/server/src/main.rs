#[tokio::main]
async fn main() {
    use modreport_server::{auth::AppState, auth::DiscordOAuthClient, config::ServerConfig, router};
    use sqlx::postgres::PgPoolOptions;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    let admins = config.admin_set();
    tracing::info!(admin_count = admins.len(), "Loaded configuration");

    // Create database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    // Initialize the Discord OAuth client
    let discord_client =
        DiscordOAuthClient::new(&config.discord).expect("failed to create Discord OAuth client");

    // Create application state
    let state = AppState::new(db_pool, discord_client, admins, &config.session)
        .expect("failed to create application state");

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
