use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::auth::ports::AuthServicePort;
use user_service::domain::auth::service::AuthService;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

/// Wire both services over one repository instance.
fn build_services<UR: UserRepository>(
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
) -> (Arc<dyn UserServicePort>, Arc<dyn AuthServicePort>) {
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
        Arc::clone(&repository),
        *authenticator.password_hasher(),
    ));
    let auth_service: Arc<dyn AuthServicePort> =
        Arc::new(AuthService::new(repository, authenticator));
    (user_service, auth_service)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let store = match config.database.url {
        Some(_) => "postgresql",
        None => "in-memory",
    };
    tracing::info!(
        http_port = config.server.http_port,
        database = store,
        token_ttl_minutes = config.jwt.expiration_minutes,
        bcrypt_cost = config.password.bcrypt_cost,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.password.bcrypt_cost)?;
    let token_service = TokenService::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    );
    let authenticator = Arc::new(Authenticator::new(password_hasher, token_service));

    let (user_service, auth_service) = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                authenticator,
            )
        }
        None => {
            tracing::warn!("database.url not set, users are kept in memory only");
            build_services(Arc::new(InMemoryUserRepository::new()), authenticator)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        auth_service,
        config.auth.public_prefixes.clone(),
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
