use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb_core::services::{TokenService, TokenSweeper};
use bb_infra::{DatabasePool, MySqlRefreshTokenStore, MySqlUserDirectory};

use bb_api::config::ApiConfig;
use bb_api::middleware::{AuthGate, Authenticator};
use bb_api::routes::auth::AppState;
use bb_api::{middleware, routes};

type Service = TokenService<MySqlRefreshTokenStore, MySqlUserDirectory>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting ballotbox API server");

    let config = ApiConfig::from_env()?;
    let bind_address = config.bind_address();

    let db = DatabasePool::new(config.database.clone()).await?;
    db.health_check().await?;
    info!("database connection established");

    let store = MySqlRefreshTokenStore::new(db.pool(), config.token.refresh_ttl());
    let users = MySqlUserDirectory::new(db.pool());

    // Fails fast on a weak secret or inverted lifetimes.
    let token_service: Arc<Service> =
        Arc::new(TokenService::new(store, users, config.token.clone())?);

    let sweeper_store = Arc::new(MySqlRefreshTokenStore::new(
        db.pool(),
        config.token.refresh_ttl(),
    ));
    Arc::new(TokenSweeper::new(sweeper_store, config.sweeper.clone())).spawn();

    info!("server binding to {}", bind_address);

    HttpServer::new(move || {
        let gate = AuthGate::new(
            Arc::clone(&token_service) as Arc<dyn Authenticator>
        );

        App::new()
            .wrap(Logger::default())
            .wrap(middleware::cors::create_cors())
            .app_data(web::Data::new(AppState::new(Arc::clone(&token_service))))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api").service(routes::auth::scope::<
                    MySqlRefreshTokenStore,
                    MySqlUserDirectory,
                >(gate)),
            )
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "ballotbox-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
