/*
 * Responsibility
 * - Config 読み込み → 依存生成 (pool / secret store / directory / authorizer)
 * - Router 組み立てと middleware の適用
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::{RequestAuthorizer, TokenVerifier};
use crate::services::directory::{PgUserDirectory, UserDirectory};
use crate::services::secrets::{PgSecretStore, SecretStore};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,office_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    // Development: fail fast on panic so we notice immediately.
    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting authorizer in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level collaborator clients once and inject them into the
/// shared application state. Nothing here is torn down mid-process.
async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let secrets = Arc::new(PgSecretStore::new(pool.clone()));
    let directory = Arc::new(PgUserDirectory::new(pool));
    let verifier = TokenVerifier::new(config.token_leeway_seconds);

    tracing::info!(
        secret_store = secrets.backend_name(),
        directory = directory.backend_name(),
        privileged_subjects = config.privileged_subjects.len(),
        "collaborator clients initialized"
    );

    let authorizer = RequestAuthorizer::new(
        secrets,
        directory,
        verifier,
        config.auth_secret_id.clone(),
        config.privileged_subjects.clone(),
    );

    Ok(AppState::new(Arc::new(authorizer)))
}

fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    middleware::http::apply(router)
}
