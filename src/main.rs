use crate::db::{init_db, Database};
use crate::errors::ServerError;
use crate::router::{respond, AppState};
use astra::Server;
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod pricing;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        error!("Startup failed: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}

fn run() -> Result<(), ServerError> {
    // Non-fatal: the environment may be set externally.
    dotenv().ok();

    let config = config::load_app_configuration()?;

    let db = Database::new(config.database.path.clone());
    init_db(&db, &config.database.schema)?;

    bootstrap_admin_from_env(&db)?;

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|e| ServerError::Config(format!("Invalid bind address {}: {e}", config.server.bind)))?;
    let workers = config.server.max_workers;

    let state = AppState::new(db, config);

    info!("Starting server at http://{addr} with {workers} workers");
    Server::bind(&addr)
        .max_workers(workers)
        .serve(move |req, _info| respond(req, &state))?;

    Ok(())
}

/// `ADMIN_USERNAME` + `ADMIN_PASSWORD` create the admin account or reset its password.
fn bootstrap_admin_from_env(db: &Database) -> Result<(), ServerError> {
    match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
        (Ok(username), Ok(password)) => {
            let now = chrono::Utc::now().timestamp();
            let id = auth::bootstrap_admin(db, &username, &password, now)?;
            info!("Admin account '{}' ready (id {})", username.trim(), id);
        }
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
            warn!("Only one of ADMIN_USERNAME / ADMIN_PASSWORD is set; skipping admin bootstrap");
        }
        _ => {}
    }
    Ok(())
}
