//! Backend entry-point: wires REST endpoints and OpenAPI docs.

mod server;

use std::env;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::admin::AdminCredentials;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        bind_addr,
        admin_credentials()?,
    );
    match env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
            config = config.with_db_pool(pool);
        }
        Err(_) => warn!("DATABASE_URL not set; serving fixture data only"),
    }

    let health_state = web::Data::new(HealthState::new());
    let http_server = server::create_server(health_state, config)?;
    http_server.await
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn admin_credentials() -> std::io::Result<AdminCredentials> {
    match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
        (Ok(username), Ok(password)) => Ok(AdminCredentials::new(username, password)),
        _ if cfg!(debug_assertions) => {
            warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; using dev defaults");
            Ok(AdminCredentials::new("admin", "password"))
        }
        _ => Err(std::io::Error::other(
            "ADMIN_USERNAME and ADMIN_PASSWORD must be set",
        )),
    }
}
