// src/database.rs
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::config::{
    DatabaseConfig, DatabaseTarget, LOCAL_DB_HOST, LOCAL_DB_NAME, LOCAL_DB_PASSWORD,
    LOCAL_DB_PORT, LOCAL_DB_USER,
};

pub fn connect_options(target: &DatabaseTarget) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match target {
        DatabaseTarget::Local => PgConnectOptions::new()
            .host(LOCAL_DB_HOST)
            .port(LOCAL_DB_PORT)
            .username(LOCAL_DB_USER)
            .password(LOCAL_DB_PASSWORD)
            .database(LOCAL_DB_NAME)
            .ssl_mode(PgSslMode::Disable),
        // Hosted databases present certificates we do not pin; encrypt without verifying.
        DatabaseTarget::Cloud { url } => PgConnectOptions::from_str(url)?.ssl_mode(PgSslMode::Require),
    };
    Ok(options)
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(&config.target)?)
        .await?;

    tracing::info!(
        db_target = target_label(&config.target),
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

fn target_label(target: &DatabaseTarget) -> &'static str {
    match target {
        DatabaseTarget::Local => "local",
        DatabaseTarget::Cloud { .. } => "cloud",
    }
}
