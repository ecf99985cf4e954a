// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    env,
    fmt::Display,
    num::{NonZeroU32, NonZeroU64},
    str::{FromStr, ParseBoolError},
};

use aloft_storage_sqlite::connection::Storage;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use crate::config::{
    Config, DEFAULT_DATABASE_CONNECTION_POOL_SIZE, DEFAULT_HTTP_CLIENT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TICKER_PAGE_SIZE, ENDPOINT_PORT_EPHEMERAL,
};

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        let rust_log_from_env = env::var("RUST_LOG").ok();
        if let Some(rust_log_from_env) = rust_log_from_env {
            if !rust_log_from_env.is_empty() {
                eprintln!(
                    "Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}"
                );
            }
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

/// Parse an optional variable, ignoring empty values.
fn parse_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let var = env::var(key).ok()?;
    tracing::debug!("{key} = {var}");
    if var.trim().is_empty() {
        return None;
    }
    var.trim()
        .parse()
        .map_err(|err| {
            tracing::warn!("Failed to parse {key} = {var}: {err}");
        })
        .ok()
}

pub(crate) fn parse_bool_var(var: &str) -> Result<bool, ParseBoolError> {
    var.to_lowercase().parse::<bool>().or_else(|err| {
        if let Ok(val) = var.parse::<u8>() {
            match val {
                0 => return Ok(false),
                1 => return Ok(true),
                _ => (),
            }
        }
        Err(err)
    })
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

// Assigned by the hosting platform
const PORT_ENV: &str = "PORT";

const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";

const HTTP_CLIENT_TIMEOUT_SECS_ENV: &str = "HTTP_CLIENT_TIMEOUT_SECS";

const TICKER_PAGE_SIZE_ENV: &str = "TICKER_PAGE_SIZE";

const WEBHOOK_CURSOR_ADVANCE_ENV: &str = "WEBHOOK_CURSOR_ADVANCE";

fn parse_database_migrate_schema_on_startup() -> Option<bool> {
    let var = env::var(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV).ok()?;
    tracing::debug!("{DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV} = {var}");
    parse_bool_var(var.trim())
        .map_err(|err| {
            tracing::warn!("Failed to parse {DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV} = {var}: {err}");
        })
        .ok()
}

/// Override the configuration with environment variables.
pub(crate) fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV).or_else(|| parse_var(PORT_ENV)) {
        config.network.endpoint.port = port;
    }
    if config.network.endpoint.port == ENDPOINT_PORT_EPHEMERAL {
        tracing::debug!("Listening on an ephemeral port");
    }

    if let Ok(database_url) = env::var(DATABASE_URL_ENV) {
        tracing::debug!("{DATABASE_URL_ENV} = {database_url}");
        config.database.connection.storage = Storage::parse(&database_url);
    }
    config.database.connection.pool.max_size =
        parse_var::<NonZeroU32>(DATABASE_CONNECTION_POOL_SIZE_ENV)
            .unwrap_or(DEFAULT_DATABASE_CONNECTION_POOL_SIZE);
    if let Some(migrate_schema) = parse_database_migrate_schema_on_startup() {
        config.database.migrate_schema = migrate_schema;
    }

    config.http_client.request_timeout_secs =
        parse_var::<NonZeroU64>(HTTP_CLIENT_TIMEOUT_SECS_ENV)
            .unwrap_or(DEFAULT_HTTP_CLIENT_REQUEST_TIMEOUT_SECS);
    config.ticker.page_size =
        parse_var::<NonZeroU64>(TICKER_PAGE_SIZE_ENV).unwrap_or(DEFAULT_TICKER_PAGE_SIZE);
    if let Some(cursor_advance) = parse_var(WEBHOOK_CURSOR_ADVANCE_ENV) {
        config.webhook.cursor_advance = cursor_advance;
    }
}
