// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, Ipv6Addr, SocketAddr},
    num::{NonZeroU32, NonZeroU64},
    time::Duration,
};

use aloft_backend_embedded::storage::DatabaseConfig;
use aloft_storage_sqlite::connection::{
    Config as DatabaseConnectionConfig, Storage,
    pool::{
        Config as DatabaseConnectionPoolConfig,
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
    },
};
use aloft_usecases::webhook::dispatch::CursorAdvancePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) http_client: HttpClientConfig,
    pub(crate) ticker: TickerConfig,
    pub(crate) webhook: WebhookConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Default::default(),
            database: default_database_config(),
            http_client: Default::default(),
            ticker: Default::default(),
            webhook: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

pub(crate) const ENDPOINT_PORT_EPHEMERAL: u16 = 0;

impl EndpointConfig {
    pub(crate) const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: ENDPOINT_PORT_EPHEMERAL,
        }
    }

    pub(crate) fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

pub(crate) const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = NonZeroU32::MIN;

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ: Duration = Duration::from_secs(10);

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE: Duration = Duration::from_secs(30);

fn non_zero_duration_as_millis(duration: Duration) -> NonZeroU64 {
    u64::try_from(duration.as_millis())
        .ok()
        .and_then(NonZeroU64::new)
        .unwrap_or(NonZeroU64::MIN)
}

fn default_database_config() -> DatabaseConfig {
    DatabaseConfig {
        connection: DatabaseConnectionConfig {
            storage: Storage::InMemory,
            pool: DatabaseConnectionPoolConfig {
                max_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
                gatekeeper: DatabaseConnectionGatekeeperConfig {
                    acquire_read_timeout_millis: non_zero_duration_as_millis(
                        DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ,
                    ),
                    acquire_write_timeout_millis: non_zero_duration_as_millis(
                        DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE,
                    ),
                },
            },
        },
        migrate_schema: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct HttpClientConfig {
    /// Applies to both fetching track files and delivering notifications
    pub(crate) request_timeout_secs: NonZeroU64,
}

pub(crate) const DEFAULT_HTTP_CLIENT_REQUEST_TIMEOUT_SECS: NonZeroU64 =
    NonZeroU64::MIN.saturating_add(9);

impl HttpClientConfig {
    pub(crate) const fn request_timeout(self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.get())
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_HTTP_CLIENT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TickerConfig {
    pub(crate) page_size: NonZeroU64,
}

pub(crate) const DEFAULT_TICKER_PAGE_SIZE: NonZeroU64 = NonZeroU64::MIN.saturating_add(4);

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_TICKER_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WebhookConfig {
    #[serde(with = "cursor_advance_policy")]
    pub(crate) cursor_advance: CursorAdvancePolicy,
}

mod cursor_advance_policy {
    use aloft_usecases::webhook::dispatch::CursorAdvancePolicy;
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S>(policy: &CursorAdvancePolicy, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(policy.as_str())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<CursorAdvancePolicy, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}
