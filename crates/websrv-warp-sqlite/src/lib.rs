// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error as StdError, result::Result as StdResult};

use aloft_backend_webapi_json as api;
use aloft_repo::prelude::RepoError;
use aloft_storage_sqlite::{
    self as db,
    connection::pool::{PooledConnection, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper},
};
use aloft_usecases_sqlite as uc;
use serde::Serialize;
use thiserror::Error;
use warp::{
    Reply,
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{self, InvalidHeader, InvalidQuery, MethodNotAllowed, Reject, Rejection},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        use api::Error::*;
        match err {
            BadRequest(err) => Self::BadRequest(err),
            UseCase(err) => err.into(),
            DatabaseTransaction(err) => Self::Other(err.into()),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(err) => Self::BadRequest(err),
            Storage(err) => err.into(),
            Repository(err) => match err {
                RepoError::NotFound => Self::NotFound,
                RepoError::Conflict => Self::Conflict,
                RepoError::Other(err) => Self::Other(err),
            },
            DatabaseMigration(err) | Other(err) => Self::Other(err),
        }
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        use db::Error::*;
        match err {
            DatabaseConnection(err) => {
                log::warn!("Failed to connect to database: {err}");
                Self::ServiceUnavailable
            }
            DatabaseConnectionPool(err) => {
                log::warn!("No pooled database connection available: {err}");
                Self::ServiceUnavailable
            }
            TaskTimeout { reason } => Self::Timeout { reason },
            Database(err) => Self::Other(err.into()),
            TaskScheduling(err) => Self::Other(err.into()),
            Other(err) => Self::Other(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

pub async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

/// An API error serializable to JSON.
#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

fn status_code_and_message(err: &Error) -> (StatusCode, String) {
    match err {
        Error::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        Error::NotFound => (StatusCode::NOT_FOUND, status_code_to_string(StatusCode::NOT_FOUND)),
        Error::Conflict => (StatusCode::CONFLICT, status_code_to_string(StatusCode::CONFLICT)),
        Error::ServiceUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            status_code_to_string(StatusCode::SERVICE_UNAVAILABLE),
        ),
        Error::Timeout { reason } => (StatusCode::REQUEST_TIMEOUT, reason.clone()),
        Error::Other(err) => {
            log::warn!("Internal server error: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn source_or_self_message(err: &dyn StdError) -> String {
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

fn rejection_status_and_message(reject: &Rejection) -> (StatusCode, String) {
    if reject.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            status_code_to_string(StatusCode::NOT_FOUND),
        );
    }
    if let Some(err) = reject.find::<InvalidHeader>() {
        return (StatusCode::BAD_REQUEST, source_or_self_message(err));
    }
    if let Some(err) = reject.find::<InvalidQuery>() {
        return (StatusCode::BAD_REQUEST, source_or_self_message(err));
    }
    if let Some(err) = reject.find::<BodyDeserializeError>() {
        return (StatusCode::BAD_REQUEST, source_or_self_message(err));
    }
    if let Some(err) = reject.find::<Error>() {
        return status_code_and_message(err);
    }
    // Checked last, because rejections of unmatched routes
    // also carry this cause
    if let Some(err) = reject.find::<MethodNotAllowed>() {
        return (StatusCode::METHOD_NOT_ALLOWED, err.to_string());
    }
    log::error!("Unhandled rejection {reject:?}");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{reject:?}"))
}

/// Reply to all rejections with a JSON error body.
#[allow(clippy::unused_async)] // required by `Filter::recover`
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let (code, message) = rejection_status_and_message(&reject);
    let json_reply = warp::reply::json(&ErrorResponseBody {
        code: code.as_u16(),
        message,
    });
    Ok(warp::reply::with_status(json_reply, code))
}
