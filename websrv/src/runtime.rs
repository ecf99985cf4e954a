// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use aloft_backend_embedded::{
    fetch::HttpTrackFetcher, new_http_client, storage::commission_database,
    track::resume_sequencer, webhook::dispatch::HttpNotificationSender,
};
use aloft_websrv_warp_sqlite::handle_rejection;
use jiff::Timestamp;
use tokio::sync::mpsc;
use warp::{
    Filter as _,
    http::{StatusCode, Uri},
};

use crate::{
    config::Config,
    routing::{self, Services},
};

pub(crate) async fn run(config: Config) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");

    let db_gatekeeper = commission_database(&config.database)?;
    let sequencer = resume_sequencer(&db_gatekeeper).await?;
    let http_client = new_http_client(config.http_client.request_timeout())?;
    log::info!(
        "Advancing webhook cursors on delivery {cursor_advance}",
        cursor_advance = config.webhook.cursor_advance,
    );
    let shared_services = Arc::new(Services {
        db_gatekeeper,
        sequencer,
        track_fetcher: HttpTrackFetcher::new(http_client.clone()),
        notification_sender: HttpNotificationSender::new(http_client),
        cursor_advance_policy: config.webhook.cursor_advance,
        ticker_page_size: config.ticker.page_size,
        launched_at,
    });

    let about_json = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "launched_at": launched_at,
            "config": config,
        },
    });

    log::info!("Creating service routes");

    // POST /shutdown
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let shutdown_filter = warp::post()
        .and(warp::path("shutdown"))
        .and(warp::path::end())
        .map(move || {
            server_shutdown_tx
                .send(())
                .map(|()| StatusCode::ACCEPTED)
                .unwrap_or_else(|_| {
                    log::warn!("Failed to forward shutdown request");
                    StatusCode::BAD_GATEWAY
                })
        });

    // GET /about
    let about_filter = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&about_json));

    // GET /paragliding
    let redirect_filter = warp::get()
        .and(warp::path("paragliding"))
        .and(warp::path::end())
        .map(|| warp::redirect::permanent(Uri::from_static("/paragliding/api")));

    let api_filters = warp::path("paragliding")
        .and(warp::path("api"))
        .and(routing::api::create_filters(Arc::clone(&shared_services)));

    let admin_filters = warp::path("admin")
        .and(warp::path("api"))
        .and(routing::admin::create_filters(Arc::clone(&shared_services)));

    let all_filters = redirect_filter
        .or(api_filters)
        .or(admin_filters)
        .or(shutdown_filter)
        .or(about_filter);

    log::info!("Initializing server");

    let server = warp::serve(all_filters.recover(handle_rejection));

    log::info!("Starting");

    let (socket_addr, server_listener) = server.try_bind_with_graceful_shutdown(
        config.network.endpoint.socket_addr(),
        async move {
            tokio::select! {
                Some(()) = server_shutdown_rx.recv() => {
                    log::info!("Shutdown requested");
                }
                Ok(()) = tokio::signal::ctrl_c() => {
                    log::info!("Interrupted");
                }
                else => (),
            }
        },
    )?;

    log::info!("Listening on {socket_addr}");

    server_listener.await;

    log::info!("Stopping");

    shared_services.db_gatekeeper.decommission();

    log::info!("Terminating");

    Ok(())
}
