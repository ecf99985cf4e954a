// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use aloft_backend_webapi_json::{self as api, track::TrackField};
use aloft_core::{TrackSequence, TrackUid, WebhookUid};
use aloft_websrv_warp_sqlite as websrv;
use warp::{Filter, Reply, filters::BoxedFilter};

use super::Services;

pub(crate) fn create_filters(shared_services: Arc<Services>) -> BoxedFilter<(impl Reply,)> {
    let shared_services = warp::any().map(move || Arc::clone(&shared_services));

    log::info!("Creating API routes");

    let path_param_track_uid = warp::path::param::<TrackUid>();
    let path_param_track_field = warp::path::param::<TrackField>();
    let path_param_track_sequence = warp::path::param::<TrackSequence>();
    let path_param_webhook_uid = warp::path::param::<WebhookUid>();

    let track_path = warp::path("track");
    let ticker_path = warp::path("ticker");
    let webhook_new_track_path = warp::path("webhook").and(warp::path("new_track"));

    // Service
    let about = warp::get()
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            api::about::handle_request(shared_services.launched_at)
                .map(|response_body| warp::reply::json(&response_body))
                .map_err(websrv::reject_on_error)
        });

    // Tracks
    let track_create = warp::post()
        .and(track_path)
        .and(warp::path::end())
        .and(warp::body::json())
        .and(shared_services.clone())
        .and_then(
            |request_body, shared_services: Arc<Services>| async move {
                api::track::create::handle_request(
                    &shared_services.ingest_environment(),
                    request_body,
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
                .map_err(websrv::reject_on_error)
            },
        );
    let track_list = warp::get()
        .and(track_path)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                |mut pooled_connection| api::track::load_all::handle_request(&mut pooled_connection),
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let track_load_one = warp::get()
        .and(track_path)
        .and(path_param_track_uid)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|uid, shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::track::load_one::handle_request(&mut pooled_connection, &uid)
                },
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let track_load_field = warp::get()
        .and(track_path)
        .and(path_param_track_uid)
        .and(path_param_track_field)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|uid, field, shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::track::load_field::handle_request(&mut pooled_connection, &uid, field)
                },
            )
            .await
        });
    let track_filters = track_create
        .or(track_list)
        .or(track_load_one)
        .or(track_load_field);

    // Ticker
    let ticker_latest = warp::get()
        .and(ticker_path)
        .and(warp::path("latest"))
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                |mut pooled_connection| {
                    api::ticker::load_latest::handle_request(&mut pooled_connection)
                },
            )
            .await
        });
    let ticker_first_page = warp::get()
        .and(ticker_path)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            let page_size = shared_services.ticker_page_size;
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::ticker::load_page::handle_request(&mut pooled_connection, None, page_size)
                },
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let ticker_page_after = warp::get()
        .and(ticker_path)
        .and(path_param_track_sequence)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|after, shared_services: Arc<Services>| async move {
            let page_size = shared_services.ticker_page_size;
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::ticker::load_page::handle_request(
                        &mut pooled_connection,
                        Some(after),
                        page_size,
                    )
                },
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let ticker_filters = ticker_latest.or(ticker_first_page).or(ticker_page_after);

    // Webhooks
    let webhook_create = warp::post()
        .and(webhook_new_track_path)
        .and(warp::path::end())
        .and(warp::body::json())
        .and(shared_services.clone())
        .and_then(
            |request_body, shared_services: Arc<Services>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_services.db_gatekeeper,
                    move |mut pooled_connection| {
                        api::webhook::create::handle_request(&mut pooled_connection, request_body)
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );
    let webhook_load_one = warp::get()
        .and(webhook_new_track_path)
        .and(path_param_webhook_uid)
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|uid, shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::webhook::load_one::handle_request(&mut pooled_connection, &uid)
                },
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let webhook_purge = warp::delete()
        .and(webhook_new_track_path)
        .and(path_param_webhook_uid)
        .and(warp::path::end())
        .and(shared_services)
        .and_then(|uid, shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_write_task(
                &shared_services.db_gatekeeper,
                move |mut pooled_connection| {
                    api::webhook::purge::handle_request(&mut pooled_connection, &uid)
                },
            )
            .await
            .map(|response_body| warp::reply::json(&response_body))
        });
    let webhook_filters = webhook_create.or(webhook_load_one).or(webhook_purge);

    about
        .or(track_filters)
        .or(ticker_filters)
        .or(webhook_filters)
        .boxed()
}
