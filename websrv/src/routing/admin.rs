// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use aloft_backend_webapi_json as api;
use aloft_storage_sqlite::connection::pool::gatekeeper::PendingTasks;
use aloft_websrv_warp_sqlite as websrv;
use warp::{Filter, Reply, filters::BoxedFilter};

use super::Services;

pub(crate) fn create_filters(shared_services: Arc<Services>) -> BoxedFilter<(impl Reply,)> {
    let shared_services = warp::any().map(move || Arc::clone(&shared_services));

    log::info!("Creating admin routes");

    let tracks_count = warp::get()
        .and(warp::path("tracks_count"))
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_read_task(
                &shared_services.db_gatekeeper,
                |mut pooled_connection| api::track::count::handle_request(&mut pooled_connection),
            )
            .await
            .map(|count| count.to_string())
        });
    let tracks_purge_all = warp::delete()
        .and(warp::path("tracks"))
        .and(warp::path::end())
        .and(shared_services.clone())
        .and_then(|shared_services: Arc<Services>| async move {
            websrv::spawn_blocking_write_task(
                &shared_services.db_gatekeeper,
                |mut pooled_connection| {
                    api::track::purge_all::handle_request(&mut pooled_connection)
                },
            )
            .await
            .map(|purged| purged.to_string())
        });
    let storage_pending_tasks = warp::get()
        .and(warp::path("storage"))
        .and(warp::path("pending-tasks"))
        .and(warp::path::end())
        .and(shared_services)
        .map(|shared_services: Arc<Services>| {
            let PendingTasks { read, write } = shared_services.db_gatekeeper.pending_tasks();
            warp::reply::json(&serde_json::json!({
                "read": read,
                "write": write,
            }))
        });

    tracks_count
        .or(tracks_purge_all)
        .or(storage_pending_tasks)
        .boxed()
}
