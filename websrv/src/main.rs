// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::env::current_exe;

use crate::config::Config;

mod config;
mod env;
mod routing;
mod runtime;

fn main() -> anyhow::Result<()> {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return Err(err);
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    log::info!("Patching configuration from .env file and environment variables");
    let mut config = Config::default();
    env::parse_config_into(&mut config);
    log::debug!("Configuration: {config:?}");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    if let Err(err) = runtime.block_on(runtime::run(config)) {
        log::error!("Runtime terminated with error: {err:#}");
        return Err(err);
    }

    log::info!("Exiting");
    Ok(())
}
