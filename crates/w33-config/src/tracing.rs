// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralW33 — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Tracing subscriber wiring for the W33 tools.
//!
//! The exploration binaries emit structured events (`w33::*` targets) while
//! they build the geometry and enumerate substructures. `RUST_LOG` filters the
//! stream as usual; setting `W33_TRACE_CHROME=<path>` additionally records a
//! Chrome trace of the enumeration passes.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();
static CHROME_GUARD: OnceLock<Mutex<Option<tracing_chrome::FlushGuard>>> = OnceLock::new();

/// Errors emitted when configuring the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("failed to read W33_TRACE_CHROME: {0}")]
    Env(std::env::VarError),
}

/// Configures the global tracing subscriber once per process.
pub fn init_tracing() -> Result<(), InitError> {
    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Diagnostics go to stderr so binaries can stream artifacts on stdout.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal());
    let registry = Registry::default().with(filter).with(fmt_layer);

    match chrome_trace_path()? {
        Some(path) => {
            let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                .file(path)
                .include_args(true)
                .build();
            store_chrome_guard(guard);
            registry.with(chrome_layer).init();
        }
        None => registry.init(),
    }

    Ok(())
}

/// Best-effort initialisation for binaries: repeated calls are tolerated and
/// genuine failures are reported on stderr rather than aborting the run.
pub fn ensure_tracing() {
    match init_tracing() {
        Ok(()) | Err(InitError::AlreadyInitialised) => {}
        Err(err) => eprintln!("w33: failed to initialise tracing: {err}"),
    }
}

fn store_chrome_guard(guard: tracing_chrome::FlushGuard) {
    let cell = CHROME_GUARD.get_or_init(|| Mutex::new(None));
    if let Ok(mut slot) = cell.lock() {
        *slot = Some(guard);
    }
}

fn chrome_trace_path() -> Result<Option<PathBuf>, InitError> {
    match std::env::var("W33_TRACE_CHROME") {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(PathBuf::from(raw))),
        Ok(_) => Ok(None),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(InitError::Env(err)),
    }
}
