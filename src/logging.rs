// SPDX-License-Identifier: MPL-2.0
//! Console logging setup.
//!
//! All modules log through the `tracing` macros; this installs the global
//! subscriber once at startup. `RUST_LOG` overrides the default filter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "film_showcase=info";

/// Installs the global `tracing` subscriber.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
