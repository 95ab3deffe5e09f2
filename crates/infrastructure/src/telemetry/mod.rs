//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber used by the binaries.

mod logging;

pub use logging::{TelemetryError, init_tracing};
