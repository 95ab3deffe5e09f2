//! Application layer - Use cases and orchestration
//!
//! Defines the ports weather providers and geocoders plug into, translates
//! provider condition codes, normalizes raw payloads into the domain schema
//! and orchestrates concurrent current + forecast fetches.

pub mod error;
pub mod messages;
pub mod ports;
pub mod request_context;
pub mod services;

pub use error::{ApplicationError, WeatherFetchError};
pub use messages::{FailureMessage, failure_message};
pub use ports::*;
pub use request_context::{RequestSequencer, RequestTicket, Tracked};
pub use services::*;
