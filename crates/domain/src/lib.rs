//! Domain layer for the weather core
//!
//! Contains the provider-independent weather schema: locations, locales,
//! normalized conditions, snapshots and forecast series.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
