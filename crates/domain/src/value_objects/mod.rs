//! Value Objects - Immutable, identity-less domain primitives

mod condition;
mod locale;
mod location;

pub use condition::{ConditionCode, IconKey, NormalizedCondition};
pub use locale::Locale;
pub use location::Location;
