//! Request sequencing for superseded weather requests
//!
//! A new request for a different city or locale supersedes any request still
//! in flight. The core does not cancel in-flight network calls; instead each
//! request carries a [`RequestTicket`] and the consuming layer keeps a
//! [`RequestSequencer`] to discard late responses.
//!
//! # Examples
//!
//! ```
//! use application::RequestSequencer;
//! use domain::Locale;
//!
//! let sequencer = RequestSequencer::new();
//! let first = sequencer.begin("Tokyo", Locale::En);
//! let second = sequencer.begin("Paris", Locale::En);
//!
//! assert!(!sequencer.is_current(&first));
//! assert!(sequencer.is_current(&second));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use domain::Locale;
use uuid::Uuid;

/// Identifies one user-initiated "load weather for city X" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
    request_id: Uuid,
    city: String,
    locale: Locale,
}

impl RequestTicket {
    /// Monotonic position of this request within its sequencer
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Unique identifier for tracing/logging
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

/// Issues tickets and remembers which one is the latest
///
/// Owned by the consuming layer, one per view that shows weather.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Start a new request, superseding all earlier tickets
    pub fn begin(&self, city: impl Into<String>, locale: Locale) -> RequestTicket {
        let sequence = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket {
            sequence,
            request_id: Uuid::new_v4(),
            city: city.into(),
            locale,
        }
    }

    /// Whether no newer ticket has been issued since `ticket`
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.sequence
    }
}

/// A result tagged with the request it belongs to
#[derive(Debug)]
pub struct Tracked<T> {
    pub ticket: RequestTicket,
    pub value: T,
}

impl<T> Tracked<T> {
    /// The value if its request is still the latest, `None` if superseded
    pub fn into_current(self, sequencer: &RequestSequencer) -> Option<T> {
        sequencer.is_current(&self.ticket).then_some(self.value)
    }
}
