//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{Locale, Location};
use proptest::prelude::*;

// ============================================================================
// Location Property Tests
// ============================================================================

mod location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = Location::new("Somewhere", "", lat, lon, 0);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Location::new("x", "", lat, lon, 0).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(Location::new("x", "", lat, lon, 0).is_err());
        }

        #[test]
        fn coordinate_location_name_round_trips(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = Location::from_coordinates(lat, lon).unwrap();
            prop_assert_eq!(loc.name(), format!("{lat},{lon}"));
        }
    }
}

// ============================================================================
// Locale Property Tests
// ============================================================================

mod locale_tests {
    use super::*;

    proptest! {
        #[test]
        fn from_tag_never_panics(tag in ".*") {
            let locale = Locale::from_tag(&tag);
            prop_assert!(Locale::ALL.contains(&locale));
        }

        #[test]
        fn region_subtag_is_ignored(region in "[A-Z]{2}") {
            let tag = format!("fa-{region}");
            prop_assert_eq!(Locale::from_tag(&tag), Locale::Fa);
        }
    }
}
