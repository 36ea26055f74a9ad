//! Invariants of the global feature set

use ocular_core::{Blink, Fixation, OcularEvents, Saccade, ScreenSize};
use ocular_features::GlobalFeatures;
use proptest::prelude::*;

fn fixation() -> impl Strategy<Value = Fixation> {
    (0.0..1.0f64, 0.0..1.0f64, 0.0..1.0f64, 0.0..100.0f64)
        .prop_map(|(x, y, duration, start)| Fixation::new(x, y, duration, start))
}

fn saccade() -> impl Strategy<Value = Saccade> {
    (
        (0.0..1.0f64, 0.0..1.0f64),
        (0.0..1.0f64, 0.0..1.0f64),
        prop_oneof![Just(0.0), 0.001..0.2f64],
    )
        .prop_map(|(start, end, duration)| {
            Saccade::between(start, end, duration, 0.0, ScreenSize::new(1280.0, 1024.0).unwrap())
        })
}

fn events() -> impl Strategy<Value = OcularEvents> {
    (
        prop::collection::vec(fixation(), 0..30),
        prop::collection::vec(saccade(), 0..30),
        prop::collection::vec((0.01..0.5f64, 0.0..100.0f64), 0..10),
    )
        .prop_map(|(fixations, saccades, blinks)| {
            let blinks = blinks.into_iter().map(|(d, s)| Blink::new(d, s)).collect();
            OcularEvents::new(fixations, saccades, blinks)
        })
}

proptest! {
    #[test]
    fn prop_arrays_are_never_empty_and_aligned(events in events()) {
        let screen = ScreenSize::new(1280.0, 1024.0).unwrap();
        let features = GlobalFeatures::generate(&events, screen, None).unwrap();

        let n_saccades = events.saccades.len().max(1);
        prop_assert_eq!(features.fixation_count, events.fixations.len());
        prop_assert_eq!(features.blink_count, events.blinks.len());
        prop_assert_eq!(features.fixation_durations.len(), events.fixations.len().max(1));
        prop_assert_eq!(features.blink_durations.len(), events.blinks.len().max(1));
        prop_assert_eq!(features.distances.len(), n_saccades);
        prop_assert_eq!(features.horizontal_velocities.len(), n_saccades);
        prop_assert_eq!(features.saccade_directions.len(), n_saccades);
    }

    #[test]
    fn prop_velocities_are_finite(events in events()) {
        let screen = ScreenSize::new(1280.0, 1024.0).unwrap();
        let features = GlobalFeatures::generate(&events, screen, Some(60.0)).unwrap();

        for v in features
            .velocities
            .iter()
            .chain(&features.horizontal_velocities)
            .chain(&features.vertical_velocities)
        {
            prop_assert!(v.is_finite() && *v >= 0.0);
        }
        prop_assert!(features.regression_rate >= 0.0);
        prop_assert!(features.regression_count <= events.saccades.len().max(1));
        prop_assert!(features.normalized.is_some());
    }
}
