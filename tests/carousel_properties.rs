//! Property suite for the carousel controller: bounds, consumption,
//! snapping, visibility, and the worked numeric example.

use marquee::prelude::*;

/// Deterministic pseudo-random f32 in [-1, 1].
fn next_unit(seed: &mut u64) -> f32 {
    *seed = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    let bits = (*seed >> 40) as u32;
    bits as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
}

#[test]
fn offset_stays_in_bounds_for_any_delta_sequence() {
    let mut state = CarouselState::new(5, 400.0);
    let mut seed = 0x5eed_0001u64;
    for _ in 0..10_000 {
        let delta = next_unit(&mut seed) * 900.0;
        state.apply_delta(delta);
        assert!(
            state.offset() >= state.lower_bound() && state.offset() <= state.upper_bound(),
            "offset {} escaped [{}, {}]",
            state.offset(),
            state.lower_bound(),
            state.upper_bound()
        );
    }
}

#[test]
fn interior_moves_consume_the_whole_delta() {
    let mut state = CarouselState::new(5, 400.0);
    let mut seed = 0x5eed_0002u64;
    let mut checked = 0;
    for _ in 0..10_000 {
        let before = state.offset();
        let delta = next_unit(&mut seed) * 500.0;
        let consumed = state.apply_delta(delta);
        let after = state.offset();
        let interior = |v: f32| v > state.lower_bound() && v < state.upper_bound();
        if interior(before) && interior(after) {
            assert!(
                (consumed - delta).abs() < 1e-3,
                "interior move consumed {consumed} of {delta}"
            );
            checked += 1;
        }
    }
    assert!(checked > 100, "too few interior moves exercised: {checked}");
}

#[test]
fn settle_target_is_a_clamped_spacing_multiple() {
    let mut state = CarouselState::new(5, 400.0);
    let physics = ExponentialDecay::DEFAULT;
    let mut seed = 0x5eed_0003u64;
    for _ in 0..2_000 {
        state.set_offset(next_unit(&mut seed) * 3000.0);
        let velocity = next_unit(&mut seed) * 20_000.0;
        let target = state.settle_target(velocity, &physics);
        assert!(target >= state.lower_bound() && target <= state.upper_bound());
        let ratio = target / state.item_spacing();
        assert!(
            (ratio - ratio.round()).abs() < 1e-4,
            "settle target {target} is not a multiple of 400"
        );
    }
}

#[test]
fn opacity_is_one_exactly_for_the_in_range_window() {
    let mut state = CarouselState::new(12, 400.0);
    let mut seed = 0x5eed_0004u64;
    for _ in 0..2_000 {
        state.set_offset(next_unit(&mut seed) * 4800.0);
        let fraction = state.index_fraction();
        let mut visible = 0;
        for index in 0..state.item_count() {
            let expected_in_range = (index as f32 - fraction).abs() <= 1.0;
            let visibility = state.slide_visibility(index);
            assert_eq!(
                visibility.opacity == 1.0,
                expected_in_range,
                "index {index} at fraction {fraction}"
            );
            if visibility.opacity == 1.0 {
                visible += 1;
            }
        }
        assert!(visible <= 3, "{visible} slides visible at fraction {fraction}");
    }
}

#[test]
fn item_zero_rests_at_the_origin() {
    let state = CarouselState::new(5, 400.0);
    assert_eq!(state.offset(), 0.0);
    assert_eq!(state.distance_from_center(0), 0.0);
    let placement = state.poster_placement(0, 55.0);
    assert_eq!((placement.x, placement.y), (0.0, 0.0));
}

#[test]
fn worked_example_from_the_numbers() {
    let mut state = CarouselState::new(5, 400.0);

    let consumed = state.apply_delta(-150.0);
    assert_eq!(state.offset(), -150.0);
    assert_eq!(consumed, -150.0);

    let past = state.slide_visibility(0);
    assert_eq!(past.opacity, 1.0);
    assert!((past.clip_start - 0.375).abs() < 1e-6);
    assert_eq!(past.clip_end, 1.0);

    // The entering window follows the clip formula; together with the
    // outgoing window it covers the slide exactly.
    let entering = state.slide_visibility(1);
    assert_eq!(entering.opacity, 1.0);
    assert_eq!(entering.clip_start, 0.0);
    assert!((entering.clip_end - 0.375).abs() < 1e-6);
    assert!(((past.clip_end - past.clip_start) + (entering.clip_end - entering.clip_start) - 1.0)
        .abs()
        < 1e-6);

    assert_eq!(state.slide_visibility(2).opacity, 0.0);

    let consumed = state.apply_delta(-2500.0);
    assert_eq!(state.offset(), -2000.0);
    assert_eq!(consumed, -1850.0);
}

#[test]
fn predicted_rest_position_rounds_to_nearest_item() {
    // A physics strategy predicting a rest position of -430 snaps to -400.
    struct PredictRest(f32);
    impl FlingPhysics for PredictRest {
        fn project(&self, _velocity: f32) -> f32 {
            self.0
        }
    }
    let state = CarouselState::new(5, 400.0);
    assert_eq!(state.settle_target(-800.0, &PredictRest(-430.0)), -400.0);
}

#[test]
fn clip_windows_partition_every_offset() {
    let mut state = CarouselState::new(8, 400.0);
    for step in 0..=320 {
        state.set_offset(-(step as f32) * 10.0);
        let fraction = state.index_fraction();
        let lower = fraction.floor() as usize;
        let upper = lower + 1;
        if upper >= state.item_count() {
            continue;
        }
        let out = state.slide_visibility(lower);
        let inc = state.slide_visibility(upper);
        let covered = (out.clip_end - out.clip_start) + (inc.clip_end - inc.clip_start);
        assert!((covered - 1.0).abs() < 1e-4, "coverage {covered} at fraction {fraction}");
        assert!((out.clip_start - inc.clip_end).abs() < 1e-4);
    }
}
