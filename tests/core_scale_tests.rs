use approx::assert_relative_eq;
use streamchart::core::{LinearScale, non_degenerate_range, optimal_tick_count, scale_value};

#[test]
fn scale_value_maps_endpoints() {
    assert_eq!(scale_value(0.0, 0.0, 100.0, 40.0, 560.0), 40.0);
    assert_eq!(scale_value(100.0, 0.0, 100.0, 40.0, 560.0), 560.0);
    assert_eq!(scale_value(50.0, 0.0, 100.0, 260.0, 40.0), 150.0);
}

#[test]
fn scale_value_round_trip_within_tolerance() {
    let original = 42.5;
    let px = scale_value(original, 10.0, 110.0, 0.0, 800.0);
    let recovered = scale_value(px, 0.0, 800.0, 10.0, 110.0);
    assert_relative_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn collapsed_range_widens_by_one() {
    assert_eq!(non_degenerate_range(5.0, 5.0), (5.0, 6.0));
    assert_eq!(non_degenerate_range(1.0, 3.0), (1.0, 3.0));
}

#[test]
fn linear_scale_rejects_degenerate_domain() {
    assert!(LinearScale::new(1.0, 1.0, 0.0, 100.0).is_err());
    assert!(LinearScale::new(0.0, f64::NAN, 0.0, 100.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, 50.0, 50.0).is_err());
}

#[test]
fn guarded_scale_accepts_collapsed_bounds() {
    let scale = LinearScale::guarded(7.0, 7.0, 100.0, 100.0).expect("guarded");
    assert_eq!(scale.domain(), (7.0, 8.0));
    assert_eq!(scale.range(), (100.0, 101.0));
}

#[test]
fn linear_scale_round_trip() {
    let scale = LinearScale::new(1_700_000_000_000.0, 1_700_000_600_000.0, 40.0, 560.0)
        .expect("scale");
    let px = scale.domain_to_pixel(1_700_000_123_000.0).expect("to pixel");
    let back = scale.pixel_to_domain(px).expect("to domain");
    assert_relative_eq!(back, 1_700_000_123_000.0, max_relative = 1e-12);
}

#[test]
fn non_finite_inputs_are_rejected_by_checked_scale() {
    let scale = LinearScale::new(0.0, 1.0, 0.0, 1.0).expect("scale");
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
    assert!(scale.pixel_to_domain(f64::NAN).is_err());
}

#[test]
fn tick_count_targets_fifty_pixels() {
    assert_eq!(optimal_tick_count(600.0), 12);
    assert_eq!(optimal_tick_count(60.0), 2);
    assert_eq!(optimal_tick_count(0.0), 2);
}
