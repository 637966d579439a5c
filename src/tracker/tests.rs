use super::*;
use crate::angle::angular_difference;

fn deg(v: f32) -> f32 {
    v.to_radians()
}

fn left_default() -> PolarLine {
    PolarLine::new(100.0, deg(20.0))
}

fn right_default() -> PolarLine {
    PolarLine::new(-50.0, deg(150.0))
}

fn tracker(limit_deg: f32, reset_trigger: u32) -> LineTracker {
    let mut t = LineTracker::new(TrackerParams {
        angle_jump_limit_left_deg: limit_deg,
        angle_jump_limit_right_deg: limit_deg,
        reset_trigger,
    })
    .unwrap();
    t.seed(left_default(), right_default());
    t
}

#[test]
fn update_before_seeding_is_an_error() {
    let mut t = LineTracker::new(TrackerParams::default()).unwrap();
    assert_eq!(
        t.update(&[]).unwrap_err(),
        ConfigurationError::MissingDefaultLines
    );
}

#[test]
fn invalid_jump_limit_is_rejected() {
    let params = TrackerParams {
        angle_jump_limit_left_deg: 0.0,
        ..Default::default()
    };
    assert!(LineTracker::new(params).is_err());
}

#[test]
fn smallest_deviation_wins() {
    let mut t = tracker(10.0, 3);
    let far = PolarLine::new(90.0, deg(27.0));
    let near = PolarLine::new(95.0, deg(22.0));
    let out = t.update(&[far, near]).unwrap();
    assert_eq!(out[0].event, TrackEvent::Updated);
    assert_eq!(out[0].line, near);
    assert!((out[0].deviation.unwrap() - deg(2.0)).abs() < 1e-5);
    assert_eq!(out[1].event, TrackEvent::Missed);
    assert_eq!(out[1].line, right_default());
}

#[test]
fn candidate_outside_both_windows_is_discarded() {
    let mut t = tracker(5.0, 3);
    let out = t.update(&[PolarLine::new(10.0, deg(90.0))]).unwrap();
    assert_eq!(out[0].event, TrackEvent::Missed);
    assert_eq!(out[1].event, TrackEvent::Missed);
    assert_eq!(out[0].misses, 1);
    assert_eq!(out[0].line, left_default());
    assert!(out[0].draw);
}

#[test]
fn shared_candidate_goes_to_closer_side() {
    let mut t = LineTracker::new(TrackerParams {
        angle_jump_limit_left_deg: 40.0,
        angle_jump_limit_right_deg: 40.0,
        reset_trigger: 3,
    })
    .unwrap();
    t.seed(PolarLine::new(0.0, deg(60.0)), PolarLine::new(0.0, deg(100.0)));
    let c = PolarLine::new(5.0, deg(85.0));
    let out = t.update(&[c]).unwrap();
    assert_eq!(out[0].event, TrackEvent::Missed);
    assert_eq!(out[1].event, TrackEvent::Updated);
    assert_eq!(out[1].line, c);
}

#[test]
fn acceptance_window_wraps_at_theta_seam() {
    let mut t = LineTracker::new(TrackerParams::default()).unwrap();
    t.seed(PolarLine::new(30.0, deg(0.5)), PolarLine::new(0.0, deg(120.0)));
    let c = PolarLine::new(-31.0, deg(178.0));
    let out = t.update(&[c]).unwrap();
    assert_eq!(out[0].event, TrackEvent::Updated);
    assert_eq!(out[0].line, c);
}

#[test]
fn side_resets_after_trigger_plus_one_misses() {
    let reset_trigger = 4;
    let mut t = tracker(8.0, reset_trigger);
    // Move the left line away from its default first.
    let moved = PolarLine::new(110.0, deg(26.0));
    t.update(&[moved]).unwrap();
    assert_eq!(t.state(Side::Left).unwrap().line(), moved);

    let keep_right = PolarLine::new(-50.0, deg(150.0));
    for frame in 1..=reset_trigger + 1 {
        let out = t.update(&[keep_right]).unwrap();
        if frame <= reset_trigger {
            assert_eq!(out[0].event, TrackEvent::Missed, "frame {frame}");
            assert_eq!(out[0].misses, frame);
            assert_eq!(out[0].line, moved);
        } else {
            assert_eq!(out[0].event, TrackEvent::Reset);
            assert_eq!(out[0].line, left_default());
            assert_eq!(out[0].misses, 0);
            assert!(!out[0].draw);
        }
        assert_eq!(out[1].event, TrackEvent::Updated);
    }
    let left = t.state(Side::Left).unwrap();
    assert_eq!(left.misses(), 0);
    assert_eq!(left.angle(), left.default_angle());

    // The draw flag only stays down for the reset frame.
    let out = t.update(&[]).unwrap();
    assert!(out[0].draw);
    assert_eq!(out[0].misses, 1);
}

#[test]
fn accepted_update_clears_miss_counter() {
    let mut t = tracker(8.0, 5);
    t.update(&[]).unwrap();
    t.update(&[]).unwrap();
    assert_eq!(t.state(Side::Left).unwrap().misses(), 2);
    let out = t.update(&[PolarLine::new(100.0, deg(21.0))]).unwrap();
    assert_eq!(out[0].misses, 0);
    assert_eq!(out[1].misses, 3);
}

#[test]
fn smooth_drift_is_tracked_without_reset() {
    let mut t = tracker(5.0, 2);
    let right = PolarLine::new(-50.0, deg(150.0));
    let mut angle = 20.0f32;
    for _ in 0..30 {
        angle += 1.5;
        let out = t
            .update(&[PolarLine::new(100.0, deg(angle)), right])
            .unwrap();
        assert_eq!(out[0].event, TrackEvent::Updated);
        assert_eq!(out[1].event, TrackEvent::Updated);
    }
    let left = t.state(Side::Left).unwrap();
    assert!(angular_difference(left.angle(), deg(65.0)) < 1e-4);
}

#[test]
fn reset_to_default_restores_both_sides() {
    let mut t = tracker(10.0, 5);
    t.update(&[PolarLine::new(80.0, deg(25.0)), PolarLine::new(-40.0, deg(145.0))])
        .unwrap();
    t.reset_to_default();
    assert_eq!(t.state(Side::Left).unwrap().line(), left_default());
    assert_eq!(t.state(Side::Right).unwrap().line(), right_default());
    assert!(!t.state(Side::Right).unwrap().draw());
}
