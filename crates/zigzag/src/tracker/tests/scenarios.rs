use super::*;
use crate::tracker::types::{Phase, Violation};

/// Three points where #3 is well clear of the #1 → #2 diagonal.
fn clear_layout() -> Vec<Point> {
    vec![pt(1, 1, 1), pt(6, 6, 2), pt(4, 1, 3)]
}

/// Three points where #3 sits on the #1 → #2 diagonal.
fn blocked_layout() -> Vec<Point> {
    vec![pt(1, 1, 1), pt(6, 6, 2), pt(3, 3, 3)]
}

#[test]
fn press_on_first_point_starts_path() {
    let mut t = tracker(1, 1, clear_layout());
    let outcome = t.pointer_down(at(1.0, 1.0), Instant::now());

    assert_eq!(outcome, Outcome::DragStarted { from: 1 });
    assert_eq!(t.phase(), Phase::Dragging);
    assert_eq!(t.current_point(), 2);
    assert_eq!(t.path().len(), 1);
    assert_eq!(t.path()[0].number, 1);
}

#[test]
fn press_slightly_off_center_still_hits() {
    let mut t = tracker(1, 1, clear_layout());
    let outcome = t.pointer_down(at(1.1, 0.95), Instant::now());
    assert_eq!(outcome, Outcome::DragStarted { from: 1 });
}

#[test]
fn press_outside_detection_radius_is_ignored() {
    let mut t = tracker(1, 1, clear_layout());
    let outcome = t.pointer_down(at(1.3, 1.0), Instant::now());
    assert_eq!(outcome, Outcome::NoOp);
    assert_eq!(t.phase(), Phase::Idle);
    assert!(t.path().is_empty());
}

#[test]
fn press_on_other_point_with_empty_path_is_ignored() {
    let mut t = tracker(3, 3, clear_layout());
    let outcome = t.pointer_down(at(6.0, 6.0), Instant::now());
    assert_eq!(outcome, Outcome::NoOp);
    assert_eq!(t.current_point(), 1);
    // Not a failure either.
    assert_eq!(t.level(), 3);
}

#[test]
fn moving_without_press_is_ignored() {
    let mut t = tracker(1, 1, clear_layout());
    assert_eq!(t.pointer_move(at(6.0, 6.0), Instant::now()), Outcome::NoOp);
    assert!(t.path().is_empty());
}

#[test]
fn straight_drag_past_clear_point_succeeds() {
    let mut t = tracker(1, 1, clear_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);

    let outcome = drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);
    assert_eq!(outcome, Outcome::Advanced { number: 2 });
    assert_eq!(t.current_point(), 3);
    assert_eq!(t.last_accepted().map(|p| p.number), Some(2));
}

#[test]
fn straight_drag_over_blocking_point_fails() {
    let mut t = tracker(1, 1, blocked_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);

    let outcome = drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);
    assert_eq!(
        outcome,
        Outcome::WrongConnection {
            number: 3,
            violation: Violation::Crossed
        }
    );
    assert_eq!(t.phase(), Phase::Failed);
    assert!(t.points()[2].is_error);
    assert_eq!(t.path().len(), 1);
}

#[test]
fn near_miss_warns_without_failing() {
    // #3 is 0.25 from the #1 → #2 line: inside the warning band, outside the
    // intersection band.
    let points = vec![pt(1, 1, 1), pt(6, 1, 2), pt(3, 1, 3)];
    let mut t = tracker(1, 1, points);
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);

    let outcome = t.pointer_move(at(5.0, 1.25), now);
    // Segment (1,1)-(5,1.25) passes (3, 1.125): 0.125 off, too close.
    assert!(matches!(outcome, Outcome::WrongConnection { .. }));

    let mut t = tracker(1, 1, vec![pt(1, 1, 1), pt(6, 1, 2), pt(3, 2, 3)]);
    t.pointer_down(at(1.0, 1.0), now);
    let outcome = t.pointer_move(at(5.0, 2.5), now);
    // Segment (1,1)-(5,2.5) passes x=3 at y=1.75, so #3 is ~0.23 away.
    assert_eq!(outcome, Outcome::NearMiss { near: vec![3] });
    assert!(t.is_near(3));
    assert!(t.is_dragging());
}

#[test]
fn landing_on_out_of_order_point_fails() {
    let points = vec![pt(1, 1, 1), pt(6, 6, 2), pt(4, 1, 3)];
    let mut t = tracker(5, 5, points);
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);

    let outcome = drag_line(&mut t, at(1.0, 1.0), at(4.0, 1.0), now);
    assert!(matches!(
        outcome,
        Outcome::WrongConnection { number: 3, .. }
    ));
    assert_eq!(t.level(), 1);
    assert_eq!(t.best_level(), 5);
}

#[test]
fn jumping_onto_wrong_point_reports_wrong_point() {
    // Corridor on and wide, so only the landing test can catch it.
    let config = TrackerConfig {
        path_corridor_width: Some(8.0),
        ..TrackerConfig::default()
    };
    let points = vec![pt(1, 1, 1), pt(6, 1, 2), pt(4, 1, 3)];
    let mut t = PathTracker::with_layout(config, Progress::default(), points);
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);

    let outcome = t.pointer_move(at(4.0, 1.05), now);
    assert_eq!(
        outcome,
        Outcome::WrongConnection {
            number: 3,
            violation: Violation::WrongPoint
        }
    );
}

#[test]
fn hovering_back_over_path_is_harmless() {
    let mut t = tracker(1, 1, clear_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);
    drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);

    // Back towards #1 along the diagonal.
    let outcome = drag_line(&mut t, at(6.0, 6.0), at(1.0, 1.0), now);
    assert_eq!(outcome, Outcome::NoOp);
    assert!(t.is_dragging());
    assert_eq!(t.current_point(), 3);
}

#[test]
fn completing_all_points_advances_level() {
    let mut t = tracker(1, 1, clear_layout());
    let outcome = solve(&mut t, Instant::now());

    assert_eq!(outcome, Outcome::LevelComplete { level: 2 });
    assert_eq!(t.phase(), Phase::Completed);
    assert_eq!(t.level(), 2);
    assert_eq!(t.best_level(), 2);
    assert_eq!(t.path().len(), 3);
}

#[test]
fn completing_below_best_keeps_best() {
    let mut t = tracker(1, 7, clear_layout());
    solve(&mut t, Instant::now());
    assert_eq!(t.level(), 2);
    assert_eq!(t.best_level(), 7);
}

#[test]
fn completing_at_best_raises_best() {
    let mut t = tracker(7, 7, clear_layout());
    solve(&mut t, Instant::now());
    assert_eq!(t.level(), 8);
    assert_eq!(t.best_level(), 8);
}

#[test]
fn release_before_last_point_fails() {
    let mut t = tracker(9, 9, clear_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);
    drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);

    assert_eq!(t.pointer_up(now), Outcome::Abandoned);
    assert_eq!(t.phase(), Phase::Failed);
    assert_eq!(t.level(), 1);
    assert_eq!(t.best_level(), 9);
    assert!(t.near_points().is_empty());
}

#[test]
fn release_right_after_press_fails() {
    let mut t = tracker(2, 2, clear_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);
    assert_eq!(t.pointer_up(now), Outcome::Abandoned);
    assert_eq!(t.level(), 1);
}

#[test]
fn release_without_drag_is_ignored() {
    let mut t = tracker(4, 4, clear_layout());
    assert_eq!(t.pointer_up(Instant::now()), Outcome::NoOp);
    assert_eq!(t.level(), 4);
}

#[test]
fn release_after_completion_is_ignored() {
    let mut t = tracker(1, 1, clear_layout());
    let now = Instant::now();
    solve(&mut t, now);
    assert_eq!(t.pointer_up(now), Outcome::NoOp);
    assert_eq!(t.level(), 2);
}

#[test]
fn input_after_failure_is_ignored_until_new_layout() {
    let mut t = tracker(1, 1, blocked_layout());
    let now = Instant::now();
    t.pointer_down(at(1.0, 1.0), now);
    drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);
    assert_eq!(t.phase(), Phase::Failed);

    assert_eq!(t.pointer_down(at(1.0, 1.0), now), Outcome::NoOp);
    assert_eq!(t.pointer_move(at(6.0, 6.0), now), Outcome::NoOp);
    assert_eq!(t.pointer_up(now), Outcome::NoOp);
}

#[test]
fn path_is_always_a_prefix_in_order() {
    let points = vec![pt(1, 1, 1), pt(1, 6, 2), pt(6, 6, 3), pt(6, 1, 4)];
    let mut t = tracker(2, 2, points);
    let now = Instant::now();
    let centers: Vec<GridPos> = t.points().iter().map(Point::center).collect();

    t.pointer_down(centers[0], now);
    for (i, pair) in centers.windows(2).enumerate() {
        drag_line(&mut t, pair[0], pair[1], now);
        let numbers: Vec<u32> = t.path().iter().map(|p| p.number).collect();
        assert_eq!(numbers, (1..=i as u32 + 2).collect::<Vec<_>>());
        assert_eq!(t.current_point(), i as u32 + 3);
    }
    assert_eq!(t.level(), 3);
}

#[test]
fn failure_resets_level_regardless_of_prior_level() {
    for level in [1, 2, 10, 30] {
        let mut t = tracker(level, level, blocked_layout());
        let now = Instant::now();
        t.pointer_down(at(1.0, 1.0), now);
        drag_line(&mut t, at(1.0, 1.0), at(6.0, 6.0), now);
        assert_eq!(t.level(), 1, "from level {level}");
        assert_eq!(t.best_level(), level);
    }
}

#[test]
fn fixed_layout_is_renumbered_in_order() {
    let points = vec![pt(4, 1, 30), pt(1, 1, 10), pt(6, 6, 20)];
    let t = tracker(1, 1, points);
    let numbers: Vec<(u32, u32, u32)> = t.points().iter().map(|p| (p.x, p.y, p.number)).collect();
    assert_eq!(numbers, vec![(1, 1, 1), (6, 6, 2), (4, 1, 3)]);
}
