use std::time::{Duration, Instant};

use chromatix::rotation::{
    RotationController, RotationError, RotationPolicy, RotationState, StartOutcome, Tick,
};
use chromatix::selection::{ColorId, SelectionRegistry};

const INTERVAL: Duration = Duration::from_millis(5000);

fn selection(raw: &[&str]) -> SelectionRegistry {
    let mut reg = SelectionRegistry::new();
    for id in raw {
        reg.add(ColorId::from(*id));
    }
    reg
}

fn advanced_cursor(tick: Option<Tick>) -> usize {
    match tick {
        Some(Tick::Advanced { cursor, .. }) => cursor,
        other => panic!("expected an advance, got {other:?}"),
    }
}

#[test]
fn test_start_requires_two_colors() {
    let t0 = Instant::now();
    let mut rotation = RotationController::default();

    for raw in [&[][..], &["a"][..]] {
        let reg = selection(raw);
        let err = rotation.start(&reg, t0).unwrap_err();
        assert_eq!(
            err,
            RotationError::InsufficientSelection {
                required: 2,
                selected: raw.len(),
            }
        );
        assert_eq!(rotation.state(), RotationState::Stopped);
        assert!(rotation.next_deadline().is_none());
    }

    let reg = selection(&["a", "b"]);
    assert_eq!(rotation.start(&reg, t0), Ok(StartOutcome::Started));
    assert_eq!(rotation.cursor(), Some(0));
}

#[test]
fn test_start_while_running_is_noop() {
    let t0 = Instant::now();
    let reg = selection(&["a", "b", "c"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();
    rotation.poll(&reg, t0 + INTERVAL);

    let later = t0 + INTERVAL + Duration::from_millis(100);
    assert_eq!(
        rotation.start(&reg, later),
        Ok(StartOutcome::AlreadyRunning)
    );
    assert_eq!(rotation.cursor(), Some(1));
    assert_eq!(rotation.next_deadline(), Some(t0 + INTERVAL * 2));
}

#[test]
fn test_cursor_wraps_around() {
    let t0 = Instant::now();
    let reg = selection(&["a", "b", "c"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    let visited: Vec<usize> = (1..=6)
        .map(|n| advanced_cursor(rotation.poll(&reg, t0 + INTERVAL * n)))
        .collect();
    assert_eq!(visited, vec![1, 2, 0, 1, 2, 0]);
}

#[test]
fn test_tick_reports_selected_id() {
    let t0 = Instant::now();
    let reg = selection(&["c1", "c2"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    assert_eq!(
        rotation.poll(&reg, t0 + INTERVAL),
        Some(Tick::Advanced {
            cursor: 1,
            id: ColorId::from("c2"),
        })
    );
}

#[test]
fn test_no_tick_before_interval() {
    let t0 = Instant::now();
    let reg = selection(&["a", "b"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    assert_eq!(rotation.poll(&reg, t0 + INTERVAL / 2), None);
    assert_eq!(rotation.cursor(), Some(0));
}

#[test]
fn test_stop_before_first_tick_cancels_run() {
    let t0 = Instant::now();
    let reg = selection(&["a", "b"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    assert!(rotation.stop());
    for n in 1..=5 {
        assert_eq!(rotation.poll(&reg, t0 + INTERVAL * n), None);
    }
    assert!(!rotation.is_running());
    assert!(rotation.next_deadline().is_none());
}

#[test]
fn test_stop_is_idempotent() {
    let mut rotation = RotationController::default();
    assert!(!rotation.stop());
    assert!(!rotation.stop());
}

#[test]
fn test_restart_begins_at_first_color() {
    let t0 = Instant::now();
    let reg = selection(&["a", "b", "c"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();
    rotation.poll(&reg, t0 + INTERVAL);
    rotation.stop();

    let t1 = t0 + INTERVAL * 10;
    rotation.start(&reg, t1).unwrap();
    assert_eq!(rotation.cursor(), Some(0));
    assert_eq!(advanced_cursor(rotation.poll(&reg, t1 + INTERVAL)), 1);
}

#[test]
fn test_growing_selection_joins_rotation() {
    let t0 = Instant::now();
    let mut reg = selection(&["a", "b"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    assert_eq!(advanced_cursor(rotation.poll(&reg, t0 + INTERVAL)), 1);
    reg.add(ColorId::from("c"));
    assert_eq!(advanced_cursor(rotation.poll(&reg, t0 + INTERVAL * 2)), 2);
    assert_eq!(advanced_cursor(rotation.poll(&reg, t0 + INTERVAL * 3)), 0);
}

#[test]
fn test_emptied_selection_halts() {
    let t0 = Instant::now();
    let mut reg = selection(&["a", "b"]);
    let mut rotation = RotationController::default();
    rotation.start(&reg, t0).unwrap();

    reg.clear();
    assert_eq!(rotation.poll(&reg, t0 + INTERVAL), Some(Tick::Halted));
    assert!(!rotation.is_running());
}

#[test]
fn test_custom_policy() {
    let t0 = Instant::now();
    let policy = RotationPolicy {
        min_colors: 3,
        interval: Duration::from_millis(250),
    };
    let mut rotation = RotationController::new(policy);
    assert_eq!(rotation.policy(), policy);

    let reg = selection(&["a", "b"]);
    assert!(rotation.start(&reg, t0).is_err());

    let reg = selection(&["a", "b", "c"]);
    rotation.start(&reg, t0).unwrap();
    assert_eq!(
        rotation.next_deadline(),
        Some(t0 + Duration::from_millis(250))
    );
}

#[test]
fn test_insufficient_selection_message() {
    let err = RotationError::InsufficientSelection {
        required: 2,
        selected: 1,
    };
    assert_eq!(
        err.to_string(),
        "carousel needs at least 2 colors, 1 selected"
    );
}
