use std::time::{Duration, Instant};

use chromatix::toast::ToastQueue;

const DURATION: Duration = Duration::from_millis(3000);

fn messages(queue: &ToastQueue, now: Instant) -> Vec<String> {
    queue.visible(now).map(|t| t.message.clone()).collect()
}

#[test]
fn test_toast_expires_after_duration() {
    let t0 = Instant::now();
    let mut queue = ToastQueue::new(DURATION, 3);
    queue.push("Carousel started", t0);

    assert_eq!(
        messages(&queue, t0 + DURATION / 2),
        vec!["Carousel started"]
    );
    assert!(messages(&queue, t0 + DURATION).is_empty());

    queue.prune(t0 + DURATION);
    assert!(queue.is_empty());
}

#[test]
fn test_oldest_toast_dropped_when_full() {
    let t0 = Instant::now();
    let mut queue = ToastQueue::new(DURATION, 2);
    queue.push("one", t0);
    queue.push("two", t0);
    queue.push("three", t0);

    assert_eq!(messages(&queue, t0), vec!["two", "three"]);
}

#[test]
fn test_expired_toasts_free_capacity() {
    let t0 = Instant::now();
    let mut queue = ToastQueue::new(DURATION, 2);
    queue.push("old", t0);
    queue.push("older", t0);

    let later = t0 + DURATION + Duration::from_millis(1);
    queue.push("fresh", later);
    assert_eq!(messages(&queue, later), vec!["fresh"]);
}

#[test]
fn test_clear() {
    let t0 = Instant::now();
    let mut queue = ToastQueue::default();
    queue.push("a", t0);
    queue.clear();
    assert!(queue.is_empty());
}
