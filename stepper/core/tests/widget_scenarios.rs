//! End-to-end widget behavior: bus in, animated value and step marker out.

use std::time::Duration;

use pretty_assertions::assert_eq;
use stepper_core::{
    ProgressBus, ProgressValue, ProgressWidget, UpdateEvent, UpdateKind, WidgetBuilder,
    WidgetMode, ARIA_CURRENT_STEP, MAX,
};
use tokio::time::{self, Instant};

const FOUR_STEPS: &str = "1. Cart\n2. Shipping\n3. Payment\n4. Review";

fn four_step_widget(bus: &ProgressBus) -> ProgressWidget {
    WidgetBuilder::new(bus).build(FOUR_STEPS)
}

/// Let every outstanding animation run to completion.
async fn settle() {
    time::sleep(Duration::from_secs(5)).await;
}

fn marked_steps(widget: &ProgressWidget) -> Vec<usize> {
    widget
        .steps()
        .map(|steps| {
            steps
                .iter()
                .filter(|s| s.aria_current() == Some(ARIA_CURRENT_STEP))
                .map(|s| s.index())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_build_centres_on_first_step() {
    let bus = ProgressBus::new();
    let widget = four_step_widget(&bus);

    assert_eq!(widget.mode(), WidgetMode::Stepped);
    assert_eq!(widget.step_weight(), 25.0);
    assert_eq!(widget.value().get(), 12.5);
    assert_eq!(widget.current_index(), Some(0));
    assert_eq!(marked_steps(&widget), vec![0]);
}

#[test]
fn test_initial_value_is_half_a_step() {
    let bus = ProgressBus::new();
    for n in 1..=7 {
        let content: String = (1..=n).map(|i| format!("- step {i}\n")).collect();
        let widget = WidgetBuilder::new(&bus).build(&content);
        let expected = MAX / (2.0 * n as f64);
        assert!((widget.value().get() - expected).abs() < 1e-9, "n = {n}");
        assert_eq!(widget.current_index(), Some(0));
    }
}

#[tokio::test(start_paused = true)]
async fn test_advance_animates_in_unit_ticks() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);
    let mut rx = widget.subscribe_value();
    rx.borrow_and_update();

    bus.publish(UpdateEvent::advance(1));
    assert_eq!(widget.process_pending(), 1);
    assert_eq!(widget.current_index(), Some(1));
    assert!(widget.is_animating());

    let start = Instant::now();
    let mut seen = vec![12.5];
    while *seen.last().unwrap() != 37.5 {
        rx.changed().await.unwrap();
        seen.push(rx.borrow_and_update().get());
    }

    assert!(seen.windows(2).all(|w| w[1] > w[0] && w[1] - w[0] <= 1.0));
    assert_eq!(seen.len(), 26);
    assert_eq!(start.elapsed(), Duration::from_millis(250));
    assert_eq!(marked_steps(&widget), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_advance_past_last_step_keeps_marker() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    widget.apply(&UpdateEvent::advance(3));
    settle().await;
    assert_eq!(widget.current_index(), Some(3));
    assert_eq!(widget.value().get(), 87.5);

    widget.apply(&UpdateEvent::advance(1));
    settle().await;
    assert_eq!(widget.current_index(), Some(3));
    assert_eq!(marked_steps(&widget), vec![3]);
    assert_eq!(widget.value(), ProgressValue::FULL);
}

#[tokio::test(start_paused = true)]
async fn test_retreat_past_first_step_keeps_marker() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    widget.apply(&UpdateEvent::retreat(2));
    settle().await;
    assert_eq!(widget.current_index(), Some(0));
    assert_eq!(widget.value(), ProgressValue::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_absolute_value_snaps() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);
    widget.apply(&UpdateEvent::advance(1));

    let kind = widget.apply(&UpdateEvent::value(90.0));
    assert_eq!(kind, UpdateKind::Absolute(ProgressValue::new(90.0)));
    assert_eq!(widget.value().get(), 90.0);
    assert!(!widget.is_animating());

    settle().await;
    assert_eq!(widget.value().get(), 90.0);
    assert_eq!(widget.current_index(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_any_state() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    widget.apply(&UpdateEvent::advance(2));
    time::sleep(Duration::from_millis(120)).await;
    widget.apply(&UpdateEvent::reset());
    assert_eq!(widget.value().get(), 12.5);
    assert_eq!(widget.current_index(), Some(0));

    settle().await;
    assert_eq!(widget.value().get(), 12.5);
    assert_eq!(marked_steps(&widget), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_newest_target_wins() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    bus.publish(UpdateEvent::advance(3));
    bus.publish(UpdateEvent::retreat(1));
    widget.process_pending();
    time::sleep(Duration::from_millis(30)).await;
    bus.publish(UpdateEvent::retreat(1));
    widget.process_pending();

    settle().await;
    assert_eq!(widget.current_index(), Some(1));
    // Both queued events applied before the first tick, so the retreat
    // target was computed from 12.5 and the advance never showed.
    assert_eq!(widget.value(), ProgressValue::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_animation_never_lands() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);
    let mut rx = widget.subscribe_value();

    widget.apply(&UpdateEvent::advance(3));
    time::sleep(Duration::from_millis(55)).await;
    let midway = widget.value().get();
    assert_eq!(midway, 17.5);

    widget.apply(&UpdateEvent::retreat(1));
    let mut last = midway;
    let deadline = Instant::now() + Duration::from_secs(5);
    while let Ok(Ok(())) = time::timeout_at(deadline, rx.changed()).await {
        last = rx.borrow_and_update().get();
        assert!(last <= midway, "superseded target leaked: {last}");
    }
    assert_eq!(last, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_value_stays_in_bounds_every_tick() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);
    let mut rx = widget.subscribe_value();

    let events = [
        UpdateEvent::advance(9),
        UpdateEvent::advance(2),
        UpdateEvent::retreat(7),
        UpdateEvent::value(250.0),
        UpdateEvent::advance(1),
        UpdateEvent::value(-40.0),
        UpdateEvent::retreat(3),
        UpdateEvent::reset(),
        UpdateEvent::advance(4),
    ];

    for event in events {
        widget.apply(&event);
        let v = widget.value().get();
        assert!((0.0..=MAX).contains(&v));

        let deadline = Instant::now() + Duration::from_millis(80);
        while let Ok(Ok(())) = time::timeout_at(deadline, rx.changed()).await {
            let v = rx.borrow_and_update().get();
            assert!((0.0..=MAX).contains(&v), "out of bounds: {v}");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_broadcast_moves_every_widget() {
    let bus = ProgressBus::new();
    let mut first = four_step_widget(&bus);
    let mut second = four_step_widget(&bus);
    let mut plain = WidgetBuilder::new(&bus).build("Syncing files");

    let result = bus.publish(UpdateEvent::advance(2));
    assert_eq!(result.delivered, 3);

    for widget in [&mut first, &mut second, &mut plain] {
        assert_eq!(widget.process_pending(), 1);
    }
    settle().await;

    assert_eq!(first.current_index(), Some(2));
    assert_eq!(second.current_index(), Some(2));
    assert_eq!(first.value(), second.value());
    assert_eq!(first.value().get(), 62.5);

    assert_eq!(plain.current_index(), None);
    assert_eq!(plain.value().get(), 20.0);
}

#[tokio::test(start_paused = true)]
async fn test_late_drain_matches_eager_drain() {
    let bus = ProgressBus::new();
    let mut eager = four_step_widget(&bus);
    let mut late = four_step_widget(&bus);

    for i in 0..70 {
        assert_eq!(bus.publish(UpdateEvent::value(f64::from(i))).delivered, 2);
        eager.process_pending();
    }
    bus.publish(UpdateEvent::advance(1));
    eager.process_pending();

    assert_eq!(late.process_pending(), 71);
    settle().await;

    assert_eq!(eager.current_index(), Some(1));
    assert_eq!(late.current_index(), eager.current_index());
    assert_eq!(eager.value().get(), 94.0);
    assert_eq!(late.value(), eager.value());
}

#[tokio::test(start_paused = true)]
async fn test_plain_mode_reset_returns_to_zero() {
    let bus = ProgressBus::new();
    let mut widget = WidgetBuilder::new(&bus).build("Uploading");

    widget.apply(&UpdateEvent::advance(5));
    settle().await;
    assert_eq!(widget.value().get(), 50.0);

    widget.apply(&UpdateEvent::reset());
    assert_eq!(widget.value(), ProgressValue::ZERO);
    assert_eq!(widget.text(), ["Uploading"]);
}

#[tokio::test]
async fn test_next_event_follows_the_bus() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    let event = UpdateEvent::from_json(r#"{"value": 42}"#).unwrap();
    let producer = bus.clone();
    tokio::spawn(async move {
        producer.publish(event);
    });

    assert_eq!(
        widget.next_event().await,
        Some(UpdateKind::Absolute(ProgressValue::new(42.0)))
    );
    assert_eq!(widget.value().get(), 42.0);
}

#[test]
fn test_malformed_events_are_ignored() {
    let bus = ProgressBus::new();
    let mut widget = four_step_widget(&bus);

    let only_steps = UpdateEvent::from_json(r#"{"steps": 2}"#).unwrap();
    assert_eq!(widget.apply(&only_steps), UpdateKind::Ignored);
    let negative = UpdateEvent::from_json(r#"{"progress": true, "steps": -1}"#).unwrap();
    assert_eq!(widget.apply(&negative), UpdateKind::Ignored);
    assert_eq!(widget.apply(&UpdateEvent::advance(0)), UpdateKind::Ignored);

    assert_eq!(widget.current_index(), Some(0));
    assert_eq!(widget.value().get(), 12.5);
}
