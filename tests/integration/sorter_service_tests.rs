//! Integration tests for the SorterService → ports pipeline.
//!
//! These run on the host (x86_64) against the fake-clock mock and check
//! the handler sequences call for call, the classification boundary, the
//! averaging reader, and debounce behaviour through `poll`.

use sorter::app::classify::Category;
use sorter::app::events::AppEvent;
use sorter::app::service::{PollOutcome, SorterService};
use sorter::config::SorterConfig;
use sorter::drivers::stepper::Direction;

use crate::mock_hw::{HwCall, LogSink, MockHardware};

fn make_app() -> (SorterService, MockHardware, LogSink) {
    let app = SorterService::new(SorterConfig::default()).unwrap();
    (app, MockHardware::new(), LogSink::new())
}

fn servo_cycle() -> [HwCall; 4] {
    [
        HwCall::SetAngle(180),
        HwCall::Sleep(1000),
        HwCall::SetAngle(70),
        HwCall::Sleep(1000),
    ]
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_parks_flap_at_rest() {
    let (mut app, mut hw, mut sink) = make_app();

    app.start(&mut hw, &mut sink);

    assert_eq!(hw.calls, servo_cycle().to_vec());
    assert_eq!(hw.last_angle(), Some(70));
    assert_eq!(sink.events, vec![AppEvent::Started]);
}

// ── Proximity sequence ────────────────────────────────────────

#[test]
fn proximity_sequence_call_order() {
    let (mut app, mut hw, mut sink) = make_app();

    app.handle_proximity(&mut hw, &mut sink);

    let mut expected = vec![
        HwCall::Tone {
            freq_hz: 1000,
            duration_ms: 1000,
        },
        HwCall::Rotate {
            direction: Direction::Clockwise,
            degrees: 240,
        },
        HwCall::Sleep(1000),
    ];
    expected.extend(servo_cycle());
    expected.extend([
        HwCall::Rotate {
            direction: Direction::CounterClockwise,
            degrees: 240,
        },
        HwCall::Sleep(1000),
    ]);
    assert_eq!(hw.calls, expected);

    assert_eq!(
        sink.lines,
        vec![
            "Proximity detected -> welcome sequence",
            "Proximity sequence done"
        ]
    );
}

#[test]
fn proximity_sequence_is_net_zero_and_ends_at_rest() {
    let (mut app, mut hw, mut sink) = make_app();

    for _ in 0..3 {
        app.handle_proximity(&mut hw, &mut sink);
        assert_eq!(hw.net_rotation(), 0);
        assert_eq!(hw.last_angle(), Some(70));
    }
    assert_eq!(app.stats().proximity_sequences, 3);
}

#[test]
fn proximity_sequence_blocks_for_its_delays() {
    let (mut app, mut hw, mut sink) = make_app();
    let before = hw.now_ms;

    app.handle_proximity(&mut hw, &mut sink);

    // Two diverter settles plus two servo settles.
    assert_eq!(hw.now_ms - before, 4000);
}

// ── Infrared / classification ─────────────────────────────────

#[test]
fn dry_item_end_to_end() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.moisture_raw = 504;

    let category = app.handle_infrared(&mut hw, &mut sink);

    assert_eq!(category, Category::Dry);
    assert_eq!(
        sink.lines,
        vec![
            "IR detected -> start classification",
            "AnalogPercent: 96%",
            "Classified as category A (dry) -> actuate diverter short",
        ]
    );

    let mut expected = vec![
        HwCall::Tone {
            freq_hz: 1000,
            duration_ms: 500,
        },
        HwCall::Rotate {
            direction: Direction::Clockwise,
            degrees: 120,
        },
    ];
    expected.extend(servo_cycle().iter().copied().filter(|c| !matches!(c, HwCall::Sleep(_))));
    expected.push(HwCall::Rotate {
        direction: Direction::CounterClockwise,
        degrees: 120,
    });
    assert_eq!(hw.actuations(), expected);
    assert_eq!(hw.net_rotation(), 0);
    assert_eq!(app.stats().dry_items, 1);
    assert_eq!(app.stats().wet_items, 0);
}

#[test]
fn wet_item_alerts_twice_without_rotation() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.moisture_raw = 1023; // 0 %

    let category = app.handle_infrared(&mut hw, &mut sink);

    assert_eq!(category, Category::Wet);
    assert_eq!(
        sink.lines.last().map(String::as_str),
        Some("Classified as category B (wet) -> alert + single servo action")
    );

    let beep = HwCall::Tone {
        freq_hz: 1000,
        duration_ms: 500,
    };
    assert_eq!(
        hw.actuations(),
        vec![beep, beep, HwCall::SetAngle(180), HwCall::SetAngle(70)]
    );
    assert_eq!(hw.net_rotation(), 0);
    assert_eq!(app.stats().wet_items, 1);
}

#[test]
fn threshold_boundary_is_strict() {
    // raw → percent: 915 → 20, 910 → 21, 1023 → 0, 485 → 100.
    let cases = [
        (915, 20, Category::Wet),
        (910, 21, Category::Dry),
        (1023, 0, Category::Wet),
        (485, 100, Category::Dry),
    ];

    for (raw, percent, category) in cases {
        let (mut app, mut hw, mut sink) = make_app();
        hw.moisture_raw = raw;

        assert_eq!(app.handle_infrared(&mut hw, &mut sink), category, "raw {raw}");
        assert!(
            sink.events.contains(&AppEvent::MoistureMeasured { percent }),
            "raw {raw} should log {percent}%"
        );
    }
}

#[test]
fn out_of_window_raw_saturates() {
    let (app, mut hw, _sink) = make_app();

    hw.moisture_raw = 100;
    assert_eq!(app.read_percentage(&mut hw, 1), 100);

    hw.moisture_raw = 1023;
    assert_eq!(app.read_percentage(&mut hw, 1), 0);
}

// ── Averaging reader ──────────────────────────────────────────

#[test]
fn constant_raw_average_equals_single_sample() {
    let (app, mut hw, _sink) = make_app();
    hw.moisture_raw = 700;

    let single = app.read_percentage(&mut hw, 1);
    hw.clear();
    let before = hw.now_ms;
    let averaged = app.read_percentage(&mut hw, 3);

    assert_eq!(single, averaged);
    assert_eq!(hw.moisture_reads(), 3);
    assert!(hw.now_ms - before >= 225);
}

#[test]
fn average_truncates_across_samples() {
    let (app, mut hw, _sink) = make_app();
    // 100 %, 0 %, 0 % → 33 %.
    hw.queue_moisture(&[485, 1023, 1023]);

    let reading = app.read_moisture(&mut hw, 3);

    assert_eq!(reading.samples.as_slice(), &[100, 0, 0]);
    assert_eq!(reading.percent, 33);
}

#[test]
fn sample_count_is_bounded() {
    let (app, mut hw, _sink) = make_app();

    app.read_moisture(&mut hw, 0);
    assert_eq!(hw.moisture_reads(), 1);

    hw.clear();
    app.read_moisture(&mut hw, 200);
    assert_eq!(hw.moisture_reads(), 16);
}

// ── Polling and debounce ──────────────────────────────────────

#[test]
fn idle_poll_does_nothing() {
    let (mut app, mut hw, mut sink) = make_app();

    let outcome = app.poll(&mut hw, &mut sink);

    assert_eq!(outcome, PollOutcome::default());
    assert!(!outcome.any());
    assert!(hw.calls.is_empty());
    assert!(sink.lines.is_empty());
}

#[test]
fn held_proximity_fires_once_per_window() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.proximity = true;

    assert!(app.poll(&mut hw, &mut sink).proximity);
    let fired_at = app.sensor_state().proximity.last_trigger_ms();

    // The sequence itself advanced the clock by 4 s, so the next poll is
    // already outside the window and fires again.
    assert!(app.poll(&mut hw, &mut sink).proximity);
    assert!(app.sensor_state().proximity.last_trigger_ms() > fired_at);
    assert_eq!(app.stats().proximity_sequences, 2);
}

#[test]
fn trigger_inside_window_is_dropped() {
    let config = SorterConfig::default();
    let (mut app, mut hw, mut sink) = make_app();

    hw.infrared = true;
    hw.moisture_raw = 1023;
    assert!(app.poll(&mut hw, &mut sink).infrared);

    hw.infrared = true;
    hw.now_ms = app.sensor_state().infrared.last_trigger_ms() + config.debounce_ms;
    let before = sink.lines.len();
    let outcome = app.poll(&mut hw, &mut sink);

    // Exactly one window after the last trigger is still suppressed.
    assert!(!outcome.infrared);
    assert_eq!(sink.lines.len(), before);

    hw.advance(1);
    assert!(app.poll(&mut hw, &mut sink).infrared);
}

#[test]
fn both_sensors_run_back_to_back_proximity_first() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.proximity = true;
    hw.infrared = true;
    hw.moisture_raw = 504;

    let outcome = app.poll(&mut hw, &mut sink);

    assert!(outcome.proximity && outcome.infrared);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::ProximityDetected,
            AppEvent::ProximitySequenceDone,
            AppEvent::InfraredDetected,
            AppEvent::MoistureMeasured { percent: 96 },
            AppEvent::Classified(Category::Dry),
        ]
    );
    assert_eq!(hw.net_rotation(), 0);
    assert_eq!(hw.last_angle(), Some(70));
}

#[test]
fn infrared_pulse_during_a_sequence_is_missed() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.proximity = true;
    // Beam broken only while the welcome sequence is busy (4 s of settles).
    let begin = hw.now_ms;
    hw.ir_active_window = Some((begin + 100, begin + 3_900));

    let outcome = app.poll(&mut hw, &mut sink);

    assert!(outcome.proximity);
    assert!(!outcome.infrared);
    assert_eq!(hw.now_ms - begin, 4000);
    assert!(!sink.events.contains(&AppEvent::InfraredDetected));
    assert_eq!(hw.moisture_reads(), 0);

    // The pulse is over by the next iteration; nothing is replayed.
    hw.proximity = false;
    let outcome = app.poll(&mut hw, &mut sink);
    assert!(!outcome.any());
    assert_eq!(app.stats().dry_items + app.stats().wet_items, 0);
}

#[test]
fn infrared_still_active_after_a_sequence_is_seen_in_the_same_poll() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.proximity = true;
    let begin = hw.now_ms;
    // Held across the end of the sequence: picked up once it finishes.
    hw.ir_active_window = Some((begin + 100, begin + 5_000));

    let outcome = app.poll(&mut hw, &mut sink);

    assert!(outcome.proximity && outcome.infrared);
    assert_eq!(
        sink.events.iter().position(|e| *e == AppEvent::InfraredDetected),
        Some(2)
    );
}

#[test]
fn clock_wrap_does_not_block_triggers() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.now_ms = u32::MAX - 50;
    hw.infrared = true;

    // First trigger from a near-wrap timestamp.
    assert!(app.poll(&mut hw, &mut sink).infrared);
    // Sequence sleeps carried the clock past the wrap.
    assert!(hw.now_ms < 10_000);
    assert!(app.poll(&mut hw, &mut sink).infrared);
}
