//! End-to-end tracking scenarios
//!
//! Runs complete event streams through the public API and pins the
//! clustering outcomes: cluster formation and separation, retirement,
//! per-run bookkeeping, determinism, and serialization of the results.

use particle_tracking_rs::{
    track_particles, Event, InputError, ParticleId, ParticleRecord, ParticleTracker, TrackError,
    TrackerParams,
};

fn ev(x: i32, y: i32, t: f64) -> Event {
    Event::new(x, y, t)
}

/// A slow drift in space and time stays one particle.
#[test]
fn test_drifting_events_form_single_particle() {
    let params = TrackerParams::new(5.0, 50.0, 0.1, 0).unwrap();
    let events = [ev(0, 0, 0.0), ev(1, 1, 10.0), ev(2, 2, 20.0)];

    let records = track_particles(&events, &params).unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, ParticleId(1));
    assert_eq!(record.mass(), 3);
    assert_eq!(record.events, events);

    // Centroid history tracks the running mean over the recent buffer.
    assert_eq!(record.centroid_history.len(), 3);
    let expected = [(0.0, 0.0, 0.0), (10.0, 0.5, 0.5), (20.0, 1.0, 1.0)];
    for (snap, (t, x, y)) in record.centroid_history.iter().zip(expected) {
        assert_eq!(snap.t, t);
        assert!((snap.x - x).abs() < 1e-10);
        assert!((snap.y - y).abs() < 1e-10);
    }
}

/// The same drift with a near-1 threshold splits into one particle per event.
#[test]
fn test_strict_threshold_keeps_events_separate() {
    let params = TrackerParams::new(5.0, 50.0, 0.999999, 0).unwrap();
    let events = [ev(0, 0, 0.0), ev(1, 1, 10.0), ev(2, 2, 20.0)];

    let records = track_particles(&events, &params).unwrap();

    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.id, ParticleId(i as u32 + 1));
        assert_eq!(record.mass(), 1);
        assert_eq!(record.centroid_history.len(), 1);
    }
}

/// Events far apart in space never associate: the affinity underflows to
/// exactly zero, which no positive threshold accepts.
#[test]
fn test_distant_events_never_associate() {
    let params = TrackerParams::new(5.0, 50.0, 1e-9, 0).unwrap();
    let events = [ev(0, 0, 0.0), ev(1000, 1000, 0.0)];

    let records = track_particles(&events, &params).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, ParticleId(1));
    assert_eq!(records[1].id, ParticleId(2));
}

/// An isolated event spawns a particle that the final mass sweep removes.
#[test]
fn test_isolated_event_retired_by_final_sweep() {
    let params = TrackerParams::new(5.0, 50.0, 0.5, 1).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let records = tracker.track(&[ev(7, 7, 0.0)]).unwrap();

    assert!(records.is_empty());
    assert_eq!(tracker.stats().spawned, 1);
    assert_eq!(tracker.stats().retired_final, 1);
    assert_eq!(tracker.stats().retired_mass, 1);
}

/// An empty stream produces no records and touches no counters.
#[test]
fn test_empty_stream() {
    let params = TrackerParams::new(5.0, 50.0, 0.5, 0).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let records = tracker.track(&[]).unwrap();

    assert!(records.is_empty());
    assert_eq!(tracker.stats().events_processed, 0);
    assert_eq!(tracker.stats().spawned, 0);
}

fn synthetic_stream() -> Vec<Event> {
    // Two well-separated clusters drifting in opposite directions.
    let mut events = Vec::new();
    for i in 0..40 {
        let t = f64::from(i) * 25.0;
        events.push(Event::new(60 + i, 80, t));
        events.push(Event::new(400, 300 - i, t + 10.0));
    }
    events
}

/// The tracker has no hidden state or randomness: the same stream always
/// produces identical records, whether the tracker is reused or rebuilt.
#[test]
fn test_runs_are_deterministic() {
    let params = TrackerParams::new(6.0, 10_000.0, 0.8, 2).unwrap();
    let events = synthetic_stream();

    let mut tracker = ParticleTracker::new(params.clone()).unwrap();
    let first = tracker.track(&events).unwrap();
    let second = tracker.track(&events).unwrap();
    let fresh = track_particles(&events, &params).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fresh);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].mass(), 40);
    assert_eq!(first[1].mass(), 40);
}

/// Every processed event ends up either in a surviving record or in the
/// retired mass counter.
#[test]
fn test_mass_is_conserved_across_retirement() {
    let params = TrackerParams::new(6.0, 10_000.0, 0.8, 2).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let mut events = Vec::new();
    for i in 0..10 {
        events.push(ev(50, 50, f64::from(i) * 100.0));
    }
    events.push(ev(500, 500, 450.0));
    for i in 0..8 {
        events.push(ev(200, 200, 3000.0 + f64::from(i) * 100.0));
    }
    events.sort_by(|a, b| a.t.total_cmp(&b.t));

    let records = tracker.track(&events).unwrap();

    // The lone event goes quiet and is dropped once the second cluster
    // starts; both real clusters carry enough mass to survive.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, ParticleId(1));
    assert_eq!(records[0].mass(), 10);
    assert_eq!(records[1].id, ParticleId(3));
    assert_eq!(records[1].mass(), 8);

    let stats = tracker.stats();
    assert_eq!(stats.retired_midstream, 1);
    assert_eq!(stats.retired_mass, 1);
    assert_eq!(stats.spawned + stats.assigned, stats.events_processed);

    let surviving: usize = records.iter().map(ParticleRecord::mass).sum();
    assert_eq!(surviving + stats.retired_mass, events.len());
}

/// Records serialize to JSON and back without loss.
#[test]
fn test_records_round_trip_through_json() {
    let params = TrackerParams::new(5.0, 50.0, 0.1, 0).unwrap();
    let events = [ev(0, 0, 0.0), ev(1, 1, 10.0), ev(2, 2, 20.0)];
    let records = track_particles(&events, &params).unwrap();

    let json = serde_json::to_string(&records).unwrap();
    let restored: Vec<ParticleRecord> = serde_json::from_str(&json).unwrap();

    assert_eq!(records, restored);
}

/// A malformed stream is rejected up front and leaves the tracker usable.
#[test]
fn test_bad_stream_rejected_before_processing() {
    let params = TrackerParams::new(5.0, 50.0, 0.5, 0).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let err = tracker.track(&[ev(0, 0, 5.0), ev(0, 0, 4.0)]);
    assert!(matches!(
        err,
        Err(TrackError::Input(InputError::DecreasingTimestamp {
            index: 1,
            ..
        }))
    ));

    // The next run starts clean, ids from 1.
    let records = tracker.track(&[ev(0, 0, 0.0)]).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, ParticleId(1));
}
