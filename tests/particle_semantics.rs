//! Fine-grained tracker semantics
//!
//! Pins the behaviors downstream consumers rely on for exact output parity:
//! the sliding recency window, merge weighting and history timestamps, scan
//! order on ambiguous matches, id allocation, and the reporter's view of a
//! run.

use particle_tracking_rs::{
    DebugReporter, Event, ParticleId, ParticleTracker, TrackEvent, TrackerParams,
};

fn ev(x: i32, y: i32, t: f64) -> Event {
    Event::new(x, y, t)
}

/// Matching consults the full recent buffer, then the window prune runs and
/// the centroid is recomputed over the survivors only.
#[test]
fn test_window_prunes_before_centroid_update() {
    let params = TrackerParams::new(20.0, 5000.0, 0.5, 0).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let records = tracker
        .track(&[ev(0, 0, 0.0), ev(20, 0, 100.0), ev(16, 0, 2150.0)])
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mass(), 3);

    // The last event matched through the first event, which the window then
    // dropped along with the second, so the final centroid is the last
    // event alone.
    let history = &records[0].centroid_history;
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].t, 2150.0);
    assert!((history[2].x - 16.0).abs() < 1e-10);
    assert!((history[2].y - 0.0).abs() < 1e-10);
}

/// A merge blends centroids with the anchor's post-merge mass and stamps the
/// history entry with the absorbed particle's last event time, which can run
/// the history backwards.
#[test]
fn test_merge_blend_and_history_timestamp() {
    let params = TrackerParams::new(5.0, 50.0, 0.2, 0).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let e1 = ev(0, 0, 0.0);
    let e2 = ev(16, 0, 0.0);
    let e3 = ev(8, 0, 0.5);
    let records = tracker.track(&[e1, e2, e3]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, ParticleId(1));
    assert_eq!(records[0].events, vec![e1, e3, e2]);

    // Blend of centroids (4,0) mass 2 and (16,0) mass 1: the anchor weight
    // uses the already-updated mass 3 over a denominator of 4.
    let history = &records[0].centroid_history;
    assert_eq!(history.len(), 3);
    assert!((history[1].x - 4.0).abs() < 1e-10);
    assert!((history[2].x - 7.0).abs() < 1e-10);

    // The merge entry carries the absorbed tail's timestamp, older than the
    // entry before it.
    assert_eq!(history[2].t, 0.0);
    assert_eq!(history[1].t, 0.5);
}

/// A newest event sitting exactly on the window cutoff still counts as
/// recent, so the particle skips the mass check.
#[test]
fn test_boundary_quiet_particle_survives_at_exact_cutoff() {
    let params = TrackerParams::new(5.0, 5000.0, 0.5, 1).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let records = tracker
        .track(&[ev(0, 0, 0.0), ev(500, 500, 2000.0)])
        .unwrap();

    // The first particle's only event is exactly window-width old when the
    // second arrives; it must not be retired mid-stream. Both then fail the
    // final mass sweep.
    assert!(records.is_empty());
    assert_eq!(tracker.stats().retired_midstream, 0);
    assert_eq!(tracker.stats().retired_final, 2);
}

/// Ids are handed out sequentially and never reclaimed from retired
/// particles.
#[test]
fn test_ids_skip_retired_particles() {
    let params = TrackerParams::new(5.0, 5000.0, 0.5, 1).unwrap();
    let mut tracker = ParticleTracker::with_reporter(params, DebugReporter::new()).unwrap();

    let records = tracker
        .track(&[
            ev(0, 0, 0.0),
            ev(300, 300, 2500.0),
            ev(600, 600, 5000.0),
        ])
        .unwrap();

    assert!(records.is_empty());

    let spawn_ids: Vec<ParticleId> = tracker
        .reporter()
        .timeline()
        .iter()
        .filter_map(|entry| match entry {
            TrackEvent::Spawned { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawn_ids,
        vec![ParticleId(1), ParticleId(2), ParticleId(3)]
    );
    assert_eq!(tracker.reporter().num_retirements(), 3);
}

/// Merging appends the absorbed particle's full event list to the anchor's
/// recent buffer without pruning, so a stale event can still catch later
/// arrivals.
#[test]
fn test_merged_events_extend_matching_reach() {
    let params = TrackerParams::new(5.0, 50_000.0, 0.2, 0).unwrap();
    let mut tracker = ParticleTracker::new(params).unwrap();

    let e1 = ev(0, 0, 0.0);
    let e2 = ev(16, 0, 100.0);
    let e2b = ev(16, 0, 2500.0);
    let e3 = ev(8, 0, 2600.0);
    let e4 = ev(20, 0, 2700.0);
    let records = tracker.track(&[e1, e2, e2b, e3, e4]).unwrap();

    // e3 anchors the first particle and pulls in the second. The merge
    // re-imports e2 even though the second particle's own window had
    // dropped it, and e4 then matches through that stale event. A pruned
    // recent buffer would have split e4 into its own particle.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mass(), 5);
    assert_eq!(records[0].events, vec![e1, e3, e2, e2b, e4]);

    let last = records[0].centroid_history.last().unwrap();
    assert_eq!(last.t, 2700.0);
    assert!((last.x - 15.0).abs() < 1e-10);
}

/// The reporter's timeline agrees with the run counters and the final
/// records.
#[test]
fn test_reporter_timeline_matches_stats() {
    let params = TrackerParams::new(5.0, 50.0, 0.2, 0).unwrap();
    let mut tracker = ParticleTracker::with_reporter(params, DebugReporter::new()).unwrap();

    let records = tracker
        .track(&[
            ev(0, 0, 0.0),
            ev(16, 0, 0.1),
            ev(20, 0, 0.2),
            ev(29, 0, 0.3),
            ev(24, 0, 0.4),
            ev(8, 0, 0.5),
        ])
        .unwrap();

    let stats = *tracker.stats();
    let reporter = tracker.reporter();
    assert_eq!(reporter.num_spawns(), stats.spawned);
    assert_eq!(reporter.num_assignments(), stats.assigned);
    assert_eq!(reporter.num_merges(), stats.merges);
    assert_eq!(reporter.num_retirements(), stats.retired_total());
    assert_eq!(stats.merges, 2);

    let survivor_ids: Vec<ParticleId> = records.iter().map(|r| r.id).collect();
    assert_eq!(reporter.completion_events(), [survivor_ids]);
}
