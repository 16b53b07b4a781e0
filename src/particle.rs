//! Particle state and lifecycle operations
//!
//! A particle is a live cluster of events. It keeps every event it has
//! absorbed, a sliding-window buffer of recent events used for association
//! and centroid updates, and the history of centroid positions over its
//! lifetime. Particles are spawned from unmatched events, grow through
//! [`Particle::add_event`], absorb each other through [`Particle::merge`],
//! and are retired once they go quiet with too little mass.

use std::collections::VecDeque;
use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::output::{CentroidSnapshot, ParticleRecord};

/// Width of the sliding recency window, in stream time units (microseconds
/// for raw event-camera data). Events older than this relative to the newest
/// event leave the recent buffer, and a particle whose newest event is older
/// than this relative to the current time becomes a retirement candidate.
pub const ACTIVE_WINDOW: f64 = 2000.0;

/// Identifier assigned to a particle at spawn time.
///
/// Ids are handed out sequentially starting from 1 and are never reused
/// within a run, including after merges and retirements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live cluster of events being tracked.
///
/// The full event list and the centroid history grow monotonically; the
/// recent buffer is pruned against [`ACTIVE_WINDOW`] on every update and is
/// the only state consulted when matching new events.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Identifier assigned at spawn.
    pub id: ParticleId,
    /// Every event absorbed, in absorption order.
    pub all_events: Vec<Event>,
    /// Events inside the sliding window, used for matching and centroids.
    pub recent_events: VecDeque<Event>,
    /// Mean position over the current recent buffer (blended after merges).
    pub centroid: Point2<f64>,
    /// Total number of absorbed events.
    pub mass: usize,
    /// Centroid position recorded after each update.
    pub centroid_history: Vec<CentroidSnapshot>,
}

impl Particle {
    /// Spawn a particle from its founding event.
    pub fn new(id: ParticleId, event: Event) -> Self {
        let centroid = Point2::new(f64::from(event.x), f64::from(event.y));
        let mut recent_events = VecDeque::new();
        recent_events.push_back(event);
        Self {
            id,
            all_events: vec![event],
            recent_events,
            centroid,
            mass: 1,
            centroid_history: vec![CentroidSnapshot::new(event.t, centroid.x, centroid.y)],
        }
    }

    /// Absorb one event and refresh the derived state.
    ///
    /// The event joins both buffers, recent events older than
    /// [`ACTIVE_WINDOW`] before it are pruned, the centroid is recomputed as
    /// the plain mean over the surviving recent buffer, and one history entry
    /// is recorded at the event's timestamp.
    pub fn add_event(&mut self, event: Event) {
        self.all_events.push(event);
        self.recent_events.push_back(event);
        self.mass += 1;

        // Drop recent events that fell out of the sliding window.
        let cutoff = event.t - ACTIVE_WINDOW;
        while self.recent_events.front().map_or(false, |e| e.t < cutoff) {
            self.recent_events.pop_front();
        }

        // The event just pushed survives the prune, so the buffer is never
        // empty here.
        let n = self.recent_events.len() as f64;
        let sum = self.recent_events.iter().fold(Vector2::zeros(), |acc, e| {
            acc + Vector2::new(f64::from(e.x), f64::from(e.y))
        });
        self.centroid = Point2::from(sum / n);

        self.centroid_history
            .push(CentroidSnapshot::new(event.t, self.centroid.x, self.centroid.y));
    }

    /// Absorb another particle.
    ///
    /// The other particle's full event list is appended to both of this
    /// particle's buffers without re-pruning; the next [`Particle::add_event`]
    /// restores the window. The centroid becomes a mass-weighted blend of the
    /// two centroids, and one history entry is recorded at the absorbed
    /// particle's last event time.
    pub fn merge(&mut self, other: &Particle) {
        for event in &other.all_events {
            self.all_events.push(*event);
            self.recent_events.push_back(*event);
        }

        self.mass += other.mass;

        // The blend weighs this particle by its post-merge mass, so the
        // absorbed mass is counted twice in the denominator.
        let total_mass = (self.mass + other.mass) as f64;
        let blended = (self.centroid.coords * self.mass as f64
            + other.centroid.coords * other.mass as f64)
            / total_mass;
        self.centroid = Point2::from(blended);

        if let Some(last) = self.recent_events.back() {
            self.centroid_history
                .push(CentroidSnapshot::new(last.t, self.centroid.x, self.centroid.y));
        }
    }

    /// Whether the particle should stay in the active set at `current_time`.
    ///
    /// A particle whose newest event lies within [`ACTIVE_WINDOW`] of
    /// `current_time` is always active; one that has gone quiet survives only
    /// if its mass exceeds the threshold.
    pub fn is_active(&self, current_time: f64, mass_threshold: usize) -> bool {
        match self.all_events.last() {
            Some(last) if last.t < current_time - ACTIVE_WINDOW => self.mass > mass_threshold,
            _ => true,
        }
    }

    /// Mass-only activity check applied once after the stream ends.
    #[inline]
    pub fn is_active_final(&self, mass_threshold: usize) -> bool {
        self.mass > mass_threshold
    }

    /// Newest event in the recent buffer, if any.
    #[inline]
    pub fn latest_recent(&self) -> Option<Event> {
        self.recent_events.back().copied()
    }

    /// Snapshot the particle as an output record.
    pub fn to_record(&self) -> ParticleRecord {
        ParticleRecord::new(
            self.id,
            self.centroid_history.clone(),
            self.all_events.clone(),
        )
    }
}
