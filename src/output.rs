//! Output types for finished particles and run statistics.
//!
//! After consuming an event stream, the tracker reports each surviving
//! cluster as a [`ParticleRecord`]: its identity, the centroid trajectory it
//! traced, and every event it absorbed. This module defines those output
//! types.
//!
//! - [`CentroidSnapshot`] - Centroid position at one point in a cluster's life
//! - [`ParticleRecord`] - A finished cluster: identity, trajectory, events
//! - [`TrackerStats`] - Counters accumulated over a single tracking run

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::particle::ParticleId;

/// Centroid position recorded after one update to a particle.
///
/// Every mutation of a particle (spawn, absorbed event, or merge) appends
/// exactly one snapshot, so the history tracks how the mean position drifted
/// over the cluster's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidSnapshot {
    /// Timestamp at which this centroid was recorded.
    pub t: f64,
    /// Mean x coordinate over the events absorbed so far.
    pub x: f64,
    /// Mean y coordinate over the events absorbed so far.
    pub y: f64,
}

impl CentroidSnapshot {
    /// Create a new centroid snapshot
    pub fn new(t: f64, x: f64, y: f64) -> Self {
        Self { t, x, y }
    }

    /// Centroid position as a point
    #[inline]
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// A cluster that survived to the end of a tracking run.
///
/// This is the primary output of the tracker. Records are reported in the
/// order their particles occupied the active set when the stream ended, and
/// each carries the full evidence for the cluster: the centroid trajectory
/// and every raw event, in absorption order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    /// Identifier the cluster carried while active.
    pub id: ParticleId,
    /// Centroid position after each absorbed event.
    pub centroid_history: Vec<CentroidSnapshot>,
    /// Every event absorbed into the cluster, in absorption order.
    pub events: Vec<Event>,
}

impl ParticleRecord {
    /// Create a new particle record
    pub fn new(
        id: ParticleId,
        centroid_history: Vec<CentroidSnapshot>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            id,
            centroid_history,
            events,
        }
    }

    /// Total number of events absorbed into the cluster
    #[inline]
    pub fn mass(&self) -> usize {
        self.events.len()
    }

    /// Timestamp of the first absorbed event
    pub fn first_time(&self) -> Option<f64> {
        self.events.first().map(|e| e.t)
    }

    /// Timestamp of the last absorbed event
    pub fn last_time(&self) -> Option<f64> {
        self.events.last().map(|e| e.t)
    }
}

/// Counters accumulated over a single tracking run.
///
/// Every input event is either assigned to an existing particle or spawns a
/// new one, so `assigned + spawned == events_processed`. Events belonging to
/// retired particles are counted in `retired_mass`; together with the mass of
/// the surviving records this accounts for every processed event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    /// Number of input events consumed.
    pub events_processed: usize,
    /// Events that founded a new particle.
    pub spawned: usize,
    /// Events absorbed into an existing particle.
    pub assigned: usize,
    /// Number of merge operations performed.
    pub merges: usize,
    /// Particles retired while the stream was still running.
    pub retired_midstream: usize,
    /// Particles retired by the final sweep after the last event.
    pub retired_final: usize,
    /// Total events carried by retired particles.
    pub retired_mass: usize,
}

impl TrackerStats {
    /// Total number of retired particles
    #[inline]
    pub fn retired_total(&self) -> usize {
        self.retired_midstream + self.retired_final
    }
}
