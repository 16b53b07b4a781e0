//! Observability for tracker execution.
//!
//! This module provides the [`TrackReporter`] trait for debugging and research
//! instrumentation. Reporters receive callbacks at key points of the particle
//! lifecycle without polluting the core algorithm logic.
//!
//! # Zero-Cost Abstraction
//!
//! The default [`NoOpReporter`] compiles to zero overhead - all callback
//! methods are empty and will be optimized away by the compiler.
//!
//! # Use Cases
//!
//! - **Debugging**: Capture the spawn/assign/merge/retire timeline of a run
//! - **Research**: Measure cluster churn, merge cascades, retirement pressure
//! - **Logging**: Emit structured events for monitoring
//! - **Visualization**: Build live displays of the active particle set
//!
//! # Example
//!
//! ```
//! use particle_tracking_rs::{DebugReporter, Event, ParticleTracker, TrackerParams};
//!
//! let params = TrackerParams::new(5.0, 50.0, 0.5, 0).unwrap();
//! let mut tracker = ParticleTracker::with_reporter(params, DebugReporter::new()).unwrap();
//!
//! let _records = tracker.track(&[Event::new(0, 0, 0.0)]).unwrap();
//!
//! assert_eq!(tracker.reporter().num_spawns(), 1);
//! ```

use crate::event::Event;
use crate::particle::{Particle, ParticleId};

// ============================================================================
// TrackReporter Trait
// ============================================================================

/// Observability trait for particle lifecycle events.
///
/// Implement this trait to receive callbacks while the tracker runs.
/// All methods have default empty implementations, so you only need
/// to override the events you care about.
///
/// # Thread Safety
///
/// Reporters use `&mut self` for callbacks, so they are NOT required
/// to be `Send + Sync`. If you need thread-safe reporting, use interior
/// mutability (e.g., `Mutex<Vec<...>>`) in your implementation.
///
/// # Performance
///
/// Callbacks receive references to avoid cloning overhead. If you need
/// to store the data, clone it within your callback implementation.
///
/// # Example
///
/// ```
/// use particle_tracking_rs::{Event, Particle, ParticleId, TrackReporter};
///
/// struct SpawnCounter {
///     spawns: usize,
/// }
///
/// impl TrackReporter for SpawnCounter {
///     fn on_spawn(&mut self, _particle: &Particle) {
///         self.spawns += 1;
///     }
/// }
///
/// let mut reporter = SpawnCounter { spawns: 0 };
/// reporter.on_spawn(&Particle::new(ParticleId(1), Event::new(0, 0, 0.0)));
/// assert_eq!(reporter.spawns, 1);
/// ```
pub trait TrackReporter {
    /// Called when an unmatched event founds a new particle.
    ///
    /// At this point the particle holds exactly its founding event and has
    /// not yet been inserted into the active set.
    fn on_spawn(&mut self, _particle: &Particle) {}

    /// Called after an event is absorbed into an existing particle.
    ///
    /// The particle has already been updated; any merge cascade triggered by
    /// the assignment has not yet run.
    fn on_assign(&mut self, _particle: &Particle, _event: &Event) {}

    /// Called after one particle absorbs another during a merge cascade.
    ///
    /// The winner has already absorbed the other particle's events and mass;
    /// the absorbed particle has been removed from the active set.
    fn on_merge(&mut self, _winner: &Particle, _absorbed: &Particle) {}

    /// Called when a particle is removed from the active set for good.
    ///
    /// This fires both for mid-stream retirements and for the final
    /// mass-only sweep after the last event.
    fn on_retire(&mut self, _particle: &Particle) {}

    /// Called once after the final sweep, with the surviving particles.
    ///
    /// The slice is in active-set order, which is also the order of the
    /// returned records.
    fn on_complete(&mut self, _survivors: &[Particle]) {}
}

// ============================================================================
// NoOpReporter
// ============================================================================

/// Zero-cost reporter that does nothing.
///
/// This is the default reporter used when no observability is needed.
/// All callbacks are empty and will be optimized away by the compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    /// Create a new no-op reporter.
    pub fn new() -> Self {
        Self
    }
}

impl TrackReporter for NoOpReporter {
    // All methods use default empty implementations
}

// ============================================================================
// DebugReporter
// ============================================================================

/// One entry in the timeline captured by [`DebugReporter`].
///
/// Entries carry particle ids and scalar state rather than full particle
/// clones, so long runs stay cheap to record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackEvent {
    /// An unmatched event founded a new particle.
    Spawned {
        /// Id of the new particle.
        id: ParticleId,
        /// The founding event.
        event: Event,
    },

    /// An event was absorbed into an existing particle.
    Assigned {
        /// Id of the absorbing particle.
        id: ParticleId,
        /// The absorbed event.
        event: Event,
        /// Particle mass after the absorption.
        mass: usize,
    },

    /// One particle absorbed another during a merge cascade.
    Merged {
        /// Id of the surviving particle.
        winner: ParticleId,
        /// Id of the absorbed particle.
        absorbed: ParticleId,
        /// Winner's mass after the merge.
        mass: usize,
    },

    /// A particle left the active set for good.
    Retired {
        /// Id of the retired particle.
        id: ParticleId,
        /// Its mass at retirement.
        mass: usize,
    },
}

/// Reporter that captures the full lifecycle timeline for debugging.
///
/// The timeline preserves the order in which spawns, assignments, merges,
/// and retirements happened, which is usually the first thing needed when
/// diagnosing unexpected clustering.
///
/// # Example
///
/// ```
/// use particle_tracking_rs::{DebugReporter, Event, Particle, ParticleId, TrackReporter};
///
/// let mut reporter = DebugReporter::new();
///
/// let p = Particle::new(ParticleId(1), Event::new(0, 0, 0.0));
/// reporter.on_spawn(&p);
/// reporter.on_retire(&p);
///
/// assert_eq!(reporter.timeline().len(), 2);
/// assert_eq!(reporter.num_spawns(), 1);
/// assert_eq!(reporter.num_retirements(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    /// Captured lifecycle events, in occurrence order.
    timeline: Vec<TrackEvent>,

    /// Survivor id lists, one per completed run.
    completions: Vec<Vec<ParticleId>>,
}

impl DebugReporter {
    /// Create a new debug reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all captured data.
    pub fn clear(&mut self) {
        self.timeline.clear();
        self.completions.clear();
    }

    /// Get the captured lifecycle timeline.
    pub fn timeline(&self) -> &[TrackEvent] {
        &self.timeline
    }

    /// Get the survivor id lists, one per completed run.
    pub fn completion_events(&self) -> &[Vec<ParticleId>] {
        &self.completions
    }

    /// Number of captured spawn events.
    pub fn num_spawns(&self) -> usize {
        self.timeline
            .iter()
            .filter(|e| matches!(e, TrackEvent::Spawned { .. }))
            .count()
    }

    /// Number of captured assignment events.
    pub fn num_assignments(&self) -> usize {
        self.timeline
            .iter()
            .filter(|e| matches!(e, TrackEvent::Assigned { .. }))
            .count()
    }

    /// Number of captured merge events.
    pub fn num_merges(&self) -> usize {
        self.timeline
            .iter()
            .filter(|e| matches!(e, TrackEvent::Merged { .. }))
            .count()
    }

    /// Number of captured retirement events.
    pub fn num_retirements(&self) -> usize {
        self.timeline
            .iter()
            .filter(|e| matches!(e, TrackEvent::Retired { .. }))
            .count()
    }
}

impl TrackReporter for DebugReporter {
    fn on_spawn(&mut self, particle: &Particle) {
        self.timeline.push(TrackEvent::Spawned {
            id: particle.id,
            event: particle.all_events[0],
        });
    }

    fn on_assign(&mut self, particle: &Particle, event: &Event) {
        self.timeline.push(TrackEvent::Assigned {
            id: particle.id,
            event: *event,
            mass: particle.mass,
        });
    }

    fn on_merge(&mut self, winner: &Particle, absorbed: &Particle) {
        self.timeline.push(TrackEvent::Merged {
            winner: winner.id,
            absorbed: absorbed.id,
            mass: winner.mass,
        });
    }

    fn on_retire(&mut self, particle: &Particle) {
        self.timeline.push(TrackEvent::Retired {
            id: particle.id,
            mass: particle.mass,
        });
    }

    fn on_complete(&mut self, survivors: &[Particle]) {
        self.completions
            .push(survivors.iter().map(|p| p.id).collect());
    }
}

// ============================================================================
// LoggingReporter
// ============================================================================

/// Reporter that logs lifecycle events using the log crate.
///
/// This reporter emits log messages at fixed levels for each event type.
/// Useful for debugging without storing large amounts of data.
///
/// # Log Levels
///
/// - `on_complete`: INFO
/// - `on_spawn`, `on_merge`, `on_retire`: DEBUG
/// - `on_assign`: TRACE
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter {
    /// Whether to include per-particle details in completion messages
    verbose: bool,
}

impl LoggingReporter {
    /// Create a new logging reporter.
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Create a verbose logging reporter that lists survivors on completion.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl TrackReporter for LoggingReporter {
    fn on_spawn(&mut self, particle: &Particle) {
        log::debug!(
            "Spawned particle {} at t={}",
            particle.id,
            particle.all_events[0].t
        );
    }

    fn on_assign(&mut self, particle: &Particle, event: &Event) {
        log::trace!(
            "Assigned event ({}, {}, t={}) to particle {} (mass {})",
            event.x,
            event.y,
            event.t,
            particle.id,
            particle.mass
        );
    }

    fn on_merge(&mut self, winner: &Particle, absorbed: &Particle) {
        log::debug!(
            "Merged particle {} into {} (mass {})",
            absorbed.id,
            winner.id,
            winner.mass
        );
    }

    fn on_retire(&mut self, particle: &Particle) {
        log::debug!(
            "Retired particle {} (mass {})",
            particle.id,
            particle.mass
        );
    }

    fn on_complete(&mut self, survivors: &[Particle]) {
        log::info!("Tracking complete: {} surviving particles", survivors.len());
        if self.verbose {
            for p in survivors {
                log::debug!(
                    "  Particle {}: mass={}, centroid=({:.2}, {:.2})",
                    p.id,
                    p.mass,
                    p.centroid.x,
                    p.centroid.y
                );
            }
        }
    }
}

// ============================================================================
// CompositeReporter
// ============================================================================

/// Reporter that forwards events to two child reporters.
///
/// Useful when you need both logging and debugging, or want to
/// combine multiple specialized reporters.
///
/// # Example
///
/// ```
/// use particle_tracking_rs::{
///     CompositeReporter, DebugReporter, Event, LoggingReporter, Particle, ParticleId,
///     TrackReporter,
/// };
///
/// let mut composite = CompositeReporter::new(DebugReporter::new(), LoggingReporter::new());
///
/// composite.on_spawn(&Particle::new(ParticleId(1), Event::new(0, 0, 0.0)));
///
/// assert_eq!(composite.first().num_spawns(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CompositeReporter<A: TrackReporter, B: TrackReporter> {
    first: A,
    second: B,
}

impl<A: TrackReporter, B: TrackReporter> CompositeReporter<A, B> {
    /// Create a new composite reporter.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Get a reference to the first reporter.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a mutable reference to the first reporter.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Get a reference to the second reporter.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Get a mutable reference to the second reporter.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    /// Consume and return both reporters.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TrackReporter, B: TrackReporter> TrackReporter for CompositeReporter<A, B> {
    fn on_spawn(&mut self, particle: &Particle) {
        self.first.on_spawn(particle);
        self.second.on_spawn(particle);
    }

    fn on_assign(&mut self, particle: &Particle, event: &Event) {
        self.first.on_assign(particle, event);
        self.second.on_assign(particle, event);
    }

    fn on_merge(&mut self, winner: &Particle, absorbed: &Particle) {
        self.first.on_merge(winner, absorbed);
        self.second.on_merge(winner, absorbed);
    }

    fn on_retire(&mut self, particle: &Particle) {
        self.first.on_retire(particle);
        self.second.on_retire(particle);
    }

    fn on_complete(&mut self, survivors: &[Particle]) {
        self.first.on_complete(survivors);
        self.second.on_complete(survivors);
    }
}

// ============================================================================
// Tests
// ============================================================================
