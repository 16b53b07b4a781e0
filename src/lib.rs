/*!
# particle-tracking-rs - Event-based particle tracking

Single-pass online clustering of event-camera output into tracked
particles. Events arrive as `(x, y, t)` triples in time order; the tracker
groups them into clusters using a Gaussian space-time affinity kernel and
reports each surviving cluster with its full centroid trajectory and event
list.

## Features

- Greedy first-match association against each particle's recent events
- Merge cascades that collapse clusters bridged by a single event
- Sliding-window retirement of quiet, low-mass clusters
- Pluggable lifecycle reporters for logging and debugging

## Modules

- [`tracker`] - The single-pass tracking loop
- [`particle`] - Particle state and lifecycle operations
- [`affinity`] - The Gaussian space-time affinity kernel
- [`config`] - Tracker parameters and validation
- [`output`] - Finished records and run statistics
- [`reporter`] - Lifecycle observability hooks
- [`event`] - The input event type
- [`errors`] - Error types

## Example

```rust
use particle_tracking_rs::{track_particles, Event, TrackerParams};

// Three events drifting right form a single particle.
let events = vec![
    Event::new(0, 0, 0.0),
    Event::new(10, 0, 0.5),
    Event::new(20, 1, 1.0),
];
let params = TrackerParams::new(8.0, 1.0, 0.4, 0).unwrap();

let records = track_particles(&events, &params).unwrap();
assert_eq!(records.len(), 1);
assert_eq!(records[0].mass(), 3);
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// The single-pass tracking loop
///
/// This is the main module. It drives the per-event cycle of association,
/// spawning, merge cascades, and retirement, and produces the final records.
pub mod tracker;

/// Particle state and lifecycle operations
pub mod particle;

/// Gaussian space-time affinity kernel
pub mod affinity;

/// Tracker parameters and validation
pub mod config;

/// The input event type
pub mod event;

/// Output records and run statistics
pub mod output;

/// Lifecycle observability hooks
pub mod reporter;

/// Error types
pub mod errors;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use config::{TrackerParams, TrackerParamsBuilder};
pub use event::Event;
pub use output::{CentroidSnapshot, ParticleRecord, TrackerStats};
pub use particle::{Particle, ParticleId, ACTIVE_WINDOW};

// Errors
pub use errors::{InputError, ParameterError, TrackError};

// Affinity kernel
pub use affinity::space_time_affinity;

// Reporters
pub use reporter::{
    CompositeReporter, DebugReporter, LoggingReporter, NoOpReporter, TrackEvent, TrackReporter,
};

// Tracker
pub use tracker::{track_particles, validate_events, ParticleTracker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
