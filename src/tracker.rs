//! Single-pass online particle tracker.
//!
//! The tracker consumes a time-ordered event stream once, maintaining a set
//! of live particles. Each event goes through four phases:
//!
//! 1. **Association**: scan particles in creation order and absorb the event
//!    into the first one whose recent buffer holds a close enough event.
//! 2. **Spawn**: if nothing matched, the event founds a new particle with the
//!    next sequential id.
//! 3. **Merge cascade**: after an absorption, every other particle is checked
//!    against the anchor's newest recent event and absorbed on a match. The
//!    probe is re-read after each merge, so one absorption can chain into
//!    several.
//! 4. **Retirement**: particles whose newest event fell out of the recency
//!    window are dropped unless their mass exceeds the threshold.
//!
//! After the last event, a final mass-only sweep removes small particles and
//! the survivors are reported as [`ParticleRecord`]s in active-set order.

use crate::affinity::space_time_affinity;
use crate::config::TrackerParams;
use crate::errors::{InputError, TrackError};
use crate::event::Event;
use crate::output::{ParticleRecord, TrackerStats};
use crate::particle::{Particle, ParticleId};
use crate::reporter::{NoOpReporter, TrackReporter};

/// Single-pass online particle tracker.
///
/// This is the main entry point. A tracker is built once from validated
/// [`TrackerParams`] and can run any number of streams through
/// [`ParticleTracker::track`]; each run starts from a clean slate.
///
/// The tracker is generic over the reporter `R`, allowing lifecycle
/// observability to be plugged in at compile time. The default
/// [`NoOpReporter`] compiles to nothing.
///
/// # Determinism
///
/// Runs are fully deterministic: particles are scanned in creation order,
/// recent buffers in storage order, and ties resolve to the first match, so
/// the same stream with the same parameters always yields identical records.
///
/// # Type Parameters
///
/// * `R` - The lifecycle reporter, must implement [`TrackReporter`]
pub struct ParticleTracker<R: TrackReporter = NoOpReporter> {
    /// Validated tracker parameters.
    params: TrackerParams,
    /// Live particles, in creation order (merge survivors keep their slot).
    active: Vec<Particle>,
    /// Next id to hand out. Ids start at 1 and are never reused in a run.
    next_id: u32,
    /// Counters for the current run.
    stats: TrackerStats,
    /// Lifecycle observer.
    reporter: R,
}

impl ParticleTracker<NoOpReporter> {
    /// Create a new tracker with no observability.
    pub fn new(params: TrackerParams) -> Result<Self, TrackError> {
        Self::with_reporter(params, NoOpReporter)
    }
}

impl<R: TrackReporter> ParticleTracker<R> {
    /// Create a new tracker with a custom reporter.
    pub fn with_reporter(params: TrackerParams, reporter: R) -> Result<Self, TrackError> {
        params.validate()?;
        Ok(Self {
            params,
            active: Vec::new(),
            next_id: 1,
            stats: TrackerStats::default(),
            reporter,
        })
    }

    /// Parameters the tracker was built with.
    #[inline]
    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    /// Counters for the most recent run.
    #[inline]
    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    /// Number of currently active particles.
    #[inline]
    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Get a reference to the reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Get a mutable reference to the reporter.
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Consume the tracker and return the reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Consume a complete event stream and return the surviving particles.
    ///
    /// The stream is validated up front: every timestamp must be finite and
    /// timestamps must be non-decreasing. On a validation error the run is
    /// rejected before any event is processed.
    ///
    /// Records are returned in active-set order, which reflects particle
    /// creation order with merge survivors keeping their slot.
    pub fn track(&mut self, events: &[Event]) -> Result<Vec<ParticleRecord>, TrackError> {
        validate_events(events)?;
        self.reset();

        for &event in events {
            self.step(event);
        }

        self.final_sweep();
        self.reporter.on_complete(&self.active);

        Ok(self.active.iter().map(Particle::to_record).collect())
    }

    /// Clear all per-run state so the next stream starts fresh.
    fn reset(&mut self) {
        self.active.clear();
        self.next_id = 1;
        self.stats = TrackerStats::default();
    }

    /// Process one event through the full association-merge-retire cycle.
    fn step(&mut self, event: Event) {
        self.stats.events_processed += 1;

        // STEP 1: Association - absorb the event into the first particle
        // whose recent buffer holds a close enough event
        match self.find_match(&event) {
            None => {
                // STEP 2: Spawn - the unmatched event founds a new particle
                let particle = Particle::new(ParticleId(self.next_id), event);
                self.next_id += 1;
                self.stats.spawned += 1;
                self.reporter.on_spawn(&particle);
                self.active.push(particle);
            }
            Some(anchor) => {
                self.active[anchor].add_event(event);
                self.stats.assigned += 1;
                self.reporter.on_assign(&self.active[anchor], &event);

                // STEP 3: Merge cascade - collapse particles the freshly
                // absorbed event now bridges
                self.merge_overlapping(anchor);
            }
        }

        // STEP 4: Retirement - drop particles that went quiet without
        // enough mass
        self.retire_inactive(event.t);
    }

    /// Index of the first particle with a recent event close enough to `event`.
    fn find_match(&self, event: &Event) -> Option<usize> {
        let TrackerParams {
            sigma_space,
            sigma_time,
            gaussian_threshold,
            ..
        } = self.params;

        self.active.iter().position(|particle| {
            particle.recent_events.iter().any(|recent| {
                space_time_affinity(event, recent, sigma_space, sigma_time) >= gaussian_threshold
            })
        })
    }

    /// Merge into `anchor` every other particle whose recent buffer overlaps
    /// the anchor's newest recent event.
    ///
    /// The scan visits each slot once. Removal keeps `idx` in place so the
    /// element that shifted in is still visited, and the anchor index is
    /// adjusted when a removal happens before it. The probe is re-read from
    /// the anchor after every merge, so absorbing one particle can make the
    /// next one overlap.
    fn merge_overlapping(&mut self, mut anchor: usize) {
        let TrackerParams {
            sigma_space,
            sigma_time,
            gaussian_threshold,
            ..
        } = self.params;

        let mut idx = 0;
        while idx < self.active.len() {
            if idx == anchor {
                idx += 1;
                continue;
            }

            let overlaps = match self.active[anchor].latest_recent() {
                Some(probe) => self.active[idx].recent_events.iter().any(|recent| {
                    space_time_affinity(&probe, recent, sigma_space, sigma_time)
                        >= gaussian_threshold
                }),
                None => false,
            };

            if overlaps {
                let absorbed = self.active.remove(idx);
                if idx < anchor {
                    anchor -= 1;
                }
                self.active[anchor].merge(&absorbed);
                self.stats.merges += 1;
                self.reporter.on_merge(&self.active[anchor], &absorbed);
                // Keep idx: the next candidate shifted into this slot.
            } else {
                idx += 1;
            }
        }
    }

    /// Drop particles that went quiet before `current_time` without enough
    /// mass. Survivor order is preserved.
    fn retire_inactive(&mut self, current_time: f64) {
        let Self {
            active,
            stats,
            reporter,
            params,
            ..
        } = self;
        let mass_threshold = params.mass_threshold;

        active.retain(|particle| {
            let keep = particle.is_active(current_time, mass_threshold);
            if !keep {
                stats.retired_midstream += 1;
                stats.retired_mass += particle.mass;
                reporter.on_retire(particle);
            }
            keep
        });
    }

    /// Mass-only sweep applied once after the stream ends.
    fn final_sweep(&mut self) {
        let Self {
            active,
            stats,
            reporter,
            params,
            ..
        } = self;
        let mass_threshold = params.mass_threshold;

        active.retain(|particle| {
            let keep = particle.is_active_final(mass_threshold);
            if !keep {
                stats.retired_final += 1;
                stats.retired_mass += particle.mass;
                reporter.on_retire(particle);
            }
            keep
        });
    }
}

/// Check that a stream is safe to feed to the tracker.
///
/// Every timestamp must be finite and the sequence must be non-decreasing.
/// Returns the index of the first offending event.
pub fn validate_events(events: &[Event]) -> Result<(), InputError> {
    let mut previous: Option<f64> = None;
    for (index, event) in events.iter().enumerate() {
        if !event.t.is_finite() {
            return Err(InputError::NonFiniteTimestamp {
                index,
                value: event.t,
            });
        }
        if let Some(prev) = previous {
            if event.t < prev {
                return Err(InputError::DecreasingTimestamp {
                    index,
                    previous: prev,
                    current: event.t,
                });
            }
        }
        previous = Some(event.t);
    }
    Ok(())
}

/// Run a complete stream through a fresh tracker in one call.
///
/// # Example
///
/// ```
/// use particle_tracking_rs::{track_particles, Event, TrackerParams};
///
/// let params = TrackerParams::new(5.0, 50.0, 0.5, 0).unwrap();
/// let events = vec![Event::new(10, 10, 0.0), Event::new(11, 10, 1.0)];
///
/// let records = track_particles(&events, &params).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].mass(), 2);
/// ```
pub fn track_particles(
    events: &[Event],
    params: &TrackerParams,
) -> Result<Vec<ParticleRecord>, TrackError> {
    ParticleTracker::new(params.clone())?.track(events)
}
