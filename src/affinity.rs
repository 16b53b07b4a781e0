//! Gaussian space-time affinity between events.
//!
//! The affinity score is the foundation of event-to-particle association:
//! it measures how plausibly two events belong to the same moving object,
//! as a Gaussian kernel over their spatial and temporal separation:
//!
//! `score = exp( -d_xy² / (2·σ_space²) - d_t² / (2·σ_time²) )`
//!
//! The score lies in (0, 1]: exactly 1 for identical events, falling
//! toward 0 as the pair separates in space or time (sufficiently distant
//! pairs underflow to exactly 0.0). The spatial term takes
//! coordinate differences in integer arithmetic (exact in i64) and squares
//! them in double precision, which is exact for every pixel distance below
//! 2^26 and cannot overflow for any i32 input; the temporal term is
//! floating point throughout. The score is symmetric:
//! `score(a, b) == score(b, a)`.

use crate::event::Event;

/// Gaussian space-time affinity between two events.
///
/// `sigma_space` and `sigma_time` control how quickly the score decays
/// with spatial and temporal separation. Both are expected to be validated
/// (finite, > 0) before reaching this function; see
/// [`TrackerParams::validate`](crate::config::TrackerParams::validate).
pub fn space_time_affinity(a: &Event, b: &Event, sigma_space: f64, sigma_time: f64) -> f64 {
    let dx = (i64::from(a.x) - i64::from(b.x)) as f64;
    let dy = (i64::from(a.y) - i64::from(b.y)) as f64;
    let spatial_sq = dx * dx + dy * dy;

    let dt = a.t - b.t;
    let temporal_sq = dt * dt;

    (-spatial_sq / (2.0 * sigma_space * sigma_space)
        - temporal_sq / (2.0 * sigma_time * sigma_time))
        .exp()
}
