#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Route risk-scoring engine.
//!
//! Given candidate route polylines and a snapshot of recorded incidents,
//! computes a comparable risk score per route and orders routes from
//! safest to most dangerous. Scoring is pure and CPU-bound: the incident
//! snapshot is fetched once by the caller and passed down explicitly, so
//! every candidate in a ranking call is scored against identical data.
//!
//! Scores are request-local comparison units only: lower is safer, zero
//! means no incident influence, and values are not calibrated across
//! calls or against any absolute scale.

pub mod distance;
pub mod rank;
pub mod score;

pub use distance::haversine_km;
pub use rank::{SAMPLE_STRIDE, rank_routes, score_route};
pub use score::score_point;
