//! Lens/frame classification of model parts and the materials each role gets.
//!
//! Runs once per model load. Scoring is table-driven (`rules::LENS_RULES`);
//! when no part scores high enough, a symmetry pass looks for a mirrored pair
//! of thin parts. Everything else is frame.

pub mod classifier;
pub mod materials;

/// Ordered (predicate, weight) lens evidence table.
pub mod rules;
