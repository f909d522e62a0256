//! Eyewear try-on overlay.
//!
//! Tracks a face from detector landmarks and keeps a glasses model locked to
//! it, and works out which parts of an unlabelled model are lenses so they
//! can be shaded as glass.

pub mod engine;
pub mod error;
pub mod rpc;
