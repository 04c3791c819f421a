//! Structured document model.
//!
//! # Responsibility
//! - Define the canonical block and inline shapes every other module reads.
//! - Keep raw-shape interpretation out of this module; see `normalize`.
//!
//! # Invariants
//! - Model values are immutable inputs to render/diff/merge; those modules
//!   derive new values instead of mutating.

pub mod block;
pub mod inline;
pub mod table;
