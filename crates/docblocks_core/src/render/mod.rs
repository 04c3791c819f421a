//! Block and inline rendering into a keyed element tree.
//!
//! # Responsibility
//! - Produce a renderer-agnostic tree from normalized blocks.
//! - Serialize that tree to HTML for hosts without their own view layer.

pub mod block;
pub mod inline;
pub mod tree;
