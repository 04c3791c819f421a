//! Text and block comparison.
//!
//! - `word`: token-level diff between two strings.
//! - `structural`: index-paired comparison of two block sequences.

pub mod structural;
pub mod word;
