//! Reply parsing: fence splitting and segment classification.

mod fence;

pub use fence::{classify_code, split_segments, FENCE};
