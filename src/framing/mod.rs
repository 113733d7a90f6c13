//! Framing Module
//!
//! Converts a cleaned return series into supervised (window, label)
//! examples with a chronological train/test split

mod window;

pub use window::{chronological_split, frame, to_arrays, Example};
