//! Shared models

mod point;

pub use point::{HostPoint, Point, Range, TextEdit};
