//! Source position types
//!
//! These types cross the host boundary, so columns and offsets are in host
//! units (see `shared::units`), not engine bytes.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// (row, column) position, ordered row-major
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    /// Unbounded window end
    pub const MAX: Point = Point {
        row: u32::MAX,
        column: u32::MAX,
    };

    /// Window start
    pub const ZERO: Point = Point { row: 0, column: 0 };

    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl Point {
    #[new]
    fn py_new(row: u32, column: u32) -> Self {
        Self::new(row, column)
    }

    pub fn __repr__(&self) -> String {
        format!("Point(row={}, column={})", self.row, self.column)
    }
}

/// A point as the host supplied it, before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPoint {
    pub row: i64,
    pub column: i64,
}

impl HostPoint {
    pub fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

impl From<Point> for HostPoint {
    fn from(point: Point) -> Self {
        Self::new(i64::from(point.row), i64::from(point.column))
    }
}

/// A text range in host units
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start_index: u32,
    pub end_index: u32,
    pub start_position: Point,
    pub end_position: Point,
}

#[cfg(feature = "python")]
#[pymethods]
impl Range {
    pub fn __repr__(&self) -> String {
        format!(
            "Range({}..{}, {}..{})",
            self.start_index, self.end_index, self.start_position, self.end_position
        )
    }
}

/// An edit description in host units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub start_index: i64,
    pub old_end_index: i64,
    pub new_end_index: i64,
    pub start_position: HostPoint,
    pub old_end_position: HostPoint,
    pub new_end_position: HostPoint,
}
