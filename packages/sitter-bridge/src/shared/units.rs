//! Host-unit <-> engine-byte conversion
//!
//! The engine counts bytes. The host counts units of its text encoding
//! (16-bit code units by default), so every offset and point column is
//! divided on the way out and multiplied on the way in.

use crate::config::TextEncoding;
use crate::errors::{BridgeError, Result};
use crate::shared::models::{HostPoint, Point, Range, TextEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Units {
    bytes_per_unit: u32,
}

impl Default for Units {
    fn default() -> Self {
        Self::new(TextEncoding::default())
    }
}

impl Units {
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            bytes_per_unit: encoding.bytes_per_unit(),
        }
    }

    pub fn bytes_per_unit(&self) -> u32 {
        self.bytes_per_unit
    }

    #[inline]
    pub fn offset_to_host(&self, byte: usize) -> u32 {
        u32::try_from(byte / self.bytes_per_unit as usize).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn point_to_host(&self, point: tree_sitter::Point) -> Point {
        Point::new(
            u32::try_from(point.row).unwrap_or(u32::MAX),
            self.offset_to_host(point.column),
        )
    }

    pub fn range_to_host(&self, range: tree_sitter::Range) -> Range {
        Range {
            start_index: self.offset_to_host(range.start_byte),
            end_index: self.offset_to_host(range.end_byte),
            start_position: self.point_to_host(range.start_point),
            end_position: self.point_to_host(range.end_point),
        }
    }

    /// Host offset -> engine byte offset. Negative offsets do not resolve;
    /// offsets past the engine's 32-bit range clamp to its end.
    pub fn offset_from_host(&self, units: i64) -> Result<usize> {
        let units = u64::try_from(units)
            .map_err(|_| BridgeError::unresolved_range(format!("offset {units} is negative")))?;
        let bytes = units.saturating_mul(u64::from(self.bytes_per_unit));
        Ok(bytes.min(u64::from(u32::MAX)) as usize)
    }

    pub fn point_from_host(&self, point: HostPoint) -> Result<tree_sitter::Point> {
        let row = u64::try_from(point.row).map_err(|_| {
            BridgeError::unresolved_range(format!("row {} is negative", point.row))
        })?;
        let column = self.offset_from_host(point.column).map_err(|_| {
            BridgeError::unresolved_range(format!("column {} is negative", point.column))
        })?;
        Ok(tree_sitter::Point::new(row.min(u64::from(u32::MAX)) as usize, column))
    }

    pub fn edit_from_host(&self, edit: &TextEdit) -> Result<tree_sitter::InputEdit> {
        Ok(tree_sitter::InputEdit {
            start_byte: self.offset_from_host(edit.start_index)?,
            old_end_byte: self.offset_from_host(edit.old_end_index)?,
            new_end_byte: self.offset_from_host(edit.new_end_index)?,
            start_position: self.point_from_host(edit.start_position)?,
            old_end_position: self.point_from_host(edit.old_end_position)?,
            new_end_position: self.point_from_host(edit.new_end_position)?,
        })
    }
}
