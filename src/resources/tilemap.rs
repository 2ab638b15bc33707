//! Static binary collision map for tile-based level geometry.
//!
//! Each cell is either solid (`1`) or empty (`0`). Besides the body-vs-body
//! test, an entity can be probed against the map at eight points around its
//! half extents, two per side, to learn which of its sides touch solid tiles.
//!
//! Text format:
//! ```text
//! Width 4
//! Height 3
//! 1 1 1 1
//! 1 0 0 1
//! 1 1 1 1
//! ```
//! Rows are listed top to bottom; row 0 is the top of the map.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Vector2;

pub const COLLISION_LEFT: u8 = 0x1;
pub const COLLISION_RIGHT: u8 = 0x2;
pub const COLLISION_TOP: u8 = 0x4;
pub const COLLISION_BOTTOM: u8 = 0x8;

/// Bitmask of `COLLISION_*` sides.
pub type CollisionFlags = u8;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing or malformed header line `{0}`")]
    Header(&'static str),
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("map has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },
    #[error("invalid cell value `{0}`")]
    Cell(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryCollisionMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl BinaryCollisionMap {
    /// Map built from rows of `0`/`1`, top row first.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            cells.extend(row.iter().map(|v| u8::from(*v != 0)));
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let width = header_value(lines.next(), "Width")?;
        let height = header_value(lines.next(), "Height")?;

        let mut cells = Vec::with_capacity(width * height);
        let mut found_rows = 0;
        for (row, line) in lines.enumerate() {
            let before = cells.len();
            for token in line.split_whitespace() {
                match token {
                    "0" => cells.push(0),
                    "1" => cells.push(1),
                    other => return Err(MapError::Cell(other.to_string())),
                }
            }
            let found = cells.len() - before;
            if found != width {
                return Err(MapError::RowLength {
                    row,
                    found,
                    expected: width,
                });
            }
            found_rows += 1;
        }
        if found_rows != height {
            return Err(MapError::RowCount {
                found: found_rows,
                expected: height,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value of the cell containing `(x, y)`; outside the map is empty.
    pub fn cell_value(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// Probe the eight points around an instance centred on `position` with
    /// extents `scale` (in cells) and report which sides hit solid cells.
    pub fn check_instance_collision(&self, position: Vector2, scale: Vector2) -> CollisionFlags {
        let half = scale * 0.5;
        let quarter = scale * 0.25;
        let probes: [(Vector2, CollisionFlags); 8] = [
            (Vector2::new(position.x - half.x, position.y - quarter.y), COLLISION_LEFT),
            (Vector2::new(position.x - half.x, position.y + quarter.y), COLLISION_LEFT),
            (Vector2::new(position.x + half.x, position.y - quarter.y), COLLISION_RIGHT),
            (Vector2::new(position.x + half.x, position.y + quarter.y), COLLISION_RIGHT),
            (Vector2::new(position.x - quarter.x, position.y - half.y), COLLISION_TOP),
            (Vector2::new(position.x + quarter.x, position.y - half.y), COLLISION_TOP),
            (Vector2::new(position.x - quarter.x, position.y + half.y), COLLISION_BOTTOM),
            (Vector2::new(position.x + quarter.x, position.y + half.y), COLLISION_BOTTOM),
        ];
        probes
            .iter()
            .filter(|(point, _)| self.cell_value(point.x as i32, point.y as i32) != 0)
            .fold(0, |flags, (_, side)| flags | *side)
    }
}

fn header_value(line: Option<&str>, key: &'static str) -> Result<usize, MapError> {
    let mut parts = line.ok_or(MapError::Header(key))?.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(k), Some(v)) if k == key => v.parse().map_err(|_| MapError::Header(key)),
        _ => Err(MapError::Header(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> BinaryCollisionMap {
        BinaryCollisionMap::from_rows(&[
            &[1, 1, 1, 1, 1],
            &[1, 0, 0, 0, 1],
            &[1, 0, 0, 0, 1],
            &[1, 1, 1, 1, 1],
        ])
    }

    #[test]
    fn test_cell_value_out_of_bounds_is_empty() {
        let map = room();
        assert_eq!(map.cell_value(0, 0), 1);
        assert_eq!(map.cell_value(2, 1), 0);
        assert_eq!(map.cell_value(-1, 0), 0);
        assert_eq!(map.cell_value(5, 0), 0);
    }

    #[test]
    fn test_free_instance_has_no_flags() {
        let map = room();
        assert_eq!(
            map.check_instance_collision(Vector2::new(2.5, 2.0), Vector2::new(1.0, 1.0)),
            0
        );
    }

    #[test]
    fn test_flags_report_each_touching_side() {
        let map = room();
        let flags = map.check_instance_collision(Vector2::new(1.4, 2.6), Vector2::new(1.0, 1.0));
        assert_ne!(flags & COLLISION_LEFT, 0);
        assert_ne!(flags & COLLISION_BOTTOM, 0);
        assert_eq!(flags & COLLISION_RIGHT, 0);
        assert_eq!(flags & COLLISION_TOP, 0);
    }

    #[test]
    fn test_parse_round_trip() {
        let map = BinaryCollisionMap::parse("Width 3\nHeight 2\n1 0 1\n0 0 0\n").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.cell_value(2, 0), 1);
        assert_eq!(map.cell_value(1, 1), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            BinaryCollisionMap::parse("Height 2\n"),
            Err(MapError::Header("Width"))
        ));
        assert!(matches!(
            BinaryCollisionMap::parse("Width 2\nHeight 1\n1 0 1\n"),
            Err(MapError::RowLength { .. })
        ));
        assert!(matches!(
            BinaryCollisionMap::parse("Width 2\nHeight 2\n1 0\n"),
            Err(MapError::RowCount { .. })
        ));
        assert!(matches!(
            BinaryCollisionMap::parse("Width 1\nHeight 1\n7\n"),
            Err(MapError::Cell(_))
        ));
    }
}
