//! Board and ship geometry

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A cell on a square board. Signed so that out-of-range requests can be
/// represented and rejected instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check the cell lies on a `size` x `size` board
    pub fn in_bounds(&self, size: i32) -> bool {
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Column letter + row number, e.g. `(2, 3)` is `C3`.
/// Boards are capped at 26 columns by configuration.
pub fn cell_label(x: i32, y: i32) -> String {
    let column = char::from(b'A' + x.clamp(0, 25) as u8);
    format!("{}{}", column, y)
}

/// Direction a ship extends from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Extends towards increasing `x`
    Horizontal,
    /// Extends towards increasing `y`
    Vertical,
}

impl Orientation {
    fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// A placed ship. Damage is never stored here, it is derived from shot history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub origin: Coordinate,
    pub orientation: Orientation,
    pub length: usize,
}

impl Ship {
    pub fn new(origin: Coordinate, orientation: Orientation, length: usize) -> Self {
        Self {
            origin,
            orientation,
            length,
        }
    }

    /// Iterate the cells covered by this ship, starting at the origin
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let (dx, dy) = self.orientation.step();
        (0..self.length as i32)
            .map(move |i| Coordinate::new(self.origin.x + dx * i, self.origin.y + dy * i))
    }

    /// Set of cells covered by this ship
    pub fn occupied_cells(&self) -> HashSet<Coordinate> {
        self.cells().collect()
    }

    /// Whether the ship lies entirely on a `size` x `size` board
    pub fn fits(&self, size: i32) -> bool {
        self.length > 0 && self.cells().all(|cell| cell.in_bounds(size))
    }
}

/// Union of the cells of every ship in `ships`
pub fn fleet_cells<'a>(ships: impl IntoIterator<Item = &'a Ship>) -> HashSet<Coordinate> {
    ships.into_iter().flat_map(Ship::occupied_cells).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_ship_extends_along_x() {
        let ship = Ship::new(Coordinate::new(2, 3), Orientation::Horizontal, 3);
        let cells: Vec<_> = ship.cells().collect();
        assert_eq!(
            cells,
            vec![
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
                Coordinate::new(4, 3)
            ]
        );
    }

    #[test]
    fn vertical_ship_extends_along_y() {
        let ship = Ship::new(Coordinate::new(2, 3), Orientation::Vertical, 2);
        let expected: HashSet<_> = [(2, 3), (2, 4)].into_iter().map(Coordinate::from).collect();
        assert_eq!(ship.occupied_cells(), expected);
    }

    #[test]
    fn fits_rejects_overhang() {
        assert!(Ship::new(Coordinate::new(5, 0), Orientation::Horizontal, 5).fits(10));
        assert!(!Ship::new(Coordinate::new(6, 0), Orientation::Horizontal, 5).fits(10));
        assert!(!Ship::new(Coordinate::new(0, 9), Orientation::Vertical, 2).fits(10));
        assert!(!Ship::new(Coordinate::new(-1, 0), Orientation::Vertical, 2).fits(10));
    }

    #[test]
    fn bounds_are_half_open() {
        assert!(Coordinate::new(0, 0).in_bounds(10));
        assert!(Coordinate::new(9, 9).in_bounds(10));
        assert!(!Coordinate::new(10, 0).in_bounds(10));
        assert!(!Coordinate::new(0, -1).in_bounds(10));
    }

    #[test]
    fn labels_use_column_letter_and_row() {
        assert_eq!(cell_label(0, 0), "A0");
        assert_eq!(cell_label(2, 3), "C3");
        assert_eq!(cell_label(9, 9), "J9");
    }

    #[test]
    fn fleet_cells_is_union() {
        let ships = vec![
            Ship::new(Coordinate::new(0, 0), Orientation::Horizontal, 2),
            Ship::new(Coordinate::new(0, 0), Orientation::Vertical, 2),
        ];
        assert_eq!(fleet_cells(&ships).len(), 3);
    }
}
