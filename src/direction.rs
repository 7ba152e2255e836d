use std::fmt;

/// Compass approach of a road arm.
#[derive(Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// (row, column) of this arm's traffic light in the 3x3 layout grid.
    pub fn grid_cell(&self) -> (usize, usize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (2, 1),
            Direction::East => (1, 2),
            Direction::West => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_sit_in_distinct_cells_around_the_center() {
        let cells: Vec<_> = Direction::ALL.iter().map(Direction::grid_cell).collect();
        for (i, cell) in cells.iter().enumerate() {
            assert_ne!(*cell, (1, 1));
            assert!(!cells[i + 1..].contains(cell));
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }
}
