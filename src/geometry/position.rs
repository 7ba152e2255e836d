use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn move_in_direction(&self, direction: &Direction, speed: f64) -> Position {
        let mut new_position = *self;
        match direction {
            Direction::South => new_position.y += speed,
            Direction::North => new_position.y -= speed,
            Direction::West => new_position.x -= speed,
            Direction::East => new_position.x += speed,
        }
        new_position
    }

    /// Corner reached by extending this position by `size`.
    pub fn extended_by(&self, size: Size) -> Position {
        Position {
            x: self.x + size.width,
            y: self.y + size.height,
        }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position { x, y }
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Size { width, height }
    }
}
