// The four arrow directions a round can ask for, plus their presentation data.

/// One of the four canonical arrow directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Draw order used by the direction generator.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a `KeyboardEvent.key` value to a direction. Anything that is not one
    /// of the four arrow keys is not a game input.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn key_name(self) -> &'static str {
        match self {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }

    /// Human readable prompt shown under the arrow panel.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "Up arrow key (↑)",
            Direction::Down => "Down arrow key (↓)",
            Direction::Left => "Left arrow key (←)",
            Direction::Right => "Right arrow key (→)",
        }
    }

    /// Panel background colour for this direction.
    pub fn color(self) -> &'static str {
        match self {
            Direction::Up => "#FF6B6B",    // red
            Direction::Down => "#4ECDC4",  // teal
            Direction::Left => "#45B7D1",  // blue
            Direction::Right => "#FFA07A", // orange
        }
    }
}
