//! Integer grid coordinates and the four axis-aligned directions

use std::fmt;
use std::ops::Add;

/// Cell position on the grid
///
/// Signed so that neighbor arithmetic may step off the grid and be rejected
/// by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    /// Column, growing east
    pub x: i32,
    /// Row, growing north
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate from its components
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbor one step in `direction`
    ///
    /// Components wrap at the `i32` limits; a wrapped neighbor lies outside any grid.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let [dx, dy] = direction.offset();
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }

    /// All four neighbors in `Direction::ALL` order, in bounds or not
    pub const fn neighbors4(self) -> [Self; 4] {
        [
            self.step(Direction::East),
            self.step(Direction::North),
            self.step(Direction::West),
            self.step(Direction::South),
        ]
    }

    /// Direction leading from `self` to an adjacent `other`
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.step(direction) == other)
    }

    /// Manhattan distance between two coordinates
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<Direction> for Coordinate {
    type Output = Self;

    fn add(self, rhs: Direction) -> Self {
        self.step(rhs)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned neighbor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +x
    East,
    /// +y
    North,
    /// -x
    West,
    /// -y
    South,
}

impl Direction {
    /// Enumeration order used when building candidate lists
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Unit offset `[dx, dy]`
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::East => [1, 0],
            Self::North => [0, 1],
            Self::West => [-1, 0],
            Self::South => [0, -1],
        }
    }

    /// The direction pointing back
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }
}
