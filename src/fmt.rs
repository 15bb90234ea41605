use std::fmt;

use crate::{Cell, Direction, GoError, Race, Tile, Vector};

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, tile) in self.track.cells() {
            if cell.x == 0 && cell.y != 0 {
                "\n".fmt(f)?;
            }
            if cell == self.car {
                "@".fmt(f)?;
            } else if cell == self.track.target {
                "T".fmt(f)?;
            } else {
                match tile {
                    Tile::Gate(color) if self.toggles.is_open(color) => ":".fmt(f)?,
                    tile => tile.fmt(f)?,
                }
            }
        }
        "\n".fmt(f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tile::Empty => ".".fmt(f),
            Tile::Wall => "#".fmt(f),
            Tile::Gate(color) => char::from(b'A' + color.0).fmt(f),
            Tile::Button(color) => char::from(b'a' + color.0).fmt(f),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => "R".fmt(f),
            Direction::Down => "D".fmt(f),
            Direction::Left => "L".fmt(f),
            Direction::Up => "U".fmt(f),
        }
    }
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::NotAStep => "move is not a single orthogonal step".fmt(f),
            GoError::Blocked => "destination cell is blocked".fmt(f),
        }
    }
}

impl std::error::Error for GoError {}
