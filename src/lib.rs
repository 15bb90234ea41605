use std::hash::Hash;
use std::ops::{Add, Sub};

mod fmt;
mod parse;
pub mod bot;
pub mod solve;

pub use bot::{Bot, MoveError};
pub use solve::Path;

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours, in the order of `Direction::ALL`.
    pub fn neighbors(self) -> [Cell; 4] {
        Direction::ALL.map(|dir| self + dir.vector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Cell {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Cell {
    type Output = Cell;
    fn add(self, rhs: Vector) -> Cell {
        Cell::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    pub fn vector(self) -> Vector {
        const VECTORS: [Vector; 4] = [
            Vector::new(1, 0),
            Vector::new(0, 1),
            Vector::new(-1, 0),
            Vector::new(0, -1),
        ];
        VECTORS[self as usize]
    }

    pub fn from_vector(v: Vector) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.vector() == v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(u8);

impl Color {
    /// Gates and buttons are lettered, so there are as many colors as letters.
    pub const COUNT: u8 = 26;

    pub fn new(idx: u8) -> Option<Self> {
        (idx < Self::COUNT).then_some(Self(idx))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Gate(Color),
    Button(Color),
}

/// Set of colors whose gates are currently open.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Toggles(u32);

impl Toggles {
    pub fn is_open(self, color: Color) -> bool {
        self.0 & (1 << color.0) != 0
    }

    #[must_use]
    pub fn toggled(self, color: Color) -> Self {
        Self(self.0 ^ (1 << color.0))
    }
}

/// The static layout of a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    width: u16,
    height: u16,
    grid: Box<[Tile]>,
    target: Cell,
}

impl Track {
    pub fn target(&self) -> Cell {
        self.target
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        let x = u16::try_from(cell.x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(cell.y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.idx(cell).map(|idx| self.grid[idx])
    }

    fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        let width = self.width as usize;
        self.grid.iter().enumerate().map(move |(idx, &tile)| {
            let cell = Cell::new((idx % width) as i32, (idx / width) as i32);
            (cell, tile)
        })
    }

    pub fn is_open(&self, toggles: Toggles, cell: Cell) -> bool {
        match self.tile(cell) {
            Some(Tile::Empty | Tile::Button(_)) => true,
            Some(Tile::Gate(color)) => toggles.is_open(color),
            Some(Tile::Wall) | None => false,
        }
    }

    pub fn traversable_cells(&self, toggles: Toggles) -> IndexSet<Cell> {
        self.cells()
            .map(|(cell, _)| cell)
            .filter(|&cell| self.is_open(toggles, cell))
            .collect()
    }

    pub fn trigger_cells(&self, _toggles: Toggles) -> IndexMap<Cell, Color> {
        self.cells()
            .filter_map(|(cell, tile)| match tile {
                Tile::Button(color) => Some((cell, color)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GoError {
    NotAStep,
    Blocked,
}

/// A track together with the live car position and toggle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Race {
    pub track: Track,
    pub car: Cell,
    pub toggles: Toggles,
}

impl Race {
    pub fn is_finished(&self) -> bool {
        self.car == self.track.target
    }

    pub fn drive(&mut self, v: Vector) -> Result<(), GoError> {
        if v.dx.abs() + v.dy.abs() != 1 {
            return Err(GoError::NotAStep);
        }
        let next = self.car + v;
        if !self.track.is_open(self.toggles, next) {
            return Err(GoError::Blocked);
        }
        self.car = next;
        if let Some(Tile::Button(color)) = self.track.tile(next) {
            self.toggles = self.toggles.toggled(color);
        }
        Ok(())
    }
}

/// What the pathfinder and the bot need to know about a track.
///
/// Configurations are treated as values: `apply_toggle` must return a new
/// configuration and leave its input untouched, and `fingerprint` must give
/// equal bytes for configurations that behave identically.
pub trait TrackView {
    type Config: Clone;
    type Toggle: Copy + Eq + Hash;

    fn configuration(&self) -> &Self::Config;

    fn target_cell(&self) -> Cell;

    fn is_traversable(&self, config: &Self::Config, cell: Cell) -> bool;

    fn trigger_at(&self, config: &Self::Config, cell: Cell) -> Option<Self::Toggle>;

    fn apply_toggle(&self, config: &Self::Config, toggle: Self::Toggle) -> Self::Config;

    fn fingerprint(&self, config: &Self::Config) -> Box<[u8]>;
}

impl TrackView for Race {
    type Config = Toggles;
    type Toggle = Color;

    fn configuration(&self) -> &Toggles {
        &self.toggles
    }

    fn target_cell(&self) -> Cell {
        self.track.target
    }

    fn is_traversable(&self, config: &Toggles, cell: Cell) -> bool {
        self.track.is_open(*config, cell)
    }

    fn trigger_at(&self, _config: &Toggles, cell: Cell) -> Option<Color> {
        match self.track.tile(cell)? {
            Tile::Button(color) => Some(color),
            _ => None,
        }
    }

    fn apply_toggle(&self, config: &Toggles, color: Color) -> Toggles {
        config.toggled(color)
    }

    fn fingerprint(&self, config: &Toggles) -> Box<[u8]> {
        config.0.to_le_bytes().into()
    }
}
