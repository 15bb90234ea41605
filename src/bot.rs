use std::fmt;

use crate::solve::{find_path, Path};
use crate::{Cell, TrackView, Vector};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveError {
    /// The path is used up, or no path to the target exists.
    NoViableMove,
    /// The next path cell is where the car already is.
    DegenerateMove,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoViableMove => "no path left to follow".fmt(f),
            MoveError::DegenerateMove => "next step is the current location".fmt(f),
        }
    }
}

impl std::error::Error for MoveError {}

/// Follows a path to the track target, one cell per call.
///
/// The path is planned on the first call to [`Bot::next_move`] and reused
/// afterwards, so the caller must report the location the previous move led to.
#[derive(Debug, Default, Clone)]
pub struct Bot {
    path: Option<Path>,
}

impl Bot {
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Cells still to visit, if a path has been planned.
    pub fn remaining(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Forget the planned path. The next call plans again from scratch.
    pub fn reset(&mut self) {
        self.path = None;
    }

    pub fn next_move<V: TrackView + ?Sized>(
        &mut self,
        location: Cell,
        view: &V,
    ) -> Result<Vector, MoveError> {
        let path = self.path.get_or_insert_with(|| {
            find_path(view, location, view.target_cell(), view.configuration())
        });
        let next = path.pop_front().ok_or(MoveError::NoViableMove)?;
        match next - location {
            Vector::ZERO => Err(MoveError::DegenerateMove),
            v => Ok(v),
        }
    }
}
