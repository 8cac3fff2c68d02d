use serde::{Deserialize, Serialize};

use crate::dims::Offset;

use self::CellWall::*;

/// Single maze cell. A wall flag set to `true` means the edge is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    #[serde(skip)]
    pub(crate) visited: bool,
}

impl Cell {
    /// Cell with all four walls standing.
    pub fn new() -> Cell {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
        }
    }

    /// Cell with no walls at all.
    pub fn open() -> Cell {
        Cell {
            top: false,
            right: false,
            bottom: false,
            left: false,
            visited: false,
        }
    }

    pub fn with_walls(top: bool, right: bool, bottom: bool, left: bool) -> Cell {
        Cell {
            top,
            right,
            bottom,
            left,
            visited: false,
        }
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        self.set_wall(wall, false);
    }

    pub fn set_wall(&mut self, wall: CellWall, value: bool) {
        match wall {
            Top => self.top = value,
            Right => self.right = value,
            Bottom => self.bottom = value,
            Left => self.left = value,
        }
    }

    pub fn get_wall(&self, wall: CellWall) -> bool {
        match wall {
            Top => self.top,
            Right => self.right,
            Bottom => self.bottom,
            Left => self.left,
        }
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.get_wall(wall)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn open_walls(&self) -> impl Iterator<Item = CellWall> + '_ {
        CellWall::get_in_order()
            .into_iter()
            .filter(|&w| self.is_open(w))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    pub fn to_offset(&self) -> Offset {
        match self {
            Self::Top => Offset(-1, 0),
            Self::Right => Offset(0, 1),
            Self::Bottom => Offset(1, 0),
            Self::Left => Offset(0, -1),
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    /// Directions in the order every search tries them: up, down, left, right.
    pub fn get_in_order() -> [CellWall; 4] {
        [Top, Bottom, Left, Right]
    }

    pub fn from_offset(off: Offset) -> Option<CellWall> {
        match off {
            Offset(-1, 0) => Some(Top),
            Offset(0, 1) => Some(Right),
            Offset(1, 0) => Some(Bottom),
            Offset(0, -1) => Some(Left),
            _ => None,
        }
    }
}
