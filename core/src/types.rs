use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cardinal movement direction on a board where `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub const fn is_opposite(self, other: Self) -> bool {
        self.opposite() as u8 == other as u8
    }

    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Maps a `KeyboardEvent.key` value to a direction.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs_are_symmetric() {
        for direction in Direction::ALL {
            assert!(direction.is_opposite(direction.opposite()));
            assert!(direction.opposite().is_opposite(direction));
            assert!(!direction.is_opposite(direction));
        }
    }

    #[test]
    fn apply_delta_stops_at_every_edge() {
        let bounds = (3, 3);
        assert_eq!(apply_delta((0, 0), Direction::Up.delta(), bounds), None);
        assert_eq!(apply_delta((0, 0), Direction::Left.delta(), bounds), None);
        assert_eq!(apply_delta((2, 2), Direction::Down.delta(), bounds), None);
        assert_eq!(apply_delta((2, 2), Direction::Right.delta(), bounds), None);
        assert_eq!(
            apply_delta((1, 1), Direction::Right.delta(), bounds),
            Some((2, 1))
        );
        assert_eq!(apply_delta((1, 1), Direction::Up.delta(), bounds), Some((1, 0)));
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("w"), None);
    }
}
