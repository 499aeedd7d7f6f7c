//! Seat positions and partnership math for the four fixed seats.
//!
//! These live in `domain` so every layer (services, views, transport)
//! shares a single source of truth for rotation and partnerships.

/// One of the four table positions, arranged clockwise N → E → S → W.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

/// A partnership: North-South or East-West.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    NorthSouth,
    EastWest,
}

impl Seat {
    /// All seats in clockwise rotation order starting from North.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Index into seat-keyed arrays (N=0, E=1, S=2, W=3).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }

    #[inline]
    pub fn from_index(i: usize) -> Seat {
        Seat::ALL[i % 4]
    }

    /// Next seat clockwise (N → E → S → W → N).
    #[inline]
    pub fn next(self) -> Seat {
        Seat::from_index(self.index() + 1)
    }

    /// The seat `n` steps clockwise from this one.
    #[inline]
    pub fn nth_next(self, n: usize) -> Seat {
        Seat::from_index(self.index() + n)
    }

    /// Partner sits directly opposite.
    #[inline]
    pub fn partner(self) -> Seat {
        Seat::from_index(self.index() + 2)
    }

    #[inline]
    pub fn side(self) -> Side {
        match self {
            Seat::North | Seat::South => Side::NorthSouth,
            Seat::East | Seat::West => Side::EastWest,
        }
    }

    #[inline]
    pub fn is_partner_of(self, other: Seat) -> bool {
        self.partner() == other
    }

    #[inline]
    pub fn is_opponent_of(self, other: Seat) -> bool {
        self != other && self.partner() != other
    }

    /// Full seat name for logs and history metadata.
    pub fn name(self) -> &'static str {
        match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        }
    }
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::NorthSouth => Side::EastWest,
            Side::EastWest => Side::NorthSouth,
        }
    }

    /// The two seats of this partnership.
    pub fn seats(self) -> [Seat; 2] {
        match self {
            Side::NorthSouth => [Seat::North, Seat::South],
            Side::EastWest => [Seat::East, Seat::West],
        }
    }
}
