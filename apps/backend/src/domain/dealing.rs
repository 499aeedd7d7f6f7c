//! Deck construction, shuffling, and deal setup.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards_logic::sort_hand;
use crate::domain::cards_types::{Card, Rank, Suit};
use crate::domain::seats::{Seat, Side};
use crate::errors::domain::DomainError;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;

/// Generate a full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
    let ranks = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in suits {
        for rank in ranks {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Per-partnership vulnerability flags for the current board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub ns: bool,
    pub ew: bool,
}

impl Vulnerability {
    pub const NONE: Vulnerability = Vulnerability { ns: false, ew: false };

    #[inline]
    pub fn side_vulnerable(self, side: Side) -> bool {
        match side {
            Side::NorthSouth => self.ns,
            Side::EastWest => self.ew,
        }
    }
}

/// Which rule derives a board's vulnerability.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VulnerabilityRule {
    /// Standard duplicate rotation keyed by board number.
    Board,
    /// Simplified rotation keyed by the dealer's seat.
    Dealer,
}

impl VulnerabilityRule {
    pub fn vulnerability(self, dealer: Seat, board_no: u32) -> Vulnerability {
        match self {
            VulnerabilityRule::Board => vulnerability_for_board(board_no),
            VulnerabilityRule::Dealer => vulnerability_for_dealer(dealer),
        }
    }
}

/// Standard duplicate rotation: boards ≡ 1,8,11,14 (mod 16) none vulnerable;
/// ≡ 2,5,12,15 NS; ≡ 3,6,9,16 EW; all others both.
pub fn vulnerability_for_board(board_no: u32) -> Vulnerability {
    let cycle = (board_no.saturating_sub(1) % 16) + 1;
    match cycle {
        1 | 8 | 11 | 14 => Vulnerability { ns: false, ew: false },
        2 | 5 | 12 | 15 => Vulnerability { ns: true, ew: false },
        3 | 6 | 9 | 16 => Vulnerability { ns: false, ew: true },
        _ => Vulnerability { ns: true, ew: true },
    }
}

/// Simplified per-dealer rotation retained as a config alternative.
pub fn vulnerability_for_dealer(dealer: Seat) -> Vulnerability {
    match dealer {
        Seat::North => Vulnerability { ns: false, ew: false },
        Seat::East => Vulnerability { ns: true, ew: false },
        Seat::South => Vulnerability { ns: false, ew: true },
        Seat::West => Vulnerability { ns: true, ew: true },
    }
}

/// One dealt board: four 13-card hands partitioning the deck exactly.
/// Immutable after creation; retained for review and hand history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    /// Hands indexed by seat (N, E, S, W).
    pub hands: [Vec<Card>; 4],
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    #[serde(with = "time::serde::rfc3339")]
    pub dealt_at: OffsetDateTime,
}

impl Deal {
    #[inline]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat.index()]
    }

    /// Check the partition invariant: 4 × 13 distinct cards covering the deck.
    pub fn verify_partition(&self) -> Result<(), DomainError> {
        let mut all: Vec<Card> = self.hands.iter().flatten().copied().collect();
        if all.len() != DECK_SIZE {
            return Err(DomainError::invariant(format!(
                "deal {} holds {} cards, expected {DECK_SIZE}",
                self.id,
                all.len()
            )));
        }
        all.sort();
        all.dedup();
        if all.len() != DECK_SIZE {
            return Err(DomainError::invariant(format!(
                "deal {} contains duplicate cards",
                self.id
            )));
        }
        Ok(())
    }
}

/// Shuffle a fresh deck with the supplied RNG and split it into four hands.
///
/// `SliceRandom::shuffle` is a Fisher-Yates pass, so any uniform RNG yields a
/// uniform permutation. Hands are sorted into display order.
pub fn deal_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    dealer: Seat,
    vulnerability: Vulnerability,
) -> Deal {
    let mut deck = full_deck();
    deck.shuffle(rng);

    let mut hands: [Vec<Card>; 4] = Default::default();
    for (i, hand) in hands.iter_mut().enumerate() {
        *hand = deck[i * HAND_SIZE..(i + 1) * HAND_SIZE].to_vec();
        sort_hand(hand);
    }

    Deal {
        id: Uuid::new_v4(),
        hands,
        dealer,
        vulnerability,
        dealt_at: OffsetDateTime::now_utc(),
    }
}

/// Deal with the process RNG.
pub fn deal(dealer: Seat, vulnerability: Vulnerability) -> Deal {
    deal_with_rng(&mut rand::rng(), dealer, vulnerability)
}
