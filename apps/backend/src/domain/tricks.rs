//! Follow-suit legality and trick resolution.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards_logic::{cards_in_suit, hand_has_suit, has_card};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::seats::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

pub const TRICK_SIZE: usize = 4;
pub const TRICKS_PER_HAND: u8 = 13;

/// A card on the table, attributed to the seat that played it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub seat: Seat,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// One trick: up to four cards added in strict clockwise order from the
/// leader. Complete at exactly four cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    /// 1-based trick number within the hand (1..=13).
    pub number: u8,
    pub leader: Seat,
    pub cards: Vec<PlayedCard>,
    pub winner: Option<Seat>,
    pub complete: bool,
}

impl Trick {
    pub fn new(number: u8, leader: Seat) -> Self {
        Self {
            number,
            leader,
            cards: Vec::with_capacity(TRICK_SIZE),
            winner: None,
            complete: false,
        }
    }

    /// Suit of the first card played, once any card is down.
    #[inline]
    pub fn led_suit(&self) -> Option<Suit> {
        self.cards.first().map(|p| p.card.suit)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cards.len() == TRICK_SIZE
    }

    /// Seat due to play next in this trick.
    #[inline]
    pub fn seat_to_play(&self) -> Seat {
        self.leader.nth_next(self.cards.len())
    }
}

/// Cards the hand may legally play into the trick.
///
/// Leading: the whole hand. Following: cards of the led suit when any are
/// held, otherwise the whole hand. Trump never constrains what may be played.
pub fn legal_plays(hand: &[Card], trick: &Trick) -> Vec<Card> {
    let Some(led) = trick.led_suit() else {
        return hand.to_vec();
    };
    if hand_has_suit(hand, led) {
        cards_in_suit(hand, led)
    } else {
        hand.to_vec()
    }
}

/// Validate that `card` from `hand` may be played into `trick`.
pub fn validate_play(card: Card, hand: &[Card], trick: &Trick) -> Result<(), DomainError> {
    if !has_card(hand, card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{card} is not in hand"),
        ));
    }
    if let Some(led) = trick.led_suit() {
        if card.suit != led && hand_has_suit(hand, led) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("must follow {led:?}"),
            ));
        }
    }
    Ok(())
}

/// Resolve a completed trick to the winning seat.
///
/// A trump beats any non-trump; within the relevant suit (both trump, or
/// both following the led suit) the higher rank wins; an off-suit non-trump
/// card can never win. Calling this on a short trick is an engine bug.
pub fn trick_winner(trick: &Trick, trump: Option<Suit>) -> Result<Seat, DomainError> {
    if trick.cards.len() != TRICK_SIZE {
        return Err(DomainError::invariant(format!(
            "trick {} has {} cards, cannot resolve a winner",
            trick.number,
            trick.cards.len()
        )));
    }

    let mut winning = &trick.cards[0];
    for play in &trick.cards[1..] {
        if beats(play.card, winning.card, trump) {
            winning = play;
        }
    }
    Ok(winning.seat)
}

/// Whether `challenger` beats the current `winning` card.
/// The led suit is implied: `winning` either follows it or is trump.
fn beats(challenger: Card, winning: Card, trump: Option<Suit>) -> bool {
    if let Some(trump) = trump {
        let challenger_trump = challenger.suit == trump;
        let winning_trump = winning.suit == trump;
        if challenger_trump != winning_trump {
            return challenger_trump;
        }
    }
    challenger.suit == winning.suit && challenger.rank.value() > winning.rank.value()
}
