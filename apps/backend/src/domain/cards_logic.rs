//! Pure hand-analysis helpers: sorting, HCP, shape, balance, formatting.

use crate::domain::cards_types::{Card, Rank, Suit};

/// Bridge display order: suits S, H, D, C descending, ranks descending.
/// Distinct from the auction strain order and from `Card`'s `Ord`.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort_by(|a, b| {
        b.suit
            .cmp(&a.suit)
            .then_with(|| b.rank.value().cmp(&a.rank.value()))
    });
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn cards_in_suit(hand: &[Card], suit: Suit) -> Vec<Card> {
    hand.iter().copied().filter(|c| c.suit == suit).collect()
}

pub fn suit_length(hand: &[Card], suit: Suit) -> usize {
    hand.iter().filter(|c| c.suit == suit).count()
}

pub fn has_card(hand: &[Card], card: Card) -> bool {
    hand.iter().any(|c| *c == card)
}

/// Remove one copy of `card`, returning it, or `None` if absent.
pub fn remove_card(hand: &mut Vec<Card>, card: Card) -> Option<Card> {
    let pos = hand.iter().position(|c| *c == card)?;
    Some(hand.remove(pos))
}

/// High Card Points: A=4, K=3, Q=2, J=1.
pub fn hcp(hand: &[Card]) -> u8 {
    hand.iter()
        .map(|c| match c.rank {
            Rank::Ace => 4,
            Rank::King => 3,
            Rank::Queen => 2,
            Rank::Jack => 1,
            _ => 0,
        })
        .sum()
}

/// Suit lengths sorted descending, e.g. `[5, 4, 2, 2]` for a 5-4-2-2 hand.
pub fn shape(hand: &[Card]) -> [u8; 4] {
    let mut lengths = [0u8; 4];
    for card in hand {
        lengths[card.suit as usize] += 1;
    }
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    lengths
}

/// Balanced shapes: 4-3-3-3, 4-4-3-2, 5-3-3-2.
pub fn is_balanced(hand: &[Card]) -> bool {
    matches!(shape(hand), [4, 3, 3, 3] | [4, 4, 3, 2] | [5, 3, 3, 2])
}

fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
    }
}

/// Display form with a suit symbol, e.g. "A♠".
pub fn format_card(card: Card) -> String {
    format!("{}{}", card.rank.letter(), suit_symbol(card.suit))
}

/// Hand grouped by suit in display order, e.g. "AK♠ QJ♥ T♦".
pub fn format_hand(hand: &[Card]) -> String {
    let mut sorted = hand.to_vec();
    sort_hand(&mut sorted);

    let mut parts = Vec::with_capacity(4);
    for suit in [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let ranks: String = sorted
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.letter())
            .collect();
        if !ranks.is_empty() {
            parts.push(format!("{ranks}{}", suit_symbol(suit)));
        }
    }
    parts.join(" ")
}
