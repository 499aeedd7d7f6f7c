//! Property-based tests for trick resolution.

use proptest::prelude::*;

use crate::domain::cards_types::{Card, Suit};
use crate::domain::test_gens;
use crate::domain::tricks::{trick_winner, Trick};

/// Oracle: highest trump if any trump was played, otherwise highest card
/// of the led suit.
fn oracle_winner(trick: &Trick, trump: Option<Suit>) -> Card {
    let led = trick.cards[0].card.suit;
    let relevant = |suit: Suit| -> Option<Vec<Card>> {
        let cards: Vec<Card> = trick
            .cards
            .iter()
            .map(|p| p.card)
            .filter(|c| c.suit == suit)
            .collect();
        (!cards.is_empty()).then_some(cards)
    };

    let pool = trump
        .and_then(|t| relevant(t))
        .or_else(|| relevant(led))
        .expect("led suit always has at least the lead card");
    pool.into_iter()
        .max_by_key(|c| c.rank.value())
        .expect("pool is non-empty")
}

fn arb_trump() -> impl Strategy<Value = Option<Suit>> {
    prop_oneof![
        Just(None),
        Just(Some(Suit::Clubs)),
        Just(Some(Suit::Diamonds)),
        Just(Some(Suit::Hearts)),
        Just(Some(Suit::Spades)),
    ]
}

proptest! {
    /// The engine winner always matches the oracle, trump or not.
    #[test]
    fn winner_matches_oracle(trick in test_gens::complete_trick(), trump in arb_trump()) {
        let winner_seat = trick_winner(&trick, trump).unwrap();
        let winner_card = trick
            .cards
            .iter()
            .find(|p| p.seat == winner_seat)
            .expect("winner played into the trick")
            .card;
        prop_assert_eq!(winner_card, oracle_winner(&trick, trump));
    }

    /// A trump card in the trick always takes it over any non-trump.
    #[test]
    fn trump_always_beats_non_trump(trick in test_gens::complete_trick(), trump_suit in 0..4usize) {
        let trump = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades][trump_suit];
        let winner_seat = trick_winner(&trick, Some(trump)).unwrap();
        let winner_card = trick
            .cards
            .iter()
            .find(|p| p.seat == winner_seat)
            .unwrap()
            .card;
        let any_trump_played = trick.cards.iter().any(|p| p.card.suit == trump);
        if any_trump_played {
            prop_assert_eq!(winner_card.suit, trump);
        } else {
            prop_assert_eq!(winner_card.suit, trick.cards[0].card.suit);
        }
    }

    /// Without trump the winner always followed the led suit.
    #[test]
    fn no_trump_winner_follows_lead(trick in test_gens::complete_trick()) {
        let led = trick.cards[0].card.suit;
        let winner_seat = trick_winner(&trick, None).unwrap();
        let winner_card = trick
            .cards
            .iter()
            .find(|p| p.seat == winner_seat)
            .unwrap()
            .card;
        prop_assert_eq!(winner_card.suit, led);
        for play in &trick.cards {
            if play.card.suit == led {
                prop_assert!(winner_card.rank.value() >= play.card.rank.value());
            }
        }
    }
}
