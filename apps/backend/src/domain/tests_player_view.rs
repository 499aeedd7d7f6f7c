use crate::domain::bidding::BidAction;
use crate::domain::cards_types::Strain;
use crate::domain::dealing::Vulnerability;
use crate::domain::player_view::project;
use crate::domain::seats::Seat;
use crate::domain::state::GamePhase;
use crate::domain::test_state_helpers::{bid, dealt_state, run_auction};
use crate::domain::actions::{apply_action, GameAction};

const NONE_VUL: Vulnerability = Vulnerability { ns: false, ew: false };

fn contract_state() -> crate::domain::state::GameState {
    let mut state = dealt_state(Seat::North, NONE_VUL);
    run_auction(
        &mut state,
        &[
            (Seat::North, bid(1, Strain::NoTrump)),
            (Seat::East, BidAction::Pass),
            (Seat::South, BidAction::Pass),
            (Seat::West, BidAction::Pass),
        ],
    )
    .unwrap();
    state
}

fn lead(state: &mut crate::domain::state::GameState) {
    apply_action(
        state,
        GameAction::PlayCard {
            seat: Seat::East,
            card: "2H".parse().unwrap(),
        },
    )
    .unwrap();
}

#[test]
fn during_bidding_only_the_own_hand_is_visible() {
    let state = dealt_state(Seat::North, NONE_VUL);
    for viewer in Seat::ALL {
        let view = project(&state, viewer);
        for seat in Seat::ALL {
            let hand = &view.hands[seat.index()];
            if seat == viewer {
                assert_eq!(hand.len(), 13, "{viewer} must see their own hand");
            } else {
                assert!(hand.is_empty(), "{viewer} must not see {seat}'s hand");
            }
        }
        assert!(view.original_hands.is_none());
    }
}

#[test]
fn dummy_stays_hidden_until_the_opening_lead() {
    let state = contract_state();
    // Contract resolved (dummy is South) but no card played yet
    for viewer in [Seat::East, Seat::West, Seat::North] {
        let view = project(&state, viewer);
        assert!(
            view.hands[Seat::South.index()].is_empty(),
            "dummy must stay hidden for {viewer} before the lead"
        );
    }
}

#[test]
fn dummy_is_exposed_to_everyone_after_the_opening_lead() {
    let mut state = contract_state();
    lead(&mut state);

    for viewer in Seat::ALL {
        let view = project(&state, viewer);
        assert_eq!(
            view.hands[Seat::South.index()].len(),
            13,
            "dummy visible to {viewer} after the lead"
        );
        // Other hidden hands stay hidden
        for seat in [Seat::East, Seat::West, Seat::North] {
            if seat != viewer {
                assert!(view.hands[seat.index()].is_empty());
            }
        }
    }
}

#[test]
fn dummy_exposure_survives_into_later_tricks() {
    let mut state = contract_state();
    lead(&mut state);
    for (seat, token) in [(Seat::South, "2D"), (Seat::West, "2C"), (Seat::North, "2S")] {
        apply_action(
            &mut state,
            GameAction::PlayCard {
                seat,
                card: token.parse().unwrap(),
            },
        )
        .unwrap();
    }
    // First trick resolved, second trick has no cards yet; the gate counts
    // completed tricks so a reconnecting client still sees dummy.
    let play = state.card_play.as_ref().unwrap();
    assert!(play.current_trick.cards.is_empty());
    assert_eq!(play.tricks.len(), 1);

    let view = project(&state, Seat::West);
    assert_eq!(view.hands[Seat::South.index()].len(), 12);
}

#[test]
fn review_phase_exposes_all_original_hands() {
    let mut state = dealt_state(Seat::North, NONE_VUL);
    run_auction(
        &mut state,
        &[
            (Seat::North, BidAction::Pass),
            (Seat::East, BidAction::Pass),
            (Seat::South, BidAction::Pass),
            (Seat::West, BidAction::Pass),
        ],
    )
    .unwrap();
    assert_eq!(state.phase, GamePhase::Complete);

    for viewer in Seat::ALL {
        let view = project(&state, viewer);
        let originals = view.original_hands.as_ref().expect("originals in review");
        for seat in Seat::ALL {
            assert_eq!(originals[seat.index()].len(), 13);
        }
    }
}

#[test]
fn shared_fields_are_not_filtered() {
    let state = contract_state();
    let view = project(&state, Seat::West);
    assert_eq!(view.phase, state.phase);
    assert_eq!(view.contract, state.contract);
    assert_eq!(view.bidding, state.bidding);
    assert_eq!(view.card_play, state.card_play);
    assert_eq!(view.current_player, state.current_player);
    assert_eq!(view.vulnerability, Some(NONE_VUL));
}

#[test]
fn projection_is_idempotent() {
    let mut state = contract_state();
    lead(&mut state);
    for viewer in Seat::ALL {
        assert_eq!(project(&state, viewer), project(&state, viewer));
    }
}
