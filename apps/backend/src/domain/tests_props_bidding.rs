//! Property-based tests for auction legality.

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::bidding::{
    bid_value, is_auction_complete, validate_call, BidAction, BidCall, BiddingSequence,
};
use crate::domain::cards_types::BidLevel;
use crate::domain::seats::Seat;
use crate::domain::test_gens::{arb_level, arb_seat, arb_strain};

fn append(seq: &mut BiddingSequence, action: BidAction) {
    let seat = seq.bidder_to_act();
    seq.calls.push(BidCall {
        seat,
        action,
        at: OffsetDateTime::now_utc(),
    });
}

proptest! {
    /// A follow-on bid is legal exactly when its value strictly exceeds
    /// the standing bid's value.
    #[test]
    fn bid_legality_matches_value_order(
        dealer in arb_seat(),
        l1 in arb_level(), s1 in arb_strain(),
        l2 in arb_level(), s2 in arb_strain(),
    ) {
        let mut seq = BiddingSequence::new(dealer);
        append(&mut seq, BidAction::Bid { level: l1, strain: s1 });

        let follow_up = BidAction::Bid { level: l2, strain: s2 };
        let legal = validate_call(&seq, seq.bidder_to_act(), follow_up).is_ok();
        prop_assert_eq!(legal, bid_value(l2, s2) > bid_value(l1, s1));
    }

    /// Along any legally built auction, bid values are strictly increasing.
    #[test]
    fn accepted_bids_are_strictly_increasing(
        dealer in arb_seat(),
        candidates in proptest::collection::vec((arb_level(), arb_strain()), 1..12),
    ) {
        let mut seq = BiddingSequence::new(dealer);
        for (level, strain) in candidates {
            let action = BidAction::Bid { level, strain };
            if validate_call(&seq, seq.bidder_to_act(), action).is_ok() {
                append(&mut seq, action);
            }
        }

        let values: Vec<u8> = seq
            .calls
            .iter()
            .filter_map(|c| c.action.as_bid())
            .map(|(l, s)| bid_value(l, s))
            .collect();
        for pair in values.windows(2) {
            prop_assert!(pair[1] > pair[0], "values not increasing: {:?}", values);
        }
    }

    /// Pass is legal for whoever is due to act, in any auction state.
    #[test]
    fn pass_is_always_legal_in_turn(
        dealer in arb_seat(),
        passes in 0..3usize,
        level in arb_level(),
        strain in arb_strain(),
    ) {
        let mut seq = BiddingSequence::new(dealer);
        append(&mut seq, BidAction::Bid { level, strain });
        for _ in 0..passes {
            append(&mut seq, BidAction::Pass);
        }
        prop_assert!(validate_call(&seq, seq.bidder_to_act(), BidAction::Pass).is_ok());
    }

    /// The bidder to act is always `(dealer index + call count) mod 4`,
    /// and no out-of-turn seat passes validation.
    #[test]
    fn turn_rotation_is_fixed(dealer in arb_seat(), calls in 0..8usize) {
        let mut seq = BiddingSequence::new(dealer);
        for _ in 0..calls {
            append(&mut seq, BidAction::Pass);
        }
        let expected = Seat::from_index(dealer.index() + calls);
        prop_assert_eq!(seq.bidder_to_act(), expected);
        for seat in Seat::ALL {
            if seat != expected && !is_auction_complete(&seq) {
                prop_assert!(validate_call(&seq, seat, BidAction::Pass).is_err());
            }
        }
    }
}

#[test]
fn level_bounds_are_enforced_at_construction() {
    assert!(BidLevel::new(0).is_err());
    assert!(BidLevel::new(8).is_err());
    for level in 1..=7 {
        assert_eq!(BidLevel::new(level).unwrap().get(), level);
    }
}
