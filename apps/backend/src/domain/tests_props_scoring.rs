//! Property-based tests for the duplicate scorer.

use proptest::prelude::*;

use crate::domain::bidding::Contract;
use crate::domain::scoring::{imps, score_contract, ContractResult};
use crate::domain::seats::Side;
use crate::domain::test_gens::{arb_level, arb_seat, arb_strain, arb_vulnerability};

fn arb_result() -> impl Strategy<Value = ContractResult> {
    (
        arb_level(),
        arb_strain(),
        arb_seat(),
        // (doubled, redoubled): redoubled implies doubled by auction rules
        prop_oneof![
            Just((false, false)),
            Just((true, false)),
            Just((true, true))
        ],
        0u8..=13,
        arb_vulnerability(),
    )
        .prop_map(|(level, strain, declarer, (doubled, redoubled), tricks_made, vulnerability)| {
            ContractResult {
                contract: Contract {
                    level,
                    strain,
                    declarer,
                    doubled,
                    redoubled,
                },
                tricks_made,
                declarer,
                vulnerability,
            }
        })
}

proptest! {
    /// The NS and EW scores are always exact mirrors.
    #[test]
    fn score_symmetry(result in arb_result()) {
        let score = score_contract(&result);
        prop_assert_eq!(score.ns_score, -score.ew_score);
    }

    /// A hand either made (no undertricks) or failed (penalty only);
    /// the breakdown legs never mix.
    #[test]
    fn made_and_failed_legs_are_exclusive(result in arb_result()) {
        let score = score_contract(&result);
        let made = result.tricks_made >= result.contract.level.tricks_required();
        if made {
            prop_assert_eq!(score.undertricks, 0);
            prop_assert!(score.contract_points > 0);
            prop_assert!(score.total_score > 0);
        } else {
            prop_assert_eq!(score.contract_points, 0);
            prop_assert_eq!(score.overtricks, 0);
            prop_assert_eq!(score.game_bonus, 0);
            prop_assert_eq!(score.slam_bonus, 0);
            prop_assert!(score.total_score < 0);
        }
    }

    /// The signed total lands on declarer's partnership.
    #[test]
    fn total_is_attributed_to_declarer_side(result in arb_result()) {
        let score = score_contract(&result);
        let declarer_score = match result.declarer.side() {
            Side::NorthSouth => score.ns_score,
            Side::EastWest => score.ew_score,
        };
        prop_assert_eq!(declarer_score, score.total_score);
    }

    /// IMP conversion is odd and monotone in the point difference.
    #[test]
    fn imps_sign_and_monotonicity(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        prop_assert_eq!(imps(-a), -imps(a));
        if a.abs() <= b.abs() {
            prop_assert!(imps(a.abs()) <= imps(b.abs()));
        }
        prop_assert!(imps(a).abs() <= 24);
    }
}
