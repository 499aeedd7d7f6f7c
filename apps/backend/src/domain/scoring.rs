//! Duplicate scoring: contract points, bonuses, penalties, and IMPs.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Contract;
use crate::domain::dealing::Vulnerability;
use crate::domain::seats::{Seat, Side};
use crate::domain::cards_types::Strain;

/// A finished contract with the tricks actually taken by declarer's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractResult {
    pub contract: Contract,
    pub tricks_made: u8,
    pub declarer: Seat,
    pub vulnerability: Vulnerability,
}

/// Fully broken-down duplicate score. Computed once, never mutated.
/// `ns_score == -ew_score` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateScore {
    pub contract_points: i32,
    pub overtricks: i32,
    pub undertricks: i32,
    pub double_bonus: i32,
    pub game_bonus: i32,
    pub slam_bonus: i32,
    pub insult_bonus: i32,
    pub total_score: i32,
    pub ns_score: i32,
    pub ew_score: i32,
    pub is_game: bool,
    pub is_slam: bool,
}

/// Trick value below the line: minors 20, majors and NT 30.
fn points_per_trick(strain: Strain) -> i32 {
    if strain.is_minor() {
        20
    } else {
        30
    }
}

/// Points for the tricks bid and made, with doubling multipliers.
/// No-trump adds a flat 10 for the first trick.
fn contract_points(contract: &Contract) -> i32 {
    let odd_tricks = i32::from(contract.level.get());
    let mut points = odd_tricks * points_per_trick(contract.strain);
    if contract.strain == Strain::NoTrump {
        points += 10;
    }
    if contract.doubled {
        points *= 2;
    }
    if contract.redoubled {
        points *= 2;
    }
    points
}

/// Overtricks: undoubled at the strain's trick rate; doubled at a flat
/// 100 (vulnerable 200) each, doubled again when redoubled.
fn overtrick_points(overtricks: i32, contract: &Contract, vulnerable: bool) -> i32 {
    if overtricks <= 0 {
        return 0;
    }
    if contract.doubled {
        let per_trick = if vulnerable { 200 } else { 100 };
        let multiplier = if contract.redoubled { 2 } else { 1 };
        overtricks * per_trick * multiplier
    } else {
        overtricks * points_per_trick(contract.strain)
    }
}

/// Undertrick penalty schedule.
/// Undoubled: 50 per trick (vulnerable 100). Doubled non-vulnerable:
/// 100 for the first, 200 each after; vulnerable: 200 then 300 each.
/// Redoubling doubles the whole penalty.
fn undertrick_penalty(undertricks: i32, vulnerable: bool, doubled: bool, redoubled: bool) -> i32 {
    if undertricks <= 0 {
        return 0;
    }
    if !doubled {
        return undertricks * if vulnerable { 100 } else { 50 };
    }

    let (first, subsequent) = if vulnerable { (200, 300) } else { (100, 200) };
    let penalty = first + (undertricks - 1) * subsequent;
    penalty * if redoubled { 2 } else { 1 }
}

/// Score a finished contract.
///
/// The positive total goes to declarer's partnership, the signed negative
/// to the other side.
pub fn score_contract(result: &ContractResult) -> DuplicateScore {
    let contract = &result.contract;
    let tricks_required = i32::from(contract.level.tricks_required());
    let tricks_diff = i32::from(result.tricks_made) - tricks_required;

    let declarer_side = result.declarer.side();
    let vulnerable = result.vulnerability.side_vulnerable(declarer_side);
    let declarer_is_ns = declarer_side == Side::NorthSouth;

    if tricks_diff < 0 {
        let penalty = undertrick_penalty(
            -tricks_diff,
            vulnerable,
            contract.doubled,
            contract.redoubled,
        );
        let total = -penalty;
        return DuplicateScore {
            contract_points: 0,
            overtricks: 0,
            undertricks: penalty,
            double_bonus: 0,
            game_bonus: 0,
            slam_bonus: 0,
            insult_bonus: 0,
            total_score: total,
            ns_score: if declarer_is_ns { total } else { -total },
            ew_score: if declarer_is_ns { -total } else { total },
            is_game: false,
            is_slam: false,
        };
    }

    let contract_points = contract_points(contract);
    let overtricks = overtrick_points(tricks_diff, contract, vulnerable);

    // Game bonus for 100+ below the line, otherwise the part-score 50.
    let is_game = contract_points >= 100;
    let game_bonus = if is_game {
        if vulnerable {
            500
        } else {
            300
        }
    } else {
        50
    };

    let slam_bonus = match contract.level.get() {
        6 => {
            if vulnerable {
                750
            } else {
                500
            }
        }
        7 => {
            if vulnerable {
                1500
            } else {
                1000
            }
        }
        _ => 0,
    };
    let is_slam = contract.level.get() >= 6;

    // "Insult" bonus for making a doubled (50) or redoubled (100) contract.
    let insult_bonus = if contract.redoubled {
        100
    } else if contract.doubled {
        50
    } else {
        0
    };

    let total = contract_points + overtricks + game_bonus + slam_bonus + insult_bonus;

    DuplicateScore {
        contract_points,
        overtricks,
        undertricks: 0,
        double_bonus: insult_bonus,
        game_bonus,
        slam_bonus,
        insult_bonus,
        total_score: total,
        ns_score: if declarer_is_ns { total } else { -total },
        ew_score: if declarer_is_ns { -total } else { total },
        is_game,
        is_slam,
    }
}

/// Standard WBF IMP scale: upper point-difference bound per IMP value.
/// Differences beyond the last bound score 24.
const IMP_TABLE: [(i32, i32); 24] = [
    (10, 0),
    (40, 1),
    (80, 2),
    (120, 3),
    (160, 4),
    (210, 5),
    (260, 6),
    (310, 7),
    (360, 8),
    (420, 9),
    (490, 10),
    (590, 11),
    (740, 12),
    (890, 13),
    (1090, 14),
    (1290, 15),
    (1490, 16),
    (1740, 17),
    (1990, 18),
    (2240, 19),
    (2490, 20),
    (2990, 21),
    (3490, 22),
    (3990, 23),
];

/// Convert a raw point difference to IMPs; sign follows the difference.
pub fn imps(difference: i32) -> i32 {
    let abs = difference.abs();
    let value = IMP_TABLE
        .iter()
        .find(|(max_diff, _)| abs <= *max_diff)
        .map(|(_, imps)| *imps)
        .unwrap_or(24);
    if difference >= 0 {
        value
    } else {
        -value
    }
}
