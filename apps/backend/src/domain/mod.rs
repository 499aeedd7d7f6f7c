//! Domain layer: the pure rules core. No I/O, no transport types.

pub mod actions;
pub mod bidding;
pub mod cards_logic;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod player_view;
pub mod scoring;
pub mod seats;
pub mod session;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_player_view;
#[cfg(test)]
mod tests_props_bidding;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use actions::{apply_action, ActionOutcome, GameAction};
pub use bidding::{BidAction, BidCall, BiddingSequence, Contract};
pub use cards_types::{BidLevel, Card, Rank, Strain, Suit};
pub use dealing::{Deal, Vulnerability, VulnerabilityRule};
pub use player_view::{project, PlayerGameView};
pub use scoring::{imps, score_contract, ContractResult, DuplicateScore};
pub use seats::{Seat, Side};
pub use session::SessionScore;
pub use state::{CardPlayState, GamePhase, GameState};
pub use tricks::{PlayedCard, Trick};
