//! Domain-level error type used across the game engine and room services.
//!
//! This error type is HTTP-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::GamePhase;

/// Kinds of player actions the rules reject.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    InsufficientBid,
    InvalidDouble,
    InvalidRedouble,
    CardNotInHand,
    MustFollowSuit,
    SeatTaken,
    RoomFull,
    NotEnoughPlayers,
    NotSeated,
    Other(String),
}

impl ValidationKind {
    /// Stable machine-readable code for the transport layer.
    pub fn code(&self) -> &str {
        match self {
            ValidationKind::OutOfTurn => "OUT_OF_TURN",
            ValidationKind::InsufficientBid => "INSUFFICIENT_BID",
            ValidationKind::InvalidDouble => "INVALID_DOUBLE",
            ValidationKind::InvalidRedouble => "INVALID_REDOUBLE",
            ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
            ValidationKind::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ValidationKind::SeatTaken => "SEAT_TAKEN",
            ValidationKind::RoomFull => "ROOM_FULL",
            ValidationKind::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            ValidationKind::NotSeated => "NOT_SEATED",
            ValidationKind::Other(code) => code,
        }
    }
}

/// Central domain error type.
///
/// The three variants deliberately separate the error taxonomy:
/// `Validation` is a rejected player action (recoverable, state unchanged),
/// `Phase` is a caller integration bug (action sent in the wrong phase),
/// `Invariant` is a bug in the engine itself and must never be hidden.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Illegal player action with a human-readable reason.
    Validation(ValidationKind, String),
    /// Action submitted in a phase that cannot accept it.
    Phase {
        expected: GamePhase,
        actual: GamePhase,
    },
    /// Internal inconsistency in the engine; indicates a bug, not bad input.
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Phase { expected, actual } => {
                write!(f, "phase mismatch: expected {expected:?}, got {actual:?}")
            }
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn phase(expected: GamePhase, actual: GamePhase) -> Self {
        Self::Phase { expected, actual }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Whether the caller may simply retry with a different action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::Validation(_, _))
    }
}
