use thiserror::Error;

use crate::simulation::DealerPhase;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Cannot deal from an empty shoe")]
    EmptyShoe,
    #[error("Invalid hand state: {0}")]
    InvalidHandState(String),
    #[error("{operation} is only allowed in {expected} phase, dealer is in {actual} phase")]
    NotAllowedInPhase {
        operation: &'static str,
        expected: DealerPhase,
        actual: DealerPhase,
    },
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}
