use thiserror::Error;

use crate::parsing::FromStrError;

/// Everything that can go wrong while building or operating on a
/// [`Hypernum`](crate::Hypernum).
///
/// Undefined arithmetic (division by zero, `Inf - Inf`, ...) is not an error:
/// it yields [`Hypernum::NAN`](crate::Hypernum::NAN) so long expressions
/// degrade instead of aborting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HypernumError {
    /// Text did not match the number grammar.
    #[error("invalid number format: {0}")]
    Format(#[from] FromStrError),
    /// A malformed raw triple, or a tower shift below zero.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// The iteration count is beyond what a float can count down exactly.
    #[error("{0} too big")]
    PowerTooLarge(&'static str),
    #[error("Lambert W iteration failed to converge for z = {z}")]
    ConvergenceFailure { z: f64 },
}
