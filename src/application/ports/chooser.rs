//! Operator chooser port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::take::Choice;

/// Chooser errors
#[derive(Debug, Clone, Error)]
pub enum ChooserError {
    #[error("Operator input closed")]
    InputClosed,

    #[error("Failed to read operator input: {0}")]
    Io(String),

    #[error("No options to choose from")]
    NoOptions,

    #[error("Choice {0} is out of range")]
    OutOfRange(usize),
}

/// Port for asking the operator to pick one option
#[async_trait]
pub trait Chooser: Send + Sync {
    /// Present `message` and `options`, returning the index of the choice.
    async fn choose(&self, message: &str, options: &[&str]) -> Result<usize, ChooserError>;
}

/// Ask the operator for one of `T`'s options
pub async fn ask<T: Choice, C: Chooser + ?Sized>(
    chooser: &C,
    message: &str,
) -> Result<T, ChooserError> {
    let index = chooser.choose(message, &T::labels()).await?;
    T::ALL
        .get(index)
        .copied()
        .ok_or(ChooserError::OutOfRange(index))
}
