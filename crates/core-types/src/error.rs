// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Moving average window must be greater than zero")]
    InvalidWindow,

    #[error("Invalid price {price} at bar {index}: cannot size a position")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Initial capital must be a finite, non-negative amount (got {0})")]
    InvalidCapital(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
