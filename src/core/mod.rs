//! Core types for the square-sum pool

pub mod error;
pub mod job;

pub use error::{Result, SumsqError};
pub use job::SquareJob;
