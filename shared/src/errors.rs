//! Shared error types for the run orchestrator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid field path: '{path}'")]
    InvalidFieldPath { path: String },

    #[error("Cannot descend into non-object value at '{path}'")]
    NotAnObject { path: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
