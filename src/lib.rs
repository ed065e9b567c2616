pub mod filesize_cmd;
pub mod loc_cmd;
pub mod report_cmd;

pub mod core;
pub mod extract;
pub mod git;
pub mod storage;
pub mod summary;
pub mod viz;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type ScopeResult<T> = Result<T, ScopeError>;
