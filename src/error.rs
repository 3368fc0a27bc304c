use std::io;

use thiserror::Error;

pub type WlResult<T> = Result<T, WlError>;

#[derive(Error, Debug)]
pub enum WlError {
    #[error("address {0} is not a valid IPv4 address")]
    InvalidAddress(String),
    #[error("io error, {0}")]
    IO(#[from] io::Error),
    #[error("config error, {0}")]
    Config(#[from] serde_yaml::Error),
}
