use thiserror::Error;

use crate::domain::chain::Chain;

/// 输入校验错误（调用方可修正）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unsupported wallet type: {0}. Must be Bitcoin, Ethereum, or Solana")]
    UnsupportedChain(String),

    #[error("Invalid {0} address format: expected {}", .0.expected_format())]
    InvalidFormat(Chain),
}
