//! 支持的链类型
//!
//! 只有 Bitcoin / Ethereum / Solana 三种，字符串在边界处解析为枚举，
//! 内部不再出现裸字符串的链标识。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Chain {
    Bitcoin,
    Ethereum,
    Solana,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Bitcoin, Chain::Ethereum, Chain::Solana];

    /// 规范名称（与数据库 `chain` 列取值一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "Bitcoin",
            Chain::Ethereum => "Ethereum",
            Chain::Solana => "Solana",
        }
    }

    /// 地址格式说明，用于 InvalidFormat 错误消息
    pub fn expected_format(&self) -> &'static str {
        match self {
            Chain::Bitcoin => {
                "a legacy address starting with 1 or 3 (26-35 Base58 characters) \
                 or a bech32 address starting with bc1"
            }
            Chain::Ethereum => "0x followed by 40 hexadecimal characters",
            Chain::Solana => "32-44 Base58 characters",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 精确匹配，不做大小写折叠
impl FromStr for Chain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bitcoin" => Ok(Chain::Bitcoin),
            "Ethereum" => Ok(Chain::Ethereum),
            "Solana" => Ok(Chain::Solana),
            other => Err(ValidationError::UnsupportedChain(other.to_string())),
        }
    }
}
