//! 地址验证模块
//!
//! 统一的地址格式校验：纯函数，无 I/O。
//! 只做语法层面的检查（正则），不做 checksum 校验，也不做任何规范化。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Chain, ValidationError};

static ETHEREUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("Invalid Ethereum address regex"));

// Base58 字符集（不含 0 / I / O / l）
static SOLANA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("Invalid Solana address regex")
});

// P2PKH / P2SH
static BITCOIN_LEGACY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$").expect("Invalid Bitcoin legacy regex")
});

// Bech32 SegWit（仅小写）
static BITCOIN_BECH32_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^bc1[a-z0-9]{39,59}$").expect("Invalid Bitcoin bech32 regex"));

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式
    ///
    /// # 返回
    /// - Ok(()): 地址有效
    /// - Err(MissingField("address")): 地址为空或只有空白
    /// - Err(InvalidFormat(chain)): 不符合该链的地址格式
    pub fn validate(address: &str, chain: Chain) -> Result<(), ValidationError> {
        if address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }

        let valid = match chain {
            Chain::Ethereum => ETHEREUM_REGEX.is_match(address),
            Chain::Solana => SOLANA_REGEX.is_match(address),
            Chain::Bitcoin => {
                BITCOIN_LEGACY_REGEX.is_match(address) || BITCOIN_BECH32_REGEX.is_match(address)
            }
        };

        if valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidFormat(chain))
        }
    }

    /// 链标识为原始字符串时使用（先在边界解析为 [`Chain`]）
    pub fn validate_raw(address: &str, chain: &str) -> Result<Chain, ValidationError> {
        let chain: Chain = chain.parse()?;
        Self::validate(address, chain)?;
        Ok(chain)
    }
}
