//! Domain 模块
//!
//! 链类型、钱包记录与校验错误

pub mod chain;
pub mod errors;
pub mod wallet;

// 重新导出常用类型
pub use chain::Chain;
pub use errors::ValidationError;
pub use wallet::{NewWallet, WalletRecord};
