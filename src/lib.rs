//! Walletfolio - 钱包地址登记服务
//!
//! 按名称登记 Bitcoin / Ethereum / Solana 地址，写入前校验地址格式

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod error_body;
pub mod infrastructure;
pub mod metrics;
pub mod repository;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode};
