pub mod wallets;

pub use wallets::{RegistryError, WalletRegistry};
