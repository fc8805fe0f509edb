pub mod etherscan;

pub use etherscan::EtherscanClient;
