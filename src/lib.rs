//! Holder analytics for SPL tokens.
//!
//! Given a mint address, [`HolderScanner`] enumerates every token account of
//! the mint through server-side `getProgramAccounts` filters, ranks the
//! non-zero balances, and annotates each holder with an estimated
//! first-activity date and a flag for known AMM pools. All RPC traffic goes
//! through [`FailoverRpc`], which probes endpoint latency at startup and
//! rotates to the next endpoint whenever a call fails.
//!
//! First-activity dates come from a bounded signature window (the most
//! recent 1000 signatures per token account). The oldest signature in that
//! window stands in for first activity, so accounts with deeper history read
//! as younger than they really are.
//!
//! ```no_run
//! use holder_scan::{HolderScanner, DEFAULT_HOLDER_LIMIT};
//!
//! # async fn run() -> Result<(), holder_scan::ScanError> {
//! let scanner = HolderScanner::new();
//! let report = scanner
//!     .scan("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", DEFAULT_HOLDER_LIMIT)
//!     .await?;
//!
//! println!(
//!     "{} holders, {} decimals",
//!     report.info.holders_count, report.info.decimals
//! );
//! for holder in &report.holders {
//!     println!("#{:<4} {} {}", holder.rank, holder.address, holder.balance_formatted);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod metrics;
pub mod rpc;
pub mod scan;

pub use {
    error::ScanError,
    rpc::{EndpointHealth, FailoverRpc, RpcEndpoint, RPC_ENDPOINTS},
    scan::{
        constants::DEFAULT_HOLDER_LIMIT, format::format_balance, validate::is_valid_address,
        Holder, HolderScanner, ScanReport, TokenInfo,
    },
};
