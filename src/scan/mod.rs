pub mod constants;
pub mod format;
pub mod history;
pub mod holders;
pub mod metadata;
pub mod scanner;
pub mod structs;
pub mod validate;

pub use scanner::HolderScanner;
pub use structs::{Holder, ScanReport, TokenInfo};
