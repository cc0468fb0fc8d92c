use {
    crate::{error::ScanError, rpc::FailoverRpc, scan::structs::ScanReport},
    log::info,
    std::sync::Arc,
};

/// Entry point for token scans.
///
/// Owns the failover RPC layer; construct once inside a Tokio runtime and
/// reuse for the application lifetime. Cloning shares the underlying
/// clients.
#[derive(Clone)]
pub struct HolderScanner {
    pub rpc: Arc<FailoverRpc>,
}

impl HolderScanner {
    /// Creates a scanner over the built-in endpoint registry and kicks off
    /// the startup latency probe in the background. Requests may be issued
    /// immediately; they use the default endpoint until the probe settles.
    pub fn new() -> Self {
        let rpc = FailoverRpc::new();
        rpc.spawn_latency_probe();
        Self { rpc }
    }

    /// Creates a scanner over an existing RPC layer. No probe is spawned.
    pub fn with_rpc(rpc: Arc<FailoverRpc>) -> Self {
        Self { rpc }
    }

    /// Fetches the token overview and the ranked holder list concurrently,
    /// then merges the holder count into the overview.
    pub async fn scan(&self, address: &str, limit: usize) -> Result<ScanReport, ScanError> {
        info!("Scanning token {} (limit {})", address, limit);

        let (info, holders) = tokio::join!(
            self.token_info(address),
            self.token_holders(address, limit),
        );
        let mut info = info?;
        let holders = holders?;

        info.holders_count = holders.len();
        info!("Scan of {} finished with {} holders", address, info.holders_count);
        Ok(ScanReport { info, holders })
    }
}

impl Default for HolderScanner {
    fn default() -> Self {
        Self::new()
    }
}
