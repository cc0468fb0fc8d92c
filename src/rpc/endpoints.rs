use serde::Serialize;

/// A candidate RPC endpoint, fixed at build time.
#[derive(Debug, Clone, Copy)]
pub struct RpcEndpoint {
    pub name: &'static str,
    pub url: &'static str,
    /// Companion websocket URL where the provider offers one. Nothing in the
    /// scanner subscribes; the field exists for hosts that do.
    pub ws_url: Option<&'static str>,
}

/// Public mainnet endpoints, probed at startup. The first entry serves as
/// the default until probing picks a faster one.
pub const RPC_ENDPOINTS: &[RpcEndpoint] = &[
    RpcEndpoint {
        name: "mainnet-beta",
        url: "https://api.mainnet-beta.solana.com",
        ws_url: Some("wss://api.mainnet-beta.solana.com"),
    },
    RpcEndpoint {
        name: "publicnode",
        url: "https://solana-rpc.publicnode.com",
        ws_url: Some("wss://solana-rpc.publicnode.com"),
    },
    RpcEndpoint {
        name: "ankr",
        url: "https://rpc.ankr.com/solana",
        ws_url: None,
    },
];

/// Latency recorded for an endpoint whose probe failed or timed out. Sorts
/// behind every real measurement while keeping the endpoint selectable for
/// failover.
pub const PROBE_FAILED_MS: u64 = 9_999;

/// Marker for an endpoint that has not been probed yet.
pub(crate) const LATENCY_UNPROBED: u64 = u64::MAX;

/// Probe-state snapshot of one endpoint, for status displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointHealth {
    pub name: &'static str,
    pub url: &'static str,
    /// `None` until the endpoint has been probed.
    pub latency_ms: Option<u64>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_usable() {
        assert!(!RPC_ENDPOINTS.is_empty(), "failover needs at least one endpoint");

        let names: HashSet<&str> = RPC_ENDPOINTS.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), RPC_ENDPOINTS.len(), "endpoint names label metrics and must be unique");

        for endpoint in RPC_ENDPOINTS {
            assert!(endpoint.url.starts_with("https://"), "{} should use https", endpoint.name);
        }
    }
}
