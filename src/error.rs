use thiserror::Error;
use solana_client::client_error::ClientError;

/// Errors surfaced by scan operations.
///
/// Per-holder history lookups never land here: a failed lookup degrades that
/// one holder to an absent first-activity date and the scan carries on.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The supplied address is not a well-formed base58 public key. Raised
    /// before any network traffic.
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    /// The address parses but does not resolve to an SPL token mint.
    #[error("Token not found: {0} does not resolve to an SPL token mint")]
    MintNotFound(String),

    /// Every endpoint failed the operation within the retry budget. The last
    /// transport error is kept as the source.
    #[error("All RPC endpoints failed after {attempts} attempts")]
    EndpointsExhausted {
        attempts: usize,
        #[source]
        last: ClientError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::{client_error::ClientErrorKind, rpc_request::RpcRequest};
    use std::error::Error;

    #[test]
    fn test_exhaustion_display_leaves_transport_detail_to_source() {
        let err = ScanError::EndpointsExhausted {
            attempts: 3,
            last: ClientError::new_with_request(
                ClientErrorKind::Custom("connection refused".to_string()),
                RpcRequest::GetSlot,
            ),
        };

        // Chain printers walk source(); the display must not repeat it.
        assert_eq!(err.to_string(), "All RPC endpoints failed after 3 attempts");

        let source = err.source().expect("transport error is reachable as the source");
        assert!(
            source.to_string().contains("connection refused"),
            "source carries the transport detail, got: {}",
            source
        );
    }
}
