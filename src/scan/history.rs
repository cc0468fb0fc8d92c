use {
    crate::{
        metrics::SIGNATURE_LOOKUP_FAILURES,
        rpc::FailoverRpc,
        scan::constants::SIGNATURE_WINDOW,
    },
    chrono::{DateTime, Utc},
    log::warn,
    solana_client::{
        rpc_client::GetConfirmedSignaturesForAddress2Config,
        rpc_response::RpcConfirmedTransactionStatusWithSignature,
    },
    solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey},
    std::sync::Arc,
};

/// Earliest activity visible for a token account.
///
/// Looks at the most recent [`SIGNATURE_WINDOW`] signatures only, so the
/// result is a lower bound on account age. Any failure degrades to `None`:
/// one stubborn account must not sink a whole scan.
pub(crate) async fn first_activity(
    rpc: &Arc<FailoverRpc>,
    token_account: &Pubkey,
) -> Option<DateTime<Utc>> {
    let account = *token_account;
    let outcome = rpc
        .execute(|client| async move {
            client
                .get_signatures_for_address_with_config(
                    &account,
                    GetConfirmedSignaturesForAddress2Config {
                        before: None,
                        until: None,
                        limit: Some(SIGNATURE_WINDOW),
                        commitment: Some(CommitmentConfig::confirmed()),
                    },
                )
                .await
        })
        .await;

    match outcome {
        Ok(signatures) => oldest_block_time(&signatures),
        Err(err) => {
            SIGNATURE_LOOKUP_FAILURES.inc();
            warn!("First-activity lookup failed for {}: {}", token_account, err);
            None
        }
    }
}

/// The response is newest-first, so the last entry is the oldest signature
/// in the window. An entry without a block time yields `None`.
fn oldest_block_time(
    signatures: &[RpcConfirmedTransactionStatusWithSignature],
) -> Option<DateTime<Utc>> {
    let oldest = signatures.last()?;
    let block_time = oldest.block_time?;
    DateTime::from_timestamp(block_time, 0)
}

/// Whole days between `first_seen` and `now`, rounded down.
pub(crate) fn days_held_since(first_seen: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - first_seen).num_days().max(0) as u64
}
