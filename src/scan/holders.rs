use {
    crate::{
        error::ScanError,
        metrics::HOLDER_SCANS,
        scan::{
            constants::{
                is_amm_address, HISTORY_CONCURRENCY, TOKEN_ACCOUNT_LEN, TOKEN_ACCOUNT_MINT_OFFSET,
            },
            format::format_balance,
            history,
            scanner::HolderScanner,
            structs::Holder,
        },
    },
    chrono::{DateTime, Utc},
    log::{info, warn},
    solana_account_decoder::UiAccountEncoding,
    solana_client::{
        rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
        rpc_filter::{Memcmp, RpcFilterType},
    },
    solana_program::program_pack::Pack,
    solana_sdk::{account::Account, pubkey::Pubkey},
    spl_token::state::Account as TokenAccount,
    std::{cmp::Ordering, str::FromStr, sync::Arc},
    tokio::sync::Semaphore,
};

/// A decoded token account before ranking.
struct RawHolder {
    token_account: Pubkey,
    owner: Pubkey,
    balance: f64,
    first_seen: Option<DateTime<Utc>>,
}

impl HolderScanner {
    /// Returns up to `limit` holders of the mint, ranked by balance.
    ///
    /// Zero balances are dropped before ranking, so rank and percentage are
    /// computed over accounts that actually hold the token. Truncation to
    /// `limit` happens after ranking and keeps the assigned rank values.
    pub async fn token_holders(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<Holder>, ScanError> {
        let mint = Pubkey::from_str(address)
            .map_err(|_| ScanError::InvalidAddress(address.to_string()))?;
        HOLDER_SCANS.inc();

        // Ranking needs decimals before any balance can be scaled.
        let info = self.token_info(address).await?;

        info!("Fetching token accounts for mint {}", address);
        let accounts = self.fetch_token_accounts(&mint).await?;
        info!("Found {} token accounts for {}", accounts.len(), address);

        let mut raw = decode_token_accounts(&accounts, info.decimals);
        self.attach_first_activity(&mut raw).await;

        Ok(rank_holders(raw, limit))
    }

    /// All token accounts of the mint. The dataSize and mint memcmp filters
    /// run server side, so only matching accounts cross the wire.
    async fn fetch_token_accounts(
        &self,
        mint: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, ScanError> {
        let mint = *mint;
        self.rpc
            .execute(|client| {
                let config = program_accounts_config(&mint);
                async move {
                    let program = spl_token::id();
                    client
                        .get_program_accounts_with_config(&program, config)
                        .await
                }
            })
            .await
    }

    /// Looks up first activity for every holder with a bounded number of
    /// requests in flight. Results land by index, so completion order never
    /// affects holder order.
    async fn attach_first_activity(&self, raw: &mut [RawHolder]) {
        let semaphore = Arc::new(Semaphore::new(HISTORY_CONCURRENCY));
        let mut handles = Vec::with_capacity(raw.len());

        for (idx, holder) in raw.iter().enumerate() {
            let rpc = Arc::clone(&self.rpc);
            let semaphore = Arc::clone(&semaphore);
            let token_account = holder.token_account;
            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (idx, None);
                };
                (idx, history::first_activity(&rpc, &token_account).await)
            }));
        }

        for handle in handles {
            match handle.await {
                Ok((idx, first_seen)) => raw[idx].first_seen = first_seen,
                Err(err) => warn!("First-activity task failed to join: {}", err),
            }
        }
    }
}

fn program_accounts_config(mint: &Pubkey) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(vec![
            RpcFilterType::DataSize(TOKEN_ACCOUNT_LEN),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                TOKEN_ACCOUNT_MINT_OFFSET,
                mint.as_ref(),
            )),
        ]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            data_slice: None,
            commitment: None,
            min_context_slot: None,
        },
        with_context: None,
        ..Default::default()
    }
}

/// Unpacks raw accounts, dropping zero balances and anything that does not
/// decode as a token account.
fn decode_token_accounts(accounts: &[(Pubkey, Account)], decimals: u8) -> Vec<RawHolder> {
    let scale = 10f64.powi(decimals as i32);
    let mut raw = Vec::with_capacity(accounts.len());

    for (pubkey, account) in accounts {
        let token_account = match TokenAccount::unpack(&account.data) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!("Skipping undecodable token account {}: {}", pubkey, err);
                continue;
            }
        };
        if token_account.amount == 0 {
            continue;
        }

        raw.push(RawHolder {
            token_account: *pubkey,
            owner: token_account.owner,
            balance: token_account.amount as f64 / scale,
            first_seen: None,
        });
    }

    raw
}

/// Sorts by descending balance, assigns dense 1-based ranks and percentage
/// of the summed balance, then truncates to `limit` keeping the rank values.
fn rank_holders(mut raw: Vec<RawHolder>, limit: usize) -> Vec<Holder> {
    raw.sort_by(|a, b| b.balance.partial_cmp(&a.balance).unwrap_or(Ordering::Equal));

    let total_balance: f64 = raw.iter().map(|holder| holder.balance).sum();
    let now = Utc::now();

    let mut holders = Vec::with_capacity(raw.len().min(limit));
    for (idx, holder) in raw.into_iter().enumerate() {
        if idx >= limit {
            break;
        }

        let percentage = if total_balance > 0.0 {
            holder.balance / total_balance * 100.0
        } else {
            0.0
        };
        let owner = holder.owner.to_string();
        let is_amm_pool = is_amm_address(&owner);

        holders.push(Holder {
            address: owner,
            balance: holder.balance,
            balance_formatted: format_balance(holder.balance),
            rank: (idx + 1) as u32,
            percentage,
            first_seen: holder.first_seen,
            days_held: holder.first_seen.map(|seen| history::days_held_since(seen, now)),
            is_amm_pool,
        });
    }

    holders
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use solana_program::program_option::COption;
    use spl_token::state::AccountState;

    fn packed_token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
        let token_account = TokenAccount {
            mint: *mint,
            owner: *owner,
            amount,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        };
        let mut data = vec![0u8; TokenAccount::LEN];
        TokenAccount::pack(token_account, &mut data).expect("pack token account");

        Account {
            lamports: 2_039_280,
            data,
            owner: spl_token::id(),
            executable: false,
            rent_epoch: 0,
        }
    }

    fn raw_holder(owner: Pubkey, balance: f64) -> RawHolder {
        RawHolder {
            token_account: Pubkey::new_unique(),
            owner,
            balance,
            first_seen: None,
        }
    }

    fn sample_holders() -> Vec<RawHolder> {
        vec![
            raw_holder(Pubkey::new_unique(), 50.0),
            raw_holder(Pubkey::new_unique(), 300.0),
            raw_holder(Pubkey::new_unique(), 150.0),
            raw_holder(Pubkey::new_unique(), 0.5),
            raw_holder(Pubkey::new_unique(), 75.0),
        ]
    }

    #[test]
    fn test_decode_drops_zero_balances_and_junk() {
        let mint = Pubkey::new_unique();
        let accounts = vec![
            (Pubkey::new_unique(), packed_token_account(&mint, &Pubkey::new_unique(), 1_000_000)),
            (Pubkey::new_unique(), packed_token_account(&mint, &Pubkey::new_unique(), 0)),
            (
                Pubkey::new_unique(),
                Account {
                    lamports: 1,
                    data: vec![0u8; TokenAccount::LEN],
                    owner: spl_token::id(),
                    executable: false,
                    rent_epoch: 0,
                },
            ),
        ];

        let raw = decode_token_accounts(&accounts, 6);
        assert_eq!(raw.len(), 1, "zero balances and undecodable accounts drop out");
        assert_eq!(raw[0].balance, 1.0, "amount is scaled by decimals");
    }

    #[test]
    fn test_ranks_are_contiguous_and_ordered() {
        let holders = rank_holders(sample_holders(), 10);

        assert_eq!(holders.len(), 5);
        for (idx, holder) in holders.iter().enumerate() {
            assert_eq!(holder.rank as usize, idx + 1, "ranks are dense and 1-based");
        }
        for pair in holders.windows(2) {
            assert!(pair[0].balance >= pair[1].balance, "descending balance order");
        }
        assert_eq!(holders[0].balance, 300.0);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let holders = rank_holders(sample_holders(), 10);

        let sum: f64 = holders.iter().map(|holder| holder.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01, "percentages sum to 100, got {}", sum);

        // 300 of 575.5 total
        assert!((holders[0].percentage - 300.0 / 575.5 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncation_preserves_rank_and_denominator() {
        let full = rank_holders(sample_holders(), 10);
        let truncated = rank_holders(sample_holders(), 2);

        assert_eq!(truncated.len(), 2);
        for (idx, holder) in truncated.iter().enumerate() {
            assert_eq!(holder.rank as usize, idx + 1, "truncation keeps assigned ranks");
        }
        assert_eq!(
            truncated[1].percentage, full[1].percentage,
            "dropped tail stays in the percentage denominator"
        );
    }

    #[test]
    fn test_amm_pool_flagged_but_still_ranked() {
        let amm_owner = Pubkey::from_str("NsumZem3j76AAucwXzy5kpgpvqWJJW5dK68YwP6yhjo")
            .expect("known pool address parses");
        let holders = rank_holders(
            vec![raw_holder(amm_owner, 70.0), raw_holder(Pubkey::new_unique(), 30.0)],
            10,
        );

        assert!(holders[0].is_amm_pool, "pool owner is flagged");
        assert_eq!(holders[0].rank, 1, "flagging does not remove the pool from ranking");
        assert!((holders[0].percentage - 70.0).abs() < 1e-9, "pool stays in the denominator");
        assert!(!holders[1].is_amm_pool);
    }

    #[test]
    fn test_first_seen_drives_days_held() {
        let mut raw = vec![
            raw_holder(Pubkey::new_unique(), 10.0),
            raw_holder(Pubkey::new_unique(), 5.0),
        ];
        raw[0].first_seen = Some(Utc::now() - Duration::days(10));

        let holders = rank_holders(raw, 10);
        assert_eq!(holders[0].days_held, Some(10));
        assert!(holders[0].first_seen.is_some());
        assert_eq!(holders[1].days_held, None, "no history means no duration");
    }

    #[test]
    fn test_server_side_filters_are_exact() {
        let mint = Pubkey::new_unique();
        let config = program_accounts_config(&mint);

        let filters = config.filters.expect("filters are always pushed server side");
        assert_eq!(filters.len(), 2);
        assert!(matches!(filters[0], RpcFilterType::DataSize(165)));
        assert!(matches!(filters[1], RpcFilterType::Memcmp(_)));
    }
}
