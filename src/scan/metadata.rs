use {
    crate::{
        error::ScanError,
        scan::{scanner::HolderScanner, structs::TokenInfo},
    },
    log::{debug, info},
    solana_program::program_pack::Pack,
    solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey},
    spl_token::state::Mint,
    std::str::FromStr,
};

impl HolderScanner {
    /// Resolves decimals and human-scaled total supply for a mint address.
    ///
    /// `holders_count` comes back zero; [`HolderScanner::scan`] merges the
    /// real count in. An account that is missing, owned by another program,
    /// or not shaped like a mint classifies as [`ScanError::MintNotFound`]
    /// without burning failover retries.
    pub async fn token_info(&self, address: &str) -> Result<TokenInfo, ScanError> {
        let mint_key = Pubkey::from_str(address)
            .map_err(|_| ScanError::InvalidAddress(address.to_string()))?;

        info!("Fetching token info for {}", address);
        let response = self
            .rpc
            .execute(|client| async move {
                client
                    .get_account_with_commitment(&mint_key, CommitmentConfig::confirmed())
                    .await
            })
            .await?;

        let account = response
            .value
            .ok_or_else(|| ScanError::MintNotFound(address.to_string()))?;
        token_info_from_account(address, &account)
    }
}

/// Decodes a mint account into the overview record.
fn token_info_from_account(address: &str, account: &Account) -> Result<TokenInfo, ScanError> {
    if account.owner != spl_token::id() {
        return Err(ScanError::MintNotFound(address.to_string()));
    }
    let mint = Mint::unpack(&account.data)
        .map_err(|_| ScanError::MintNotFound(address.to_string()))?;

    let total_supply = mint.supply as f64 / 10f64.powi(mint.decimals as i32);
    debug!(
        "Mint {} has {} decimals, supply {}",
        address, mint.decimals, total_supply
    );

    Ok(TokenInfo {
        address: address.to_string(),
        name: None,
        symbol: None,
        decimals: mint.decimals,
        total_supply,
        holders_count: 0,
    })
}
