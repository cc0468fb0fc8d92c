use {
    lazy_static::lazy_static,
    solana_program::program_pack::Pack,
    std::collections::HashSet,
};

/// Serialized size of an SPL token account. Used as a server-side dataSize
/// filter so only token accounts cross the wire.
pub const TOKEN_ACCOUNT_LEN: u64 = spl_token::state::Account::LEN as u64;

/// Byte offset of the mint field inside a token account.
pub const TOKEN_ACCOUNT_MINT_OFFSET: usize = 0;

/// Holders returned when the caller has no stronger opinion.
pub const DEFAULT_HOLDER_LIMIT: usize = 100;

/// Signature-history window per token account. The oldest signature inside
/// the window stands in for first activity, so accounts with deeper history
/// read as younger than they really are.
pub const SIGNATURE_WINDOW: usize = 1_000;

/// First-activity lookups allowed in flight at once.
pub const HISTORY_CONCURRENCY: usize = 8;

lazy_static! {
    /// Owners whose token accounts hold pooled AMM liquidity rather than an
    /// individual's position, by base58 address.
    static ref AMM_POOL_ADDRESSES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        // pump.fun AMM
        set.insert("NsumZem3j76AAucwXzy5kpgpvqWJJW5dK68YwP6yhjo");
        set
    };
}

/// Whether the owner of a token account is a known AMM pool.
pub fn is_amm_address(address: &str) -> bool {
    AMM_POOL_ADDRESSES.contains(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amm_set_matches_known_pool() {
        assert!(is_amm_address("NsumZem3j76AAucwXzy5kpgpvqWJJW5dK68YwP6yhjo"));
        assert!(!is_amm_address("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
    }

    #[test]
    fn test_token_account_filter_values() {
        assert_eq!(TOKEN_ACCOUNT_LEN, 165);
        assert_eq!(TOKEN_ACCOUNT_MINT_OFFSET, 0);
    }
}
