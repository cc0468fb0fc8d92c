use {
    solana_sdk::pubkey::Pubkey,
    std::str::FromStr,
};

/// Whether `address` is a well-formed base58 Solana public key.
///
/// Purely syntactic: `true` says nothing about the account existing on
/// chain. Performs no I/O and never panics.
pub fn is_valid_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_addresses() {
        // USDC mint, 44 characters
        assert!(is_valid_address("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
        // System program, 32 leading-zero bytes
        assert!(is_valid_address("11111111111111111111111111111111"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("not-an-address"));
        // 0 is outside the base58 alphabet
        assert!(!is_valid_address("0PjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
        // Right alphabet, decodes to 31 bytes instead of 32
        assert!(!is_valid_address("1111111111111111111111111111111"));
        // Longer than any 32-byte key can encode to
        assert!(!is_valid_address("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1vv"));
    }
}
