use {
    chrono::{DateTime, Utc},
    serde::Serialize,
};

/// Overview of one token mint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    /// On-chain metadata name, when a future lookup supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub decimals: u8,
    /// Total supply scaled by the mint's decimals.
    pub total_supply: f64,
    /// Zero until a combined scan merges the holder count in.
    pub holders_count: usize,
}

/// One ranked holder of a token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holder {
    /// Owner wallet of the token account.
    pub address: String,
    /// Balance scaled by the mint's decimals.
    pub balance: f64,
    pub balance_formatted: String,
    /// 1-based position by descending balance, assigned before truncation.
    pub rank: u32,
    /// Share of the summed balance of all non-zero holders, 0..=100.
    pub percentage: f64,
    /// Oldest activity visible in the bounded signature window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    /// Whole days since `first_seen`, rounded down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_held: Option<u64>,
    /// Owner is a known AMM pool rather than an individual wallet.
    pub is_amm_pool: bool,
}

/// Combined scan output: the token overview with `holders_count` merged in,
/// plus the ranked holder list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub info: TokenInfo,
    pub holders: Vec<Holder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_holder_serializes_camel_case() -> Result<()> {
        let holder = Holder {
            address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            balance: 1_500_000.0,
            balance_formatted: "1.50M".to_string(),
            rank: 1,
            percentage: 42.5,
            first_seen: None,
            days_held: None,
            is_amm_pool: false,
        };

        let json = serde_json::to_value(&holder)?;
        assert!(json.get("balanceFormatted").is_some());
        assert!(json.get("isAmmPool").is_some());
        assert!(
            json.get("firstSeen").is_none() && json.get("daysHeld").is_none(),
            "absent history fields are omitted, not null"
        );
        Ok(())
    }

    #[test]
    fn test_token_info_omits_unresolved_metadata() -> Result<()> {
        let info = TokenInfo {
            address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            name: None,
            symbol: None,
            decimals: 6,
            total_supply: 1_000_000.0,
            holders_count: 0,
        };

        let json = serde_json::to_value(&info)?;
        assert!(json.get("name").is_none() && json.get("symbol").is_none());
        assert_eq!(json["totalSupply"], 1_000_000.0);
        assert_eq!(json["holdersCount"], 0);
        Ok(())
    }
}
