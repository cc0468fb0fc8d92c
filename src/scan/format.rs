/// Formats a human-scaled balance with B/M/K suffixes and two decimals.
pub fn format_balance(balance: f64) -> String {
    if balance >= 1_000_000_000.0 {
        format!("{:.2}B", balance / 1_000_000_000.0)
    } else if balance >= 1_000_000.0 {
        format!("{:.2}M", balance / 1_000_000.0)
    } else if balance >= 1_000.0 {
        format!("{:.2}K", balance / 1_000.0)
    } else {
        format!("{:.2}", balance)
    }
}
