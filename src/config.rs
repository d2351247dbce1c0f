/// Stock symbols offered in the symbol selector
pub const SYMBOL_OPTIONS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOG", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("KO", "The Coca-Cola Company"),
];

/// Default simulator API base URL (local backend)
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Default form date window: start this many days back, end yesterday
pub const DEFAULT_WINDOW_DAYS: i64 = 182;

/// Simulator API base URL, overridable via ALGOSIM_API_BASE
pub fn api_base_url() -> String {
    std::env::var("ALGOSIM_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}
