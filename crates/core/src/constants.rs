use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Portfolio value used when the caller does not supply one
pub const DEFAULT_TOTAL_PORTFOLIO_VALUE: Decimal = dec!(100000);

/// Shifts at or below this many percentage points are classified as "maintain"
pub const DEFAULT_MAINTAIN_THRESHOLD: Decimal = dec!(1);

/// Dollar value of one percentage point when sizing a rebalance
pub const DEFAULT_DOLLAR_PER_PERCENTAGE_POINT: Decimal = dec!(1000);

/// Slippage (percent) above which a zap gets a warning
pub const DEFAULT_SLIPPAGE_WARNING_THRESHOLD: Decimal = dec!(5);

/// Full allocation budget in percent
pub const FULL_ALLOCATION: Decimal = dec!(100);

/// Tolerance for "sums to 100" checks on user supplied percentages
pub const PERCENT_SUM_TOLERANCE: Decimal = dec!(0.01);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Well-known category ids used by the demo rebalance rules
pub const CATEGORY_ID_BTC: &str = "btc";
pub const CATEGORY_ID_ETH: &str = "eth";
pub const CATEGORY_ID_STABLECOINS: &str = "stablecoins";
