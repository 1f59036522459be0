use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money figure to cents the way the slip displays it.
pub fn cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", cents(amount))
}
