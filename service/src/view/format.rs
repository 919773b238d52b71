//! Display labels of monetary values.

use common::Money;
use itertools::Itertools as _;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats the provided price in a compact form: `$1.3M`, `$450K`, `$950`.
///
/// Millions are shown with one decimal and thousands with none, both rounded
/// half away from zero.
#[must_use]
pub fn format_price(price: Money) -> String {
    const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
    const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

    let n = price.amount();
    if n >= MILLION {
        format!("${}M", rounded(n / MILLION, 1))
    } else if n >= THOUSAND {
        format!("${}K", rounded(n / THOUSAND, 0))
    } else {
        format!("${}", n.normalize())
    }
}

/// Formats a single budget bound, returning [`None`] if it's absent or zero.
#[must_use]
pub fn format_budget_bound(bound: Option<Money>) -> Option<String> {
    bound.filter(|b| !b.is_zero()).map(format_price)
}

/// Formats a budget range: `$200K - $500K`, `From $200K`, `Up to $500K`.
///
/// [`None`] is returned if neither bound is set.
#[must_use]
pub fn format_budget(min: Option<Money>, max: Option<Money>) -> Option<String> {
    match (format_budget_bound(min), format_budget_bound(max)) {
        (Some(min), Some(max)) => Some(format!("{min} - {max}")),
        (Some(min), None) => Some(format!("From {min}")),
        (None, Some(max)) => Some(format!("Up to {max}")),
        (None, None) => None,
    }
}

/// Formats the provided amount as US dollars with thousands separators and at
/// most two fraction digits: `$1,250,000`, `$1,234.5`.
#[must_use]
pub fn format_currency(amount: Money) -> String {
    let amount = amount
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (int, frac) = amount.split_once('.').unwrap_or((amount.as_str(), ""));

    let digits = int.as_bytes();
    let head = digits.len() % 3;
    let grouped = (head..=digits.len())
        .step_by(3)
        .tuple_windows()
        .map(|(from, to)| &int[from..to]);
    let int = if head == 0 {
        grouped.format(",").to_string()
    } else {
        std::iter::once(&int[..head]).chain(grouped).format(",").to_string()
    };

    if frac.is_empty() {
        format!("${int}")
    } else {
        format!("${int}.{frac}")
    }
}

/// Rounds the provided value to the given number of decimals, half away from
/// zero, keeping exactly that many of them.
fn rounded(n: Decimal, decimals: u32) -> Decimal {
    let mut n = n.round_dp_with_strategy(
        decimals,
        RoundingStrategy::MidpointAwayFromZero,
    );
    n.rescale(decimals);
    n
}

#[cfg(test)]
mod spec {
    use common::Money;

    use super::{
        format_budget, format_budget_bound, format_currency, format_price,
    };

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn millions() {
        assert_eq!(format_price(money("1250000")), "$1.3M");
        assert_eq!(format_price(money("1000000")), "$1.0M");
        assert_eq!(format_price(money("2449999")), "$2.4M");
        assert_eq!(format_price(money("12750000")), "$12.8M");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_price(money("450000")), "$450K");
        assert_eq!(format_price(money("1000")), "$1K");
        assert_eq!(format_price(money("1499")), "$1K");
        assert_eq!(format_price(money("1500")), "$2K");
        assert_eq!(format_price(money("999999")), "$1000K");
    }

    #[test]
    fn below_thousand() {
        assert_eq!(format_price(money("950")), "$950");
        assert_eq!(format_price(money("999.5")), "$999.5");
        assert_eq!(format_price(Money::ZERO), "$0");
    }

    #[test]
    fn budget_bound() {
        assert_eq!(format_budget_bound(None), None);
        assert_eq!(format_budget_bound(Some(Money::ZERO)), None);
        assert_eq!(
            format_budget_bound(Some(money("200000"))).as_deref(),
            Some("$200K"),
        );
    }

    #[test]
    fn budget_range() {
        assert_eq!(format_budget(None, None), None);
        assert_eq!(
            format_budget(Some(money("200000")), None).as_deref(),
            Some("From $200K"),
        );
        assert_eq!(
            format_budget(None, Some(money("500000"))).as_deref(),
            Some("Up to $500K"),
        );
        assert_eq!(
            format_budget(Some(money("200000")), Some(money("500000")))
                .as_deref(),
            Some("$200K - $500K"),
        );
        assert_eq!(
            format_budget(Some(Money::ZERO), Some(money("500000"))).as_deref(),
            Some("Up to $500K"),
        );
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(money("1250000")), "$1,250,000");
        assert_eq!(format_currency(money("1234.5")), "$1,234.5");
        assert_eq!(format_currency(money("1234.567")), "$1,234.57");
        assert_eq!(format_currency(money("999")), "$999");
        assert_eq!(format_currency(money("100000")), "$100,000");
        assert_eq!(format_currency(Money::ZERO), "$0");
    }
}
