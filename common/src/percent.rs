//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use crate::Money;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is within
    /// `0..=100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(Self(val.normalize()))
        }
    }

    /// Returns the value of this [`Percent`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Calculates this [`Percent`] of the provided [`Money`], rounded to
    /// whole cents.
    #[must_use]
    pub fn of(self, money: Money) -> Money {
        Money::new(money.amount() * self.0 / Decimal::ONE_HUNDRED)
            .unwrap_or(Money::ZERO)
            .round_to_cents()
    }
}

impl From<u8> for Percent {
    /// Creates a new [`Percent`] clamping the provided value to `100`.
    fn from(val: u8) -> Self {
        Self(Decimal::from(val.min(100)))
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Floating-point percentage.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(m: &Percent) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::Money;

    use super::Percent;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn bounds() {
        assert!("0".parse::<Percent>().is_ok());
        assert!("100".parse::<Percent>().is_ok());
        assert!("2.5".parse::<Percent>().is_ok());
        assert!("-0.1".parse::<Percent>().is_err());
        assert!("100.1".parse::<Percent>().is_err());
    }

    #[test]
    fn of_money() {
        assert_eq!(Percent::from(3).of(money("500000")), money("15000"));
        assert_eq!(
            "2.5".parse::<Percent>().unwrap().of(money("333.33")),
            money("8.33"),
        );
        assert_eq!(Percent::from(0).of(money("1000")), Money::ZERO);
    }
}
