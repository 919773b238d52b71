//! [`Commission`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, Date, DateTimeOf, Money, Percent};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{client, property};

/// Fee earned by the agency from a closed deal.
#[derive(Clone, Debug, PartialEq)]
pub struct Commission {
    /// ID of this [`Commission`].
    pub id: Id,

    /// ID of the [`Property`] the deal was made upon, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// ID of the [`Client`] the deal was made with, if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// [`DealKind`] of this [`Commission`].
    pub deal: DealKind,

    /// Value of the deal.
    pub deal_value: Money,

    /// Rate of this [`Commission`] from the [`Commission::deal_value`].
    pub rate: Percent,

    /// Amount of this [`Commission`].
    ///
    /// Always equals to the [`Commission::rate`] of the
    /// [`Commission::deal_value`], see [`Commission::amount_of()`].
    pub amount: Money,

    /// [`Status`] of this [`Commission`].
    pub status: Status,

    /// [`Date`] the deal was closed on, if it was.
    pub closing_date: Option<Date>,

    /// [`Date`] this [`Commission`] was paid on, if it was.
    pub payment_date: Option<Date>,

    /// [`Notes`] about this [`Commission`].
    pub notes: Notes,

    /// [`DateTime`] when this [`Commission`] was created.
    pub created_at: CreationDateTime,
}

impl Commission {
    /// Default [`Commission::rate`] when nothing else is agreed.
    pub const DEFAULT_RATE: u8 = 3;

    /// Calculates the [`Commission::amount`] of the provided `deal_value`
    /// at the provided `rate`, rounded to whole cents.
    #[must_use]
    pub fn amount_of(deal_value: Money, rate: Percent) -> Money {
        rate.of(deal_value)
    }

    /// Recalculates the [`Commission::amount`] of this [`Commission`].
    pub fn recalculate(&mut self) {
        self.amount = Self::amount_of(self.deal_value, self.rate);
    }
}

/// ID of a [`Commission`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Kind of a deal a [`Commission`] is earned from."]
    enum DealKind {
        #[doc = "Sale of a property."]
        Sale = 1,

        #[doc = "Rental of a property."]
        Rental = 2,
    }
}

define_kind! {
    #[doc = "Payment status of a [`Commission`]."]
    enum Status {
        #[doc = "[`Commission`] is not paid yet."]
        Pending = 1,

        #[doc = "[`Commission`] is paid in full."]
        Paid = 2,

        #[doc = "[`Commission`] is paid partially."]
        PartiallyPaid = 3,
    }
}

define_text! {
    #[doc = "Free-form notes about a [`Commission`]."]
    struct Notes(max = 4096, empty);
}

/// [`DateTime`] when a [`Commission`] was created.
pub type CreationDateTime = DateTimeOf<(Commission, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{Money, Percent};

    use super::Commission;

    #[test]
    fn amount_is_derived_from_deal_value() {
        let deal_value: Money = "500000".parse().unwrap();

        assert_eq!(
            Commission::amount_of(
                deal_value,
                Percent::from(Commission::DEFAULT_RATE),
            ),
            "15000.00".parse().unwrap(),
        );
        assert_eq!(
            Commission::amount_of(
                "1234.56".parse().unwrap(),
                "2.5".parse::<Percent>().unwrap(),
            ),
            "30.86".parse::<Money>().unwrap(),
        );
    }
}
