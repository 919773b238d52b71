//! Entity filtering predicates.

use common::Date;
use strum::{Display, EnumString};

use crate::domain::{
    client, commission, property, reminder, Client, Commission, Property,
    Reminder,
};

/// Predicate over `T` entities.
pub trait Filter<T> {
    /// Checks whether the provided entity matches this [`Filter`].
    fn matches(&self, entity: &T) -> bool;

    /// Retains only the entities matching this [`Filter`], preserving their
    /// order.
    fn apply(&self, entities: Vec<T>) -> Vec<T> {
        entities.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Case-insensitive substring search.
///
/// Empty [`Search`] matches everything.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Search(String);

impl Search {
    /// Creates a new [`Search`] for the provided text.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().to_lowercase())
    }

    /// Checks whether any of the provided `fields` contains this [`Search`]
    /// text.
    #[must_use]
    pub fn matches<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        self.0.is_empty()
            || fields.into_iter().any(|f| f.to_lowercase().contains(&self.0))
    }
}

/// Checks the provided categorical `filter` accepts the `value`.
///
/// [`None`] filter means "all" and accepts any value.
fn accepts<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |f| f == value)
}

/// [`Filter`] of [`Property`] entities.
#[derive(Clone, Debug, Default)]
pub struct PropertyFilter {
    /// [`Search`] over the title, address and city.
    pub search: Search,

    /// [`property::Kind`] to match, if any.
    pub kind: Option<property::Kind>,

    /// [`property::Status`] to match, if any.
    pub status: Option<property::Status>,

    /// [`property::ListingKind`] to match, if any.
    pub listing: Option<property::ListingKind>,
}

impl Filter<Property> for PropertyFilter {
    fn matches(&self, p: &Property) -> bool {
        self.search
            .matches([p.title.as_str(), p.address.as_str(), p.city.as_str()])
            && accepts(self.kind, p.kind)
            && accepts(self.status, p.status)
            && accepts(self.listing, p.listing)
    }
}

/// [`Filter`] of [`Client`] entities.
#[derive(Clone, Debug, Default)]
pub struct ClientFilter {
    /// [`Search`] over the name, email and phone.
    pub search: Search,

    /// [`client::Kind`] to match, if any.
    pub kind: Option<client::Kind>,

    /// [`client::Status`] to match, if any.
    pub status: Option<client::Status>,
}

impl Filter<Client> for ClientFilter {
    fn matches(&self, c: &Client) -> bool {
        self.search.matches(
            [
                Some(c.name.as_str()),
                c.email.as_ref().map(AsRef::<str>::as_ref),
                c.phone.as_ref().map(AsRef::<str>::as_ref),
            ]
            .into_iter()
            .flatten(),
        ) && accepts(self.kind, c.kind)
            && accepts(self.status, c.status)
    }
}

/// Period of [`Commission`]s closing.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Period {
    /// Any time.
    #[default]
    All,

    /// Current calendar month.
    Month,

    /// Current calendar year.
    Year,
}

/// [`Filter`] of [`Commission`] entities.
///
/// [`Commission`]s without a closing date always match the [`Period`].
#[derive(Clone, Copy, Debug)]
pub struct CommissionFilter {
    /// [`commission::Status`] to match, if any.
    pub status: Option<commission::Status>,

    /// [`Period`] the [`Commission`] should be closed within.
    pub period: Period,

    /// Current [`Date`] the [`Period`] is relative to.
    pub today: Date,
}

impl Filter<Commission> for CommissionFilter {
    fn matches(&self, c: &Commission) -> bool {
        let in_period = match (self.period, c.closing_date) {
            (Period::All, _) | (_, None) => true,
            (Period::Month, Some(closed)) => closed.same_month(self.today),
            (Period::Year, Some(closed)) => closed.year() == self.today.year(),
        };
        in_period && accepts(self.status, c.status)
    }
}

/// [`Filter`] of [`Reminder`] entities.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReminderFilter {
    /// [`reminder::Status`] to match, if any.
    pub status: Option<reminder::Status>,
}

impl Filter<Reminder> for ReminderFilter {
    fn matches(&self, r: &Reminder) -> bool {
        accepts(self.status, r.status)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{client, commission, property},
        view::fixture,
    };

    use super::{
        ClientFilter, CommissionFilter, Filter as _, Period, PropertyFilter,
        Search,
    };

    #[test]
    fn empty_search_matches_everything() {
        let all = PropertyFilter::default();
        let properties = vec![
            fixture::property("Loft"),
            fixture::property("Cottage"),
            fixture::property("Villa"),
        ];

        assert_eq!(all.apply(properties.clone()), properties);
        assert!(ClientFilter::default().matches(&fixture::client("Jane")));
    }

    #[test]
    fn non_matching_search_matches_none() {
        let filter = PropertyFilter {
            search: Search::new("penthouse"),
            ..PropertyFilter::default()
        };

        assert!(filter
            .apply(vec![fixture::property("Loft"), fixture::property("Villa")])
            .is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_fields() {
        let mut p = fixture::property("Sunny Loft");
        p.city = property::City::new("Brooklyn").unwrap();

        assert!(PropertyFilter {
            search: Search::new("LOFT"),
            ..PropertyFilter::default()
        }
        .matches(&p));
        assert!(PropertyFilter {
            search: Search::new("brook"),
            ..PropertyFilter::default()
        }
        .matches(&p));
        assert!(PropertyFilter {
            search: Search::new("main st"),
            ..PropertyFilter::default()
        }
        .matches(&p));
    }

    #[test]
    fn categorical_filters_must_all_match() {
        let mut p = fixture::property("Loft");
        p.kind = property::Kind::Apartment;
        p.listing = property::ListingKind::Rent;

        let filter = PropertyFilter {
            kind: Some(property::Kind::Apartment),
            listing: Some(property::ListingKind::Rent),
            ..PropertyFilter::default()
        };
        assert!(filter.matches(&p));

        let filter = PropertyFilter {
            status: Some(property::Status::Sold),
            ..filter
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn client_search_skips_missing_contacts() {
        let mut c = fixture::client("Jane Doe");
        c.kind = client::Kind::Seller;
        c.email = client::Email::new("jane@example.com");

        assert!(ClientFilter {
            search: Search::new("example"),
            ..ClientFilter::default()
        }
        .matches(&c));
        assert!(!ClientFilter {
            search: Search::new("555"),
            ..ClientFilter::default()
        }
        .matches(&c));
        assert!(!ClientFilter {
            kind: Some(client::Kind::Buyer),
            ..ClientFilter::default()
        }
        .matches(&c));
    }

    #[test]
    fn commission_period() {
        let today = fixture::date("2024-05-15");
        let in_month = fixture::commission(
            "100",
            commission::Status::Paid,
            Some("2024-05-01"),
        );
        let in_year = fixture::commission(
            "100",
            commission::Status::Paid,
            Some("2024-01-10"),
        );
        let last_year = fixture::commission(
            "100",
            commission::Status::Pending,
            Some("2023-05-20"),
        );
        let not_closed =
            fixture::commission("100", commission::Status::Pending, None);

        let month = CommissionFilter {
            status: None,
            period: Period::Month,
            today,
        };
        assert!(month.matches(&in_month));
        assert!(!month.matches(&in_year));
        assert!(!month.matches(&last_year));
        assert!(month.matches(&not_closed));

        let year = CommissionFilter {
            period: Period::Year,
            ..month
        };
        assert!(year.matches(&in_year));
        assert!(!year.matches(&last_year));

        let pending = CommissionFilter {
            status: Some(commission::Status::Pending),
            period: Period::All,
            today,
        };
        assert!(pending.matches(&last_year));
        assert!(!pending.matches(&in_month));
    }
}
