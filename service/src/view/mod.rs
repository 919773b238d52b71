//! Derived view model.
//!
//! Pure functions computing filtered subsets, aggregates and display labels
//! out of already fetched entities. Nothing here performs I/O: the current
//! moment is always provided explicitly via a [`Clock`].

pub mod commission;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod map;
pub mod property;
pub mod reminder;

use common::{datetime::UtcOffset, Date, DateTime, DateTimeOf};

pub use self::{
    dashboard::Overview,
    filter::{Filter, Search},
    map::Map,
    reminder::Agenda,
};

/// Moment the view model is computed at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Clock {
    /// Current [`DateTime`].
    pub now: DateTime,

    /// [`UtcOffset`] calendar days are observed in.
    pub offset: UtcOffset,
}

impl Clock {
    /// Creates a new [`Clock`] pointing to the provided moment.
    #[must_use]
    pub fn at(now: DateTime, offset: UtcOffset) -> Self {
        Self { now, offset }
    }

    /// Creates a new [`Clock`] pointing to the current moment.
    #[must_use]
    pub fn now(offset: UtcOffset) -> Self {
        Self::at(DateTime::now(), offset)
    }

    /// Returns the current calendar [`Date`].
    #[must_use]
    pub fn today(&self) -> Date {
        self.now.date(self.offset)
    }

    /// Returns the calendar [`Date`] of the provided [`DateTime`].
    #[must_use]
    pub fn date_of<Of: ?Sized>(&self, at: DateTimeOf<Of>) -> Date {
        at.date(self.offset)
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Entities for testing the view model.

    use common::{datetime::UtcOffset, Date, DateTime, Money, Percent};

    use crate::domain::{
        client, commission, interaction, property, reminder, Client,
        Commission, Interaction, Property, Reminder,
    };

    use super::Clock;

    /// Returns a [`Clock`] at `2024-05-15T12:00:00Z` in UTC.
    pub(crate) fn clock() -> Clock {
        Clock::at(datetime("2024-05-15T12:00:00Z"), UtcOffset::UTC)
    }

    pub(crate) fn datetime(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    pub(crate) fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    pub(crate) fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    pub(crate) fn property(title: &str) -> Property {
        Property {
            id: property::Id::new(),
            title: property::Title::new(title).unwrap(),
            description: property::Description::default(),
            address: property::Address::new("1 Main St").unwrap(),
            city: property::City::new("Springfield").unwrap(),
            zip_code: None,
            kind: property::Kind::House,
            listing: property::ListingKind::Sale,
            status: property::Status::Available,
            price: money("450000"),
            bedrooms: Some(3),
            bathrooms: Some(2),
            area_sqft: Some(1800),
            features: vec![],
            images: vec![],
            latitude: None,
            longitude: None,
            owner_id: None,
            commission_rate: None,
            contract_end_date: None,
            portal_listings: vec![],
            created_at: datetime("2024-01-01T00:00:00Z").coerce(),
        }
    }

    pub(crate) fn client(name: &str) -> Client {
        Client {
            id: client::Id::new(),
            name: client::Name::new(name).unwrap(),
            email: None,
            phone: None,
            kind: client::Kind::Buyer,
            status: client::Status::Active,
            budget_min: None,
            budget_max: None,
            preferred_locations: vec![],
            preferred_property_kinds: vec![],
            source: None,
            notes: client::Notes::default(),
            created_at: datetime("2024-01-01T00:00:00Z").coerce(),
        }
    }

    pub(crate) fn commission(
        amount: &str,
        status: commission::Status,
        closing_date: Option<&str>,
    ) -> Commission {
        let mut c = Commission {
            id: commission::Id::new(),
            property_id: None,
            client_id: None,
            deal: commission::DealKind::Sale,
            deal_value: money(amount),
            rate: Percent::from(100),
            amount: Money::ZERO,
            status,
            closing_date: closing_date.map(date),
            payment_date: None,
            notes: commission::Notes::default(),
            created_at: datetime("2024-01-01T00:00:00Z").coerce(),
        };
        c.recalculate();
        c
    }

    pub(crate) fn reminder(due_at: &str, status: reminder::Status) -> Reminder {
        Reminder {
            id: reminder::Id::new(),
            title: reminder::Title::new(format!("Due {due_at}")).unwrap(),
            description: reminder::Description::default(),
            due_at: datetime(due_at).coerce(),
            kind: reminder::Kind::FollowUp,
            priority: reminder::Priority::Medium,
            status,
            client_id: None,
            property_id: None,
            created_at: datetime("2024-01-01T00:00:00Z").coerce(),
        }
    }

    pub(crate) fn interaction(created_at: &str) -> Interaction {
        Interaction {
            id: interaction::Id::new(),
            client_id: client::Id::new(),
            property_id: None,
            kind: interaction::Kind::Call,
            title: interaction::Title::new("Call").unwrap(),
            description: interaction::Description::default(),
            occurred_at: datetime(created_at).coerce(),
            outcome: interaction::Outcome::Pending,
            created_at: datetime(created_at).coerce(),
        }
    }
}
