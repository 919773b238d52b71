//! [`Reminder`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{client, property};

/// Scheduled task of an agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Reminder {
    /// ID of this [`Reminder`].
    pub id: Id,

    /// [`Title`] of this [`Reminder`].
    pub title: Title,

    /// [`Description`] of this [`Reminder`].
    pub description: Description,

    /// [`DateTime`] this [`Reminder`] is due at.
    pub due_at: DueDateTime,

    /// [`Kind`] of this [`Reminder`].
    pub kind: Kind,

    /// [`Priority`] of this [`Reminder`].
    pub priority: Priority,

    /// [`Status`] of this [`Reminder`].
    pub status: Status,

    /// ID of the [`Client`] this [`Reminder`] concerns, if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// ID of the [`Property`] this [`Reminder`] concerns, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// [`DateTime`] when this [`Reminder`] was created.
    pub created_at: CreationDateTime,
}

impl Reminder {
    /// Indicates whether this [`Reminder`] still awaits an action.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }
}

/// ID of a [`Reminder`].
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
    #[doc = "Kind of a [`Reminder`]."]
    enum Kind {
        #[doc = "Agency contract of a property is about to end."]
        ContractRenewal = 1,

        #[doc = "Property viewing."]
        Viewing = 2,

        #[doc = "Follow-up with a client."]
        FollowUp = 3,

        #[doc = "Payment to collect."]
        Payment = 4,

        #[doc = "Anything else."]
        Custom = 5,
    }
}

define_kind! {
    #[doc = "Priority of a [`Reminder`]."]
    enum Priority {
        #[doc = "Low priority."]
        Low = 1,

        #[doc = "Medium priority."]
        Medium = 2,

        #[doc = "High priority."]
        High = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Reminder`]."]
    enum Status {
        #[doc = "[`Reminder`] awaits an action."]
        Pending = 1,

        #[doc = "[`Reminder`] has been acted upon."]
        Completed = 2,

        #[doc = "[`Reminder`] has been dismissed without an action."]
        Dismissed = 3,
    }
}

define_text! {
    #[doc = "Title of a [`Reminder`]."]
    struct Title(max = 512);
}

define_text! {
    #[doc = "Free-form description of a [`Reminder`]."]
    struct Description(max = 4096, empty);
}

/// [`DateTime`] when a [`Reminder`] is due.
pub type DueDateTime = DateTimeOf<(Reminder, unit::Due)>;

/// [`DateTime`] when a [`Reminder`] was created.
pub type CreationDateTime = DateTimeOf<(Reminder, unit::Creation)>;
