//! [`Interaction`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{client, property};

/// Activity logged against a [`Client`] and, optionally, a [`Property`].
///
/// [`Client`]: crate::domain::Client
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    /// ID of this [`Interaction`].
    pub id: Id,

    /// ID of the [`Client`] this [`Interaction`] is logged against.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: client::Id,

    /// ID of the [`Property`] this [`Interaction`] concerns, if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: Option<property::Id>,

    /// [`Kind`] of this [`Interaction`].
    pub kind: Kind,

    /// [`Title`] of this [`Interaction`].
    pub title: Title,

    /// [`Description`] of this [`Interaction`].
    pub description: Description,

    /// [`DateTime`] this [`Interaction`] took place at.
    pub occurred_at: OccurrenceDateTime,

    /// [`Outcome`] of this [`Interaction`].
    pub outcome: Outcome,

    /// [`DateTime`] when this [`Interaction`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Interaction`].
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
    #[doc = "Kind of an [`Interaction`]."]
    enum Kind {
        #[doc = "Phone call."]
        Call = 1,

        #[doc = "Email."]
        Email = 2,

        #[doc = "Property viewing."]
        Viewing = 3,

        #[doc = "In-person meeting."]
        Meeting = 4,

        #[doc = "Plain note."]
        Note = 5,

        #[doc = "Offer made or received."]
        Offer = 6,

        #[doc = "Contract signing or negotiation."]
        Contract = 7,
    }
}

define_kind! {
    #[doc = "Outcome of an [`Interaction`]."]
    enum Outcome {
        #[doc = "Went well."]
        Positive = 1,

        #[doc = "Neither good nor bad."]
        Neutral = 2,

        #[doc = "Went badly."]
        Negative = 3,

        #[doc = "Not known yet."]
        Pending = 4,
    }
}

define_text! {
    #[doc = "Title of an [`Interaction`]."]
    struct Title(max = 512);
}

define_text! {
    #[doc = "Free-form description of an [`Interaction`]."]
    struct Description(max = 4096, empty);
}

/// [`DateTime`] when an [`Interaction`] took place.
pub type OccurrenceDateTime = DateTimeOf<(Interaction, unit::Occurrence)>;

/// [`DateTime`] when an [`Interaction`] was created.
pub type CreationDateTime = DateTimeOf<(Interaction, unit::Creation)>;
