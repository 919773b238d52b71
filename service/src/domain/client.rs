//! [`Client`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use uuid::Uuid;

use crate::domain::property;

/// Person the agency works with: a buyer, a seller or both.
#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`Name`] of this [`Client`].
    pub name: Name,

    /// [`Email`] of this [`Client`], if known.
    pub email: Option<Email>,

    /// [`Phone`] of this [`Client`], if known.
    pub phone: Option<Phone>,

    /// [`Kind`] of this [`Client`].
    pub kind: Kind,

    /// [`Status`] of this [`Client`].
    pub status: Status,

    /// Lower bound of this [`Client`]'s budget, if any.
    pub budget_min: Option<Money>,

    /// Upper bound of this [`Client`]'s budget, if any.
    pub budget_max: Option<Money>,

    /// [`Location`]s this [`Client`] prefers.
    pub preferred_locations: Vec<Location>,

    /// [`property::Kind`]s this [`Client`] prefers.
    pub preferred_property_kinds: Vec<property::Kind>,

    /// [`Source`] this [`Client`] came from, if known.
    pub source: Option<Source>,

    /// [`Notes`] about this [`Client`].
    pub notes: Notes,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Client`].
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

define_text! {
    #[doc = "Full name of a [`Client`]."]
    struct Name(max = 512);
}

define_text! {
    #[doc = "Location a [`Client`] is interested in."]
    struct Location(max = 512);
}

define_text! {
    #[doc = "Free-form notes about a [`Client`]."]
    struct Notes(max = 4096, empty);
}

define_kind! {
    #[doc = "Kind of a [`Client`]."]
    enum Kind {
        #[doc = "[`Client`] looks for a property to buy or rent."]
        Buyer = 1,

        #[doc = "[`Client`] sells or leases out a property."]
        Seller = 2,

        #[doc = "[`Client`] is both a buyer and a seller."]
        Both = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Client`]."]
    enum Status {
        #[doc = "[`Client`] is being actively worked with."]
        Active = 1,

        #[doc = "[`Client`] is on hold."]
        Inactive = 2,

        #[doc = "[`Client`] has closed their business with the agency."]
        Closed = 3,
    }
}

define_kind! {
    #[doc = "Source a [`Client`] came from."]
    enum Source {
        #[doc = "Referred by someone."]
        Referral = 1,

        #[doc = "Agency website."]
        Website = 2,

        #[doc = "Listing portal."]
        Portal = 3,

        #[doc = "Social media."]
        SocialMedia = 4,

        #[doc = "Cold call."]
        ColdCall = 5,

        #[doc = "Anything else."]
        Other = 6,
    }
}

/// Email address of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        let address = address.trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                "^([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                  |\\x5c[\\x00-\\x7f])*\\x22)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x22))*\\x40\
                  ([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d))*$",
            )
            .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 512 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Client`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        let number = number.trim();
        Self::check(number).then(|| Self(number.to_owned()))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^([+]?\d{1,2}[-\s]?|)\(?\d{3}\)?[-\s]?\d{3}[-\s]?\d{4}$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, Phone, Source};

    #[test]
    fn email() {
        assert!(Email::new("jane.doe@example.com").is_some());
        assert_eq!(
            AsRef::<str>::as_ref(&Email::new(" jane@example.com ").unwrap()),
            "jane@example.com",
        );
        assert!(Email::new("jane.example.com").is_none());
        assert!(Email::new("jane@").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn phone() {
        assert!(Phone::new("555-123-4567").is_some());
        assert!(Phone::new("+1 (555) 123-4567").is_some());
        assert!(Phone::new("5551234567").is_some());
        assert!(Phone::new("123").is_none());
        assert!(Phone::new("phone").is_none());
    }

    #[test]
    fn source() {
        assert_eq!(Source::SocialMedia.to_string(), "social_media");
        assert_eq!("cold_call".parse::<Source>(), Ok(Source::ColdCall));
    }
}
