//! [`Property`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, define_text, unit, Date, DateTimeOf, Money, Percent};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::client;

/// Real estate listed by the agency for sale or rent.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// [`Address`] of this [`Property`].
    pub address: Address,

    /// [`City`] this [`Property`] is located in.
    pub city: City,

    /// [`ZipCode`] of this [`Property`], if known.
    pub zip_code: Option<ZipCode>,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`ListingKind`] of this [`Property`].
    pub listing: ListingKind,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// Asking price of this [`Property`].
    pub price: Money,

    /// Number of bedrooms in this [`Property`], if known.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms in this [`Property`], if known.
    pub bathrooms: Option<u16>,

    /// Area of this [`Property`] in square feet, if known.
    pub area_sqft: Option<u32>,

    /// [`Feature`]s of this [`Property`].
    pub features: Vec<Feature>,

    /// [`ImageUrl`]s of this [`Property`].
    pub images: Vec<ImageUrl>,

    /// [`Latitude`] of this [`Property`], if known.
    pub latitude: Option<Latitude>,

    /// [`Longitude`] of this [`Property`], if known.
    pub longitude: Option<Longitude>,

    /// ID of the [`Client`] owning this [`Property`], if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub owner_id: Option<client::Id>,

    /// Commission rate agreed for this [`Property`], if any.
    pub commission_rate: Option<Percent>,

    /// [`Date`] the agency contract of this [`Property`] ends at, if any.
    pub contract_end_date: Option<Date>,

    /// [`PortalListing`]s this [`Property`] is syndicated to.
    pub portal_listings: Vec<PortalListing>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

impl Property {
    /// Returns the map coordinates of this [`Property`], if it has both a
    /// non-zero [`Latitude`] and a non-zero [`Longitude`].
    #[must_use]
    pub fn coordinates(&self) -> Option<(Latitude, Longitude)> {
        let lat = self.latitude.filter(|l| !l.is_zero())?;
        let lng = self.longitude.filter(|l| !l.is_zero())?;
        Some((lat, lng))
    }
}

/// ID of a [`Property`].
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
    #[doc = "Title of a [`Property`] listing."]
    struct Title(max = 512);
}

define_text! {
    #[doc = "Free-form description of a [`Property`]."]
    struct Description(max = 4096, empty);
}

define_text! {
    #[doc = "Street address of a [`Property`]."]
    struct Address(max = 512);
}

define_text! {
    #[doc = "City a [`Property`] is located in."]
    struct City(max = 512);
}

define_text! {
    #[doc = "Zip code of a [`Property`]."]
    struct ZipCode(max = 32);
}

define_text! {
    #[doc = "Notable feature of a [`Property`] (`Pool`, `Garage`, etc)."]
    struct Feature(max = 128);
}

define_text! {
    #[doc = "URL of a [`Property`] image."]
    struct ImageUrl(max = 2048);
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "Apartment in a multi-unit building."]
        Apartment = 1,

        #[doc = "Detached house."]
        House = 2,

        #[doc = "Condominium unit."]
        Condo = 3,

        #[doc = "Townhouse."]
        Townhouse = 4,

        #[doc = "Land plot."]
        Land = 5,

        #[doc = "Commercial real estate."]
        Commercial = 6,

        #[doc = "Anything else."]
        Other = 7,
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`] listing."]
    enum ListingKind {
        #[doc = "[`Property`] is listed for sale."]
        Sale = 1,

        #[doc = "[`Property`] is listed for rent."]
        Rent = 2,
    }
}

define_kind! {
    #[doc = "Status of a [`Property`]."]
    enum Status {
        #[doc = "[`Property`] is on the market."]
        Available = 1,

        #[doc = "[`Property`] has a deal in progress."]
        UnderContract = 2,

        #[doc = "[`Property`] has been sold."]
        Sold = 3,

        #[doc = "[`Property`] has been rented out."]
        Rented = 4,

        #[doc = "[`Property`] is withdrawn from the market."]
        OffMarket = 5,
    }
}

/// Latitude of a [`Property`] in degrees.
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a new [`Latitude`] if the provided value lies within
    /// `-90..=90` degrees.
    #[must_use]
    pub fn new(degrees: f64) -> Option<Self> {
        (-90.0..=90.0).contains(&degrees).then_some(Self(degrees))
    }

    /// Indicates whether this [`Latitude`] is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Longitude of a [`Property`] in degrees.
#[derive(Clone, Copy, Debug, Display, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Longitude(f64);

impl Longitude {
    /// Creates a new [`Longitude`] if the provided value lies within
    /// `-180..=180` degrees.
    #[must_use]
    pub fn new(degrees: f64) -> Option<Self> {
        (-180.0..=180.0).contains(&degrees).then_some(Self(degrees))
    }

    /// Indicates whether this [`Longitude`] is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// External syndication of a [`Property`] to a listing portal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortalListing {
    /// [`PortalName`] the [`Property`] is listed on.
    pub portal: PortalName,

    /// [`ListingUrl`] of the [`Property`] on the portal.
    pub url: ListingUrl,

    /// [`Date`] the [`Property`] was listed on the portal, if known.
    pub listed_on: Option<Date>,
}

define_text! {
    #[doc = "Name of a listing portal."]
    struct PortalName(max = 128);
}

define_text! {
    #[doc = "URL of a [`Property`] listing on a portal."]
    struct ListingUrl(max = 2048);
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Kind, Latitude, ListingKind, Longitude, Status};

    #[test]
    fn kinds_use_snake_case() {
        assert_eq!(Status::UnderContract.to_string(), "under_contract");
        assert_eq!("off_market".parse::<Status>(), Ok(Status::OffMarket));
        assert_eq!(ListingKind::Rent.to_string(), "rent");
        assert_eq!(Kind::all().count(), 7);
        assert!("Apartment".parse::<Kind>().is_err());
    }

    #[test]
    fn coordinates_are_bounded() {
        assert!(Latitude::new(40.7128).is_some());
        assert!(Latitude::new(90.5).is_none());
        assert!(Longitude::new(-74.006).is_some());
        assert!(Longitude::new(-180.5).is_none());
        assert!(Latitude::new(0.0).unwrap().is_zero());
    }
}
