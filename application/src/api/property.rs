//! [`Property`]-related definitions.

use common::{Date, DateTime, Handler as _, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query, view};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A property listed by the agency.
#[derive(Clone, Debug, From)]
pub struct Property(domain::Property);

/// A property listed by the agency.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Property` listing.
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Free-form description of this `Property`.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Street address of this `Property`.
    pub fn address(&self) -> Address {
        self.0.address.clone().into()
    }

    /// City this `Property` is located in.
    pub fn city(&self) -> City {
        self.0.city.clone().into()
    }

    /// Zip code of this `Property`, if known.
    pub fn zip_code(&self) -> Option<ZipCode> {
        self.0.zip_code.clone().map(Into::into)
    }

    /// Kind of this `Property`.
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Kind of this `Property` listing.
    pub fn listing(&self) -> ListingKind {
        self.0.listing.into()
    }

    /// Status of this `Property`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Asking price of this `Property`.
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Compact label of the asking price (`$1.3M`, `$450K`).
    pub fn price_label(&self) -> String {
        view::format::format_price(self.0.price)
    }

    /// Number of bedrooms, if known.
    pub fn bedrooms(&self) -> Option<i32> {
        self.0.bedrooms.map(i32::from)
    }

    /// Number of bathrooms, if known.
    pub fn bathrooms(&self) -> Option<i32> {
        self.0.bathrooms.map(i32::from)
    }

    /// Area in square feet, if known.
    pub fn area_sqft(&self) -> Option<i32> {
        self.0
            .area_sqft
            .map(|a| i32::try_from(a).unwrap_or(i32::MAX))
    }

    /// Notable features of this `Property`.
    pub fn features(&self) -> Vec<Feature> {
        self.0.features.iter().cloned().map(Into::into).collect()
    }

    /// URLs of this `Property` images.
    pub fn images(&self) -> Vec<ImageUrl> {
        self.0.images.iter().cloned().map(Into::into).collect()
    }

    /// Latitude of this `Property` in degrees, if known.
    pub fn latitude(&self) -> Option<f64> {
        self.0.latitude.map(Into::into)
    }

    /// Longitude of this `Property` in degrees, if known.
    pub fn longitude(&self) -> Option<f64> {
        self.0.longitude.map(Into::into)
    }

    /// `Client` owning this `Property`.
    ///
    /// `null` if there is no owner, or the owner doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        let Some(id) = self.0.owner_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::client::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Commission rate agreed for this `Property`, if any.
    pub fn commission_rate(&self) -> Option<Percent> {
        self.0.commission_rate
    }

    /// `Date` the agency contract of this `Property` ends on, if any.
    pub fn contract_end_date(&self) -> Option<Date> {
        self.0.contract_end_date
    }

    /// Indicates whether the agency contract of this `Property` ends within
    /// the next 30 days.
    pub fn needs_contract_renewal(&self, ctx: &Context) -> bool {
        view::property::needs_contract_renewal(
            &self.0,
            ctx.service().clock().today(),
        )
    }

    /// Listing portals this `Property` is syndicated to.
    pub fn portal_listings(&self) -> Vec<PortalListing> {
        self.0
            .portal_listings
            .iter()
            .cloned()
            .map(PortalListing)
            .collect()
    }

    /// `DateTime` when this `Property` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Syndication of a `Property` to a listing portal.
#[derive(Clone, Debug)]
pub struct PortalListing(domain::property::PortalListing);

/// Syndication of a `Property` to a listing portal.
#[graphql_object(name = "PropertyPortalListing", context = Context)]
impl PortalListing {
    /// Name of the portal.
    pub fn portal(&self) -> PortalName {
        self.0.portal.clone().into()
    }

    /// URL of the `Property` on the portal.
    pub fn url(&self) -> ListingUrl {
        self.0.url.clone().into()
    }

    /// `Date` the `Property` was listed on the portal, if known.
    pub fn listed_on(&self) -> Option<Date> {
        self.0.listed_on
    }
}

/// Attributes of a `Property` to be created or updated with.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "PropertyInput")]
pub struct Input {
    /// Title of the `Property` listing.
    pub title: Title,

    /// Free-form description. Empty, if omitted.
    pub description: Option<Description>,

    /// Street address of the `Property`.
    pub address: Address,

    /// City the `Property` is located in.
    pub city: City,

    /// Zip code of the `Property`.
    pub zip_code: Option<ZipCode>,

    /// Kind of the `Property`.
    pub kind: Kind,

    /// Kind of the `Property` listing.
    pub listing: ListingKind,

    /// Status of the `Property`. `AVAILABLE`, if omitted.
    pub status: Option<Status>,

    /// Asking price of the `Property`.
    pub price: Money,

    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of bathrooms.
    pub bathrooms: Option<i32>,

    /// Area in square feet.
    pub area_sqft: Option<i32>,

    /// Notable features of the `Property`.
    pub features: Option<Vec<Feature>>,

    /// URLs of the `Property` images.
    pub images: Option<Vec<ImageUrl>>,

    /// Latitude in degrees, within `-90..=90`.
    pub latitude: Option<f64>,

    /// Longitude in degrees, within `-180..=180`.
    pub longitude: Option<f64>,

    /// ID of the `Client` owning the `Property`.
    pub owner_id: Option<api::client::Id>,

    /// Agreed commission rate.
    pub commission_rate: Option<Percent>,

    /// `Date` the agency contract ends on.
    pub contract_end_date: Option<Date>,

    /// Listing portals the `Property` is syndicated to.
    pub portal_listings: Option<Vec<PortalListingInput>>,
}

/// Syndication of a `Property` to a listing portal.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "PropertyPortalListingInput")]
pub struct PortalListingInput {
    /// Name of the portal.
    pub portal: PortalName,

    /// URL of the `Property` on the portal.
    pub url: ListingUrl,

    /// `Date` the `Property` was listed on the portal.
    pub listed_on: Option<Date>,
}

impl TryFrom<Input> for command::property::Attributes {
    type Error = InputError;

    fn try_from(input: Input) -> Result<Self, Self::Error> {
        let Input {
            title,
            description,
            address,
            city,
            zip_code,
            kind,
            listing,
            status,
            price,
            bedrooms,
            bathrooms,
            area_sqft,
            features,
            images,
            latitude,
            longitude,
            owner_id,
            commission_rate,
            contract_end_date,
            portal_listings,
        } = input;

        let count = |n: Option<i32>| {
            n.map(u16::try_from)
                .transpose()
                .map_err(|_| InputError::InvalidSize)
        };

        Ok(Self {
            title: title.into(),
            description: description.map(Into::into).unwrap_or_default(),
            address: address.into(),
            city: city.into(),
            zip_code: zip_code.map(Into::into),
            kind: kind.into(),
            listing: listing.into(),
            status: status
                .map_or(domain::property::Status::Available, Into::into),
            price,
            bedrooms: count(bedrooms)?,
            bathrooms: count(bathrooms)?,
            area_sqft: area_sqft
                .map(u32::try_from)
                .transpose()
                .map_err(|_| InputError::InvalidSize)?,
            features: features
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            images: images.into_iter().flatten().map(Into::into).collect(),
            latitude: latitude
                .map(|l| {
                    domain::property::Latitude::new(l)
                        .ok_or(InputError::InvalidCoordinates)
                })
                .transpose()?,
            longitude: longitude
                .map(|l| {
                    domain::property::Longitude::new(l)
                        .ok_or(InputError::InvalidCoordinates)
                })
                .transpose()?,
            owner_id: owner_id.map(Into::into),
            commission_rate,
            contract_end_date,
            portal_listings: portal_listings
                .into_iter()
                .flatten()
                .map(|l| domain::property::PortalListing {
                    portal: l.portal.into(),
                    url: l.url.into(),
                    listed_on: l.listed_on,
                })
                .collect(),
        })
    }
}

define_error! {
    enum InputError {
        #[code = "INVALID_PROPERTY_COORDINATES"]
        #[status = BAD_REQUEST]
        #[message = "`Property` coordinates are out of range"]
        InvalidCoordinates,

        #[code = "INVALID_PROPERTY_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "`Property` rooms or area are out of range"]
        InvalidSize,
    }
}

impl AsError for command::property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(PropertyError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}

/// Unique identifier of a `Property`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

/// Title of a `Property` listing.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitle",
    with = scalar::Via::<domain::property::Title>,
)]
pub struct Title(domain::property::Title);

/// Free-form description of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyDescription",
    with = scalar::Via::<domain::property::Description>,
)]
pub struct Description(domain::property::Description);

/// Street address of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyAddress",
    with = scalar::Via::<domain::property::Address>,
)]
pub struct Address(domain::property::Address);

/// City a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCity",
    with = scalar::Via::<domain::property::City>,
)]
pub struct City(domain::property::City);

/// Zip code of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyZipCode",
    with = scalar::Via::<domain::property::ZipCode>,
)]
pub struct ZipCode(domain::property::ZipCode);

/// Notable feature of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyFeature",
    with = scalar::Via::<domain::property::Feature>,
)]
pub struct Feature(domain::property::Feature);

/// URL of a `Property` image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyImageUrl",
    with = scalar::Via::<domain::property::ImageUrl>,
)]
pub struct ImageUrl(domain::property::ImageUrl);

/// Name of a listing portal.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PortalName",
    with = scalar::Via::<domain::property::PortalName>,
)]
pub struct PortalName(domain::property::PortalName);

/// URL of a `Property` listing on a portal.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PortalListingUrl",
    with = scalar::Via::<domain::property::ListingUrl>,
)]
pub struct ListingUrl(domain::property::ListingUrl);

mirror_kind! {
    #[doc = "Kind of a `Property`."]
    #[graphql(name = "PropertyKind")]
    enum Kind = domain::property::Kind {
        #[doc = "Apartment in a multi-unit building."]
        Apartment,
        #[doc = "Detached house."]
        House,
        #[doc = "Condominium unit."]
        Condo,
        #[doc = "Townhouse."]
        Townhouse,
        #[doc = "Land plot."]
        Land,
        #[doc = "Commercial real estate."]
        Commercial,
        #[doc = "Anything else."]
        Other,
    }
}

mirror_kind! {
    #[doc = "Kind of a `Property` listing."]
    #[graphql(name = "ListingKind")]
    enum ListingKind = domain::property::ListingKind {
        #[doc = "Listed for sale."]
        Sale,
        #[doc = "Listed for rent."]
        Rent,
    }
}

mirror_kind! {
    #[doc = "Status of a `Property`."]
    #[graphql(name = "PropertyStatus")]
    enum Status = domain::property::Status {
        #[doc = "On the market."]
        Available,
        #[doc = "Deal in progress."]
        UnderContract,
        #[doc = "Sold."]
        Sold,
        #[doc = "Rented out."]
        Rented,
        #[doc = "Withdrawn from the market."]
        OffMarket,
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain};

    use super::{Input, Kind, ListingKind, Status};

    fn input() -> Input {
        Input {
            title: domain::property::Title::new("Loft").unwrap().into(),
            description: None,
            address: domain::property::Address::new("1 Main St")
                .unwrap()
                .into(),
            city: domain::property::City::new("Brooklyn").unwrap().into(),
            zip_code: None,
            kind: Kind::Apartment,
            listing: ListingKind::Rent,
            status: None,
            price: "2500".parse().unwrap(),
            bedrooms: Some(2),
            bathrooms: None,
            area_sqft: Some(900),
            features: None,
            images: None,
            latitude: Some(40.6782),
            longitude: Some(-73.9442),
            owner_id: None,
            commission_rate: None,
            contract_end_date: None,
            portal_listings: None,
        }
    }

    #[test]
    fn defaults_omitted_attributes() {
        let attrs = command::property::Attributes::try_from(input()).unwrap();

        assert_eq!(attrs.status, domain::property::Status::Available);
        assert_eq!(attrs.description.as_str(), "");
        assert_eq!(attrs.bedrooms, Some(2));
        assert_eq!(attrs.area_sqft, Some(900));
        assert!(attrs.features.is_empty());
        assert!(attrs.portal_listings.is_empty());
    }

    #[test]
    fn rejects_invalid_numbers() {
        let err = command::property::Attributes::try_from(Input {
            latitude: Some(91.0),
            ..input()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "`Property` coordinates are out of range");

        assert!(command::property::Attributes::try_from(Input {
            bedrooms: Some(-1),
            ..input()
        })
        .is_err());
    }

    #[test]
    fn mirrors_domain_status() {
        assert_eq!(
            Status::from(domain::property::Status::UnderContract),
            Status::UnderContract,
        );
        assert_eq!(
            domain::property::Status::from(Status::OffMarket),
            domain::property::Status::OffMarket,
        );
    }
}
