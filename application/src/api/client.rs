//! [`Client`]-related definitions.

use common::{DateTime, Handler as _, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query, read, view};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A person the agency works with.
#[derive(Clone, Debug, From)]
pub struct Client(domain::Client);

/// A person the agency works with.
#[graphql_object(context = Context)]
impl Client {
    /// Unique identifier of this `Client`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Full name of this `Client`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email address of this `Client`, if known.
    pub fn email(&self) -> Option<Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Phone number of this `Client`, if known.
    pub fn phone(&self) -> Option<Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// Kind of this `Client`.
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Status of this `Client`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Lower bound of this `Client`'s budget, if any.
    pub fn budget_min(&self) -> Option<Money> {
        self.0.budget_min
    }

    /// Upper bound of this `Client`'s budget, if any.
    pub fn budget_max(&self) -> Option<Money> {
        self.0.budget_max
    }

    /// Label of this `Client`'s budget range (`$300K - $450K`).
    ///
    /// `null` if neither of the bounds is set.
    pub fn budget_label(&self) -> Option<String> {
        view::format::format_budget(self.0.budget_min, self.0.budget_max)
    }

    /// Locations this `Client` is interested in.
    pub fn preferred_locations(&self) -> Vec<Location> {
        self.0
            .preferred_locations
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    /// Kinds of `Property` this `Client` is interested in.
    pub fn preferred_property_kinds(&self) -> Vec<api::property::Kind> {
        self.0
            .preferred_property_kinds
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// Source this `Client` came from, if known.
    pub fn source(&self) -> Option<Source> {
        self.0.source.map(Into::into)
    }

    /// Free-form notes about this `Client`.
    pub fn notes(&self) -> Notes {
        self.0.notes.clone().into()
    }

    /// `Property`s owned by this `Client`, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Client.properties",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn properties(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        ctx.service()
            .execute(query::property::Search::new(
                read::property::list::Selector {
                    filter: read::property::list::Filter {
                        owner_id: Some(self.0.id),
                        ..read::property::list::Filter::default()
                    },
                    ..read::property::list::Selector::default()
                },
                view::filter::PropertyFilter::default(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// `Interaction`s logged with this `Client`, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Client.interactions",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn interactions(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Interaction>, Error> {
        ctx.service()
            .execute(query::interaction::List::by(
                read::interaction::list::Selector {
                    filter: read::interaction::list::Filter {
                        client_id: Some(self.0.id),
                        ..read::interaction::list::Filter::default()
                    },
                    ..read::interaction::list::Selector::default()
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|is| is.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Client` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Attributes of a `Client` to be created or updated with.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ClientInput")]
pub struct Input {
    /// Full name of the `Client`.
    pub name: Name,

    /// Email address of the `Client`.
    pub email: Option<Email>,

    /// Phone number of the `Client`.
    pub phone: Option<Phone>,

    /// Kind of the `Client`.
    pub kind: Kind,

    /// Status of the `Client`. `ACTIVE`, if omitted.
    pub status: Option<Status>,

    /// Lower bound of the `Client`'s budget.
    pub budget_min: Option<Money>,

    /// Upper bound of the `Client`'s budget.
    pub budget_max: Option<Money>,

    /// Locations the `Client` is interested in.
    pub preferred_locations: Option<Vec<Location>>,

    /// Kinds of `Property` the `Client` is interested in.
    pub preferred_property_kinds: Option<Vec<api::property::Kind>>,

    /// Source the `Client` came from.
    pub source: Option<Source>,

    /// Free-form notes. Empty, if omitted.
    pub notes: Option<Notes>,
}

impl From<Input> for command::client::Attributes {
    fn from(input: Input) -> Self {
        let Input {
            name,
            email,
            phone,
            kind,
            status,
            budget_min,
            budget_max,
            preferred_locations,
            preferred_property_kinds,
            source,
            notes,
        } = input;
        Self {
            name: name.into(),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            kind: kind.into(),
            status: status.map_or(domain::client::Status::Active, Into::into),
            budget_min,
            budget_max,
            preferred_locations: preferred_locations
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            preferred_property_kinds: preferred_property_kinds
                .into_iter()
                .flatten()
                .map(Into::into)
                .collect(),
            source: source.map(Into::into),
            notes: notes.map(Into::into).unwrap_or_default(),
        }
    }
}

impl AsError for command::client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(ClientError::NotExists.into()),
        }
    }
}

define_error! {
    enum ClientError {
        #[code = "CLIENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Client` with the specified ID does not exist"]
        NotExists,
    }
}

/// Unique identifier of a `Client`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::client::Id)]
#[into(domain::client::Id)]
#[graphql(name = "ClientId", transparent)]
pub struct Id(Uuid);

/// Full name of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientName", with = scalar::Via::<domain::client::Name>)]
pub struct Name(domain::client::Name);

/// Email address of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientEmail", with = scalar::Via::<domain::client::Email>)]
pub struct Email(domain::client::Email);

/// Phone number of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientPhone", with = scalar::Via::<domain::client::Phone>)]
pub struct Phone(domain::client::Phone);

/// Location a `Client` is interested in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ClientLocation",
    with = scalar::Via::<domain::client::Location>,
)]
pub struct Location(domain::client::Location);

/// Free-form notes about a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientNotes", with = scalar::Via::<domain::client::Notes>)]
pub struct Notes(domain::client::Notes);

mirror_kind! {
    #[doc = "Kind of a `Client`."]
    #[graphql(name = "ClientKind")]
    enum Kind = domain::client::Kind {
        #[doc = "Looks for a property to buy or rent."]
        Buyer,
        #[doc = "Sells or leases out a property."]
        Seller,
        #[doc = "Both a buyer and a seller."]
        Both,
    }
}

mirror_kind! {
    #[doc = "Status of a `Client`."]
    #[graphql(name = "ClientStatus")]
    enum Status = domain::client::Status {
        #[doc = "Being actively worked with."]
        Active,
        #[doc = "On hold."]
        Inactive,
        #[doc = "Closed their business with the agency."]
        Closed,
    }
}

mirror_kind! {
    #[doc = "Source a `Client` came from."]
    #[graphql(name = "ClientSource")]
    enum Source = domain::client::Source {
        #[doc = "Referred by someone."]
        Referral,
        #[doc = "Agency website."]
        Website,
        #[doc = "Listing portal."]
        Portal,
        #[doc = "Social media."]
        SocialMedia,
        #[doc = "Cold call."]
        ColdCall,
        #[doc = "Anything else."]
        Other,
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain};

    use crate::api;

    use super::{Input, Kind};

    #[test]
    fn defaults_omitted_attributes() {
        let attrs = command::client::Attributes::from(Input {
            name: domain::client::Name::new("Jane Doe").unwrap().into(),
            email: None,
            phone: None,
            kind: Kind::Buyer,
            status: None,
            budget_min: None,
            budget_max: Some("450000".parse().unwrap()),
            preferred_locations: None,
            preferred_property_kinds: Some(vec![api::property::Kind::Condo]),
            source: None,
            notes: None,
        });

        assert_eq!(attrs.status, domain::client::Status::Active);
        assert_eq!(attrs.kind, domain::client::Kind::Buyer);
        assert_eq!(
            attrs.preferred_property_kinds,
            [domain::property::Kind::Condo],
        );
        assert!(attrs.preferred_locations.is_empty());
        assert_eq!(attrs.notes.as_str(), "");
    }
}
