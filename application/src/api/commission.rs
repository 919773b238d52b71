//! [`Commission`]-related definitions.

use common::{Date, DateTime, Handler as _, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::{command, domain, query, view};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A fee earned by the agency from a closed deal.
#[derive(Clone, Debug, From)]
pub struct Commission(domain::Commission);

/// A fee earned by the agency from a closed deal.
#[graphql_object(context = Context)]
impl Commission {
    /// Unique identifier of this `Commission`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Property` the deal was made upon.
    ///
    /// `null` if not specified, or the `Property` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Commission.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        let Some(id) = self.0.property_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::property::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }

    /// `Client` the deal was made with.
    ///
    /// `null` if not specified, or the `Client` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Commission.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        let Some(id) = self.0.client_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::client::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Kind of the deal.
    pub fn deal(&self) -> DealKind {
        self.0.deal.into()
    }

    /// Value of the deal.
    pub fn deal_value(&self) -> Money {
        self.0.deal_value
    }

    /// Rate of this `Commission`.
    pub fn rate(&self) -> Percent {
        self.0.rate
    }

    /// Amount of this `Commission`, being the deal value multiplied by the
    /// rate.
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Label of the amount of this `Commission` (`$15,000`).
    pub fn amount_label(&self) -> String {
        view::format::format_currency(self.0.amount)
    }

    /// Payment status of this `Commission`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `Date` the deal was closed on, if it was.
    pub fn closing_date(&self) -> Option<Date> {
        self.0.closing_date
    }

    /// `Date` this `Commission` was paid on, if it was.
    pub fn payment_date(&self) -> Option<Date> {
        self.0.payment_date
    }

    /// Free-form notes about this `Commission`.
    pub fn notes(&self) -> Notes {
        self.0.notes.clone().into()
    }

    /// `DateTime` when this `Commission` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Aggregated statistics of `Commission`s.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "CommissionStats")]
pub struct Stats {
    /// Total amount of all the `Commission`s.
    pub total: Money,

    /// Number of all the `Commission`s.
    pub count: i32,

    /// Amount of the `PAID` `Commission`s.
    pub paid: Money,

    /// Number of the `PAID` `Commission`s.
    pub paid_count: i32,

    /// Amount of the `PENDING` `Commission`s.
    pub pending: Money,

    /// Number of the `PENDING` `Commission`s.
    pub pending_count: i32,

    /// Amount of the `Commission`s closed in the current month.
    pub monthly: Money,
}

impl From<view::commission::Stats> for Stats {
    fn from(stats: view::commission::Stats) -> Self {
        let view::commission::Stats {
            total,
            count,
            paid,
            paid_count,
            pending,
            pending_count,
            monthly,
        } = stats;
        Self {
            total,
            count: api::count(count),
            paid,
            paid_count: api::count(paid_count),
            pending,
            pending_count: api::count(pending_count),
            monthly,
        }
    }
}

/// Details of a new `Commission`.
///
/// Omitted deal details are taken from the `Property` the deal was made
/// upon.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CreateCommissionInput")]
pub struct CreateInput {
    /// ID of the `Property` the deal was made upon.
    pub property_id: Option<api::property::Id>,

    /// ID of the `Client` the deal was made with. The `Property` owner, if
    /// omitted.
    pub client_id: Option<api::client::Id>,

    /// Kind of the deal. Follows the `Property` listing, if omitted.
    pub deal: Option<DealKind>,

    /// Value of the deal. The `Property` price, if omitted.
    pub deal_value: Option<Money>,

    /// Rate of the `Commission`. The `Property` commission rate or 3%, if
    /// omitted.
    pub rate: Option<Percent>,

    /// Payment status. `PENDING`, if omitted.
    pub status: Option<Status>,

    /// `Date` the deal was closed on.
    pub closing_date: Option<Date>,

    /// `Date` the `Commission` was paid on.
    pub payment_date: Option<Date>,

    /// Free-form notes. Empty, if omitted.
    pub notes: Option<Notes>,
}

impl From<CreateInput> for command::CreateCommission {
    fn from(input: CreateInput) -> Self {
        let CreateInput {
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            status,
            closing_date,
            payment_date,
            notes,
        } = input;
        Self {
            property_id: property_id.map(Into::into),
            client_id: client_id.map(Into::into),
            deal: deal.map(Into::into),
            deal_value,
            rate,
            status: status
                .map_or(domain::commission::Status::Pending, Into::into),
            closing_date,
            payment_date,
            notes: notes.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Attributes of an existing `Commission` to be updated with.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CommissionInput")]
pub struct Input {
    /// ID of the `Property` the deal was made upon.
    pub property_id: Option<api::property::Id>,

    /// ID of the `Client` the deal was made with.
    pub client_id: Option<api::client::Id>,

    /// Kind of the deal.
    pub deal: DealKind,

    /// Value of the deal.
    pub deal_value: Money,

    /// Rate of the `Commission`.
    pub rate: Percent,

    /// Payment status.
    pub status: Status,

    /// `Date` the deal was closed on.
    pub closing_date: Option<Date>,

    /// `Date` the `Commission` was paid on.
    pub payment_date: Option<Date>,

    /// Free-form notes. Empty, if omitted.
    pub notes: Option<Notes>,
}

impl From<Input> for command::commission::Attributes {
    fn from(input: Input) -> Self {
        let Input {
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            status,
            closing_date,
            payment_date,
            notes,
        } = input;
        Self {
            property_id: property_id.map(Into::into),
            client_id: client_id.map(Into::into),
            deal: deal.into(),
            deal_value,
            rate,
            status: status.into(),
            closing_date,
            payment_date,
            notes: notes.map(Into::into).unwrap_or_default(),
        }
    }
}

impl AsError for command::commission::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CommissionNotExists(_) => {
                Some(CommissionError::NotExists.into())
            }
            Self::DealValueUnknown => {
                Some(CommissionError::DealValueUnknown.into())
            }
        }
    }
}

define_error! {
    enum CommissionError {
        #[code = "COMMISSION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Commission` with the specified ID does not exist"]
        NotExists,

        #[code = "DEAL_VALUE_UNKNOWN"]
        #[status = BAD_REQUEST]
        #[message = "Deal value is neither specified nor can be taken \
                     from the `Property`"]
        DealValueUnknown,
    }
}

/// Unique identifier of a `Commission`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::commission::Id)]
#[into(domain::commission::Id)]
#[graphql(name = "CommissionId", transparent)]
pub struct Id(Uuid);

/// Free-form notes about a `Commission`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CommissionNotes",
    with = scalar::Via::<domain::commission::Notes>,
)]
pub struct Notes(domain::commission::Notes);

mirror_kind! {
    #[doc = "Kind of a deal a `Commission` is earned from."]
    #[graphql(name = "DealKind")]
    enum DealKind = domain::commission::DealKind {
        #[doc = "Sale of a property."]
        Sale,
        #[doc = "Rental of a property."]
        Rental,
    }
}

mirror_kind! {
    #[doc = "Payment status of a `Commission`."]
    #[graphql(name = "CommissionStatus")]
    enum Status = domain::commission::Status {
        #[doc = "Not paid yet."]
        Pending,
        #[doc = "Paid in full."]
        Paid,
        #[doc = "Paid partially."]
        PartiallyPaid,
    }
}

mirror_kind! {
    #[doc = "Period of `Commission`s closing dates."]
    #[graphql(name = "CommissionPeriod")]
    enum Period = view::filter::Period {
        #[doc = "Any closing date."]
        All,
        #[doc = "Closed in the current month."]
        Month,
        #[doc = "Closed in the current year."]
        Year,
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::{command, domain, view};

    use crate::AsError as _;

    use super::{CreateInput, Stats};

    #[test]
    fn leaves_deal_details_for_prefill() {
        let cmd = command::CreateCommission::from(CreateInput {
            property_id: None,
            client_id: None,
            deal: None,
            deal_value: None,
            rate: None,
            status: None,
            closing_date: None,
            payment_date: None,
            notes: None,
        });

        assert!(cmd.deal.is_none());
        assert!(cmd.deal_value.is_none());
        assert!(cmd.rate.is_none());
        assert_eq!(cmd.status, domain::commission::Status::Pending);
    }

    #[test]
    fn maps_unknown_deal_value() {
        let err = command::commission::ExecutionError::DealValueUnknown
            .as_error();

        assert_eq!(err.code, "DEAL_VALUE_UNKNOWN");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn converts_stats() {
        let stats = Stats::from(view::commission::Stats {
            total: "15000".parse().unwrap(),
            count: 2,
            paid: "10000".parse().unwrap(),
            paid_count: 1,
            pending: "5000".parse().unwrap(),
            pending_count: 1,
            monthly: Money::ZERO,
        });

        assert_eq!(stats.count, 2);
        assert_eq!(stats.paid_count, 1);
        assert_eq!(stats.total.to_string(), "15000");
    }
}
