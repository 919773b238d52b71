//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, view, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Searches `Property`s.
    ///
    /// `search` is matched case-insensitively against the title, address and
    /// city of a `Property`. `sort` is a field name (`created_at`, `price`,
    /// `title`, `contract_end_date`), optionally prefixed with `-` for the
    /// descending order. Newest `Property`s go first by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SORT_KEY` - the `sort` field is unknown;
    /// - `NEGATIVE_LIMIT` - the `limit` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "properties",
            kind = ?kind,
            limit = ?limit,
            listing = ?listing,
            otel.name = Self::SPAN_NAME,
            search = ?search,
            sort = ?sort,
            status = ?status,
        ),
    )]
    pub async fn properties(
        search: Option<String>,
        kind: Option<api::property::Kind>,
        status: Option<api::property::Status>,
        listing: Option<api::property::ListingKind>,
        sort: Option<String>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        let selector = read::property::list::Selector {
            filter: read::property::list::Filter {
                status: status.map(Into::into),
                ..read::property::list::Filter::default()
            },
            sort: api::list_sort(sort).map_err(ctx.error())?,
            limit: api::list_limit(limit).map_err(ctx.error())?,
        };
        ctx.service()
            .execute(query::property::Search::new(
                selector,
                view::filter::PropertyFilter {
                    search: view::Search::new(search.unwrap_or_default()),
                    kind: kind.map(Into::into),
                    status: status.map(Into::into),
                    listing: listing.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "property",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Into::into)
            .ok_or_else(|| api::property::PropertyError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Searches `Client`s.
    ///
    /// `search` is matched case-insensitively against the name, email and
    /// phone of a `Client`. `sort` is a field name (`created_at`, `name`),
    /// optionally prefixed with `-` for the descending order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SORT_KEY` - the `sort` field is unknown;
    /// - `NEGATIVE_LIMIT` - the `limit` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clients",
            kind = ?kind,
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
            search = ?search,
            sort = ?sort,
            status = ?status,
        ),
    )]
    pub async fn clients(
        search: Option<String>,
        kind: Option<api::client::Kind>,
        status: Option<api::client::Status>,
        sort: Option<String>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Client>, Error> {
        let selector = read::client::list::Selector {
            filter: read::client::list::Filter {
                status: status.map(Into::into),
            },
            sort: api::list_sort(sort).map_err(ctx.error())?,
            limit: api::list_limit(limit).map_err(ctx.error())?,
        };
        ctx.service()
            .execute(query::client::Search::new(
                selector,
                view::filter::ClientFilter {
                    search: view::Search::new(search.unwrap_or_default()),
                    kind: kind.map(Into::into),
                    status: status.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Client` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - the `Client` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "client",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn client(
        id: api::client::Id,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        ctx.service()
            .execute(query::client::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Into::into)
            .ok_or_else(|| api::client::ClientError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Lists `Commission`s.
    ///
    /// `period` restricts the closing dates to the current month or year,
    /// while `Commission`s without a closing date always match. `sort` is a
    /// field name (`created_at`, `closing_date`, `deal_value`), optionally
    /// prefixed with `-` for the descending order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SORT_KEY` - the `sort` field is unknown;
    /// - `NEGATIVE_LIMIT` - the `limit` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "commissions",
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
            period = ?period,
            sort = ?sort,
            status = ?status,
        ),
    )]
    pub async fn commissions(
        status: Option<api::commission::Status>,
        period: Option<api::commission::Period>,
        property_id: Option<api::property::Id>,
        client_id: Option<api::client::Id>,
        sort: Option<String>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Commission>, Error> {
        let selector = read::commission::list::Selector {
            filter: read::commission::list::Filter {
                property_id: property_id.map(Into::into),
                client_id: client_id.map(Into::into),
            },
            sort: api::list_sort(sort).map_err(ctx.error())?,
            limit: api::list_limit(limit).map_err(ctx.error())?,
        };
        ctx.service()
            .execute(query::commission::Search::new(
                selector,
                view::filter::CommissionFilter {
                    status: status.map(Into::into),
                    period: period.map(Into::into).unwrap_or_default(),
                    today: ctx.service().clock().today(),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Commission` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMMISSION_NOT_EXISTS` - the `Commission` with the specified ID
    ///                             does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "commission",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn commission(
        id: api::commission::Id,
        ctx: &Context,
    ) -> Result<api::Commission, Error> {
        ctx.service()
            .execute(query::commission::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Into::into)
            .ok_or_else(|| api::commission::CommissionError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Calculates the `CommissionStats` of all the `Commission`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "commissionStats",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn commission_stats(
        ctx: &Context,
    ) -> Result<api::commission::Stats, Error> {
        ctx.service()
            .execute(query::commission::Stats)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists `Interaction`s, optionally of the specified `Client` or
    /// `Property`.
    ///
    /// `sort` is a field name (`created_at`, `date`), optionally
    /// prefixed with `-` for the descending order. Newest `Interaction`s go
    /// first by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SORT_KEY` - the `sort` field is unknown;
    /// - `NEGATIVE_LIMIT` - the `limit` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            client_id = ?client_id.map(|id| id.to_string()),
            gql.name = "interactions",
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
            property_id = ?property_id.map(|id| id.to_string()),
            sort = ?sort,
        ),
    )]
    pub async fn interactions(
        client_id: Option<api::client::Id>,
        property_id: Option<api::property::Id>,
        sort: Option<String>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Interaction>, Error> {
        ctx.service()
            .execute(query::interaction::List::by(
                read::interaction::list::Selector {
                    filter: read::interaction::list::Filter {
                        client_id: client_id.map(Into::into),
                        property_id: property_id.map(Into::into),
                    },
                    sort: api::list_sort(sort).map_err(ctx.error())?,
                    limit: api::list_limit(limit).map_err(ctx.error())?,
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|is| is.into_iter().map(Into::into).collect())
    }

    /// Lists `Reminder`s.
    ///
    /// `sort` is a field name (`due_date`, `created_at`), optionally prefixed
    /// with `-` for the descending order. Earliest due `Reminder`s go first
    /// by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_SORT_KEY` - the `sort` field is unknown;
    /// - `NEGATIVE_LIMIT` - the `limit` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reminders",
            kind = ?kind,
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
            sort = ?sort,
            status = ?status,
        ),
    )]
    pub async fn reminders(
        status: Option<api::reminder::Status>,
        kind: Option<api::reminder::Kind>,
        client_id: Option<api::client::Id>,
        property_id: Option<api::property::Id>,
        sort: Option<String>,
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Reminder>, Error> {
        let selector = read::reminder::list::Selector {
            filter: read::reminder::list::Filter {
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                client_id: client_id.map(Into::into),
                property_id: property_id.map(Into::into),
            },
            sort: api::list_sort(sort).map_err(ctx.error())?,
            limit: api::list_limit(limit).map_err(ctx.error())?,
        };
        ctx.service()
            .execute(query::reminder::Search::new(
                selector,
                view::filter::ReminderFilter {
                    status: status.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rs| rs.into_iter().map(Into::into).collect())
    }

    /// Groups `Reminder`s into the `ReminderAgenda`, optionally of the
    /// specified `Client` or `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            client_id = ?client_id.map(|id| id.to_string()),
            gql.name = "reminderAgenda",
            otel.name = Self::SPAN_NAME,
            property_id = ?property_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn reminder_agenda(
        client_id: Option<api::client::Id>,
        property_id: Option<api::property::Id>,
        ctx: &Context,
    ) -> Result<api::reminder::Agenda, Error> {
        ctx.service()
            .execute(query::reminder::Agenda(read::reminder::list::Filter {
                client_id: client_id.map(Into::into),
                property_id: property_id.map(Into::into),
                ..read::reminder::list::Filter::default()
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Counts `PENDING` `Reminder`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reminderStats",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reminder_stats(
        ctx: &Context,
    ) -> Result<api::reminder::Stats, Error> {
        ctx.service()
            .execute(query::reminder::Stats)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists `Property`s whose agency contract ends within the next 30
    /// days, soonest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "contractAlerts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn contract_alerts(
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        ctx.service()
            .execute(query::property::ContractAlerts)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// Composes the `Dashboard` of the agency.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "dashboard",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dashboard(
        ctx: &Context,
    ) -> Result<api::dashboard::Dashboard, Error> {
        ctx.service()
            .execute(query::dashboard::Dashboard)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Places `Property`s having coordinates on a `PropertyMap`.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "map",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn map(
        filter: Option<api::map::Filter>,
        ctx: &Context,
    ) -> Result<api::map::Map, Error> {
        ctx.service()
            .execute(query::property::Map(
                filter.unwrap_or_default().into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
