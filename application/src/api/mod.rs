//! GraphQL API definitions.

/// Defines a GraphQL enum mirroring the provided domain kind, along with
/// conversions between them.
macro_rules! mirror_kind {
    (
        #[doc = $doc:literal]
        #[graphql(name = $gql:literal)]
        enum $name:ident = $domain:ty {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(Clone, Copy, Debug, Eq, ::juniper::GraphQLEnum, PartialEq)]
        #[doc = $doc]
        #[graphql(name = $gql)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                $variant,
            )*
        }

        impl From<$domain> for $name {
            fn from(kind: $domain) -> Self {
                type Domain = $domain;
                match kind {
                    $( Domain::$variant => Self::$variant, )*
                }
            }
        }

        impl From<$name> for $domain {
            fn from(kind: $name) -> Self {
                match kind {
                    $( $name::$variant => Self::$variant, )*
                }
            }
        }
    };
}

pub mod client;
pub mod commission;
pub mod dashboard;
pub mod interaction;
pub mod map;
mod mutation;
pub mod property;
mod query;
pub mod reminder;
pub mod scalar;
mod subscription;

use std::str::FromStr;

use service::command::delete_entity;

use crate::{define_error, AsError, Error};

pub use self::{
    client::Client, commission::Commission, interaction::Interaction,
    mutation::Mutation, property::Property, query::Query,
    reminder::Reminder, subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// Converts the `limit` argument of a GraphQL list into a
/// [`common::list::Limit`].
///
/// Negative values are rejected and values above the
/// [`common::list::Limit::MAX`] are clamped.
fn list_limit(
    limit: Option<i32>,
) -> Result<Option<common::list::Limit>, Error> {
    limit
        .map(common::list::Limit::try_from)
        .transpose()
        .map_err(|_| ListError::NegativeLimit.into())
}

/// Parses the `sort` argument of a GraphQL list into a
/// [`common::list::Sort`] by a field `F`.
fn list_sort<F: FromStr>(
    sort: Option<String>,
) -> Result<Option<common::list::Sort<F>>, Error> {
    sort.as_deref()
        .map(str::parse)
        .transpose()
        .map_err(AsError::into_error)
}

/// Converts the provided number of entities into a GraphQL `Int`,
/// saturating at [`i32::MAX`].
fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

define_error! {
    enum ListError {
        #[code = "NEGATIVE_LIMIT"]
        #[status = BAD_REQUEST]
        #[message = "List `limit` must not be negative"]
        NegativeLimit,
    }
}

impl AsError for delete_entity::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists { kind, .. } => Some(Error {
                code: match kind {
                    service::Invalidation::Property => "PROPERTY_NOT_EXISTS",
                    service::Invalidation::Client => "CLIENT_NOT_EXISTS",
                    service::Invalidation::Commission => {
                        "COMMISSION_NOT_EXISTS"
                    }
                    service::Invalidation::Interaction => {
                        "INTERACTION_NOT_EXISTS"
                    }
                    service::Invalidation::Reminder => "REMINDER_NOT_EXISTS",
                },
                status_code: http::StatusCode::NOT_FOUND,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command::delete_entity::ExecutionError, Invalidation};

    use crate::AsError as _;

    use super::{list_limit, list_sort};

    #[test]
    fn limits_lists() {
        assert_eq!(list_limit(None).unwrap(), None);
        assert_eq!(list_limit(Some(5)).unwrap().unwrap().get(), 5);
        assert_eq!(list_limit(Some(5000)).unwrap().unwrap().get(), 1000);
        assert_eq!(list_limit(Some(70_000)).unwrap().unwrap().get(), 1000);
        assert_eq!(
            list_limit(Some(-1)).unwrap_err().code,
            "NEGATIVE_LIMIT",
        );
    }

    #[test]
    fn parses_list_sort() {
        use service::read::reminder::list::SortField;

        let sort = list_sort::<SortField>(Some("-due_date".to_owned()))
            .unwrap()
            .unwrap();
        assert_eq!(sort.field, SortField::DueAt);
        assert_eq!(sort.order, common::list::Order::Desc);

        assert!(list_sort::<SortField>(None).unwrap().is_none());
        assert_eq!(
            list_sort::<SortField>(Some("deadline".to_owned()))
                .unwrap_err()
                .code,
            "INVALID_SORT_KEY",
        );
    }

    #[test]
    fn maps_missing_entity_to_not_found() {
        let err = ExecutionError::NotExists {
            kind: Invalidation::Reminder,
            id: "42".to_owned(),
        }
        .as_error();

        assert_eq!(err.code, "REMINDER_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(err.message, "`reminder(id: 42)` does not exist");
    }
}
