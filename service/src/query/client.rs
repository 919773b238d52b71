//! [`Query`] collection related to [`Client`] entities.

use common::operations::By;

use crate::{
    domain::{client, Client},
    read, view,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Client`] by its [`client::Id`].
pub type ById = DatabaseQuery<By<Option<Client>, client::Id>>;

/// Queries a list of [`Client`] entities matching a
/// [`view::filter::ClientFilter`].
pub type Search = super::Search<
    Client,
    read::client::list::Filter,
    Option<read::client::list::Sort>,
    view::filter::ClientFilter,
>;
