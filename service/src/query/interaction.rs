//! [`Query`] collection related to [`Interaction`] entities.

use common::operations::By;

use crate::{
    domain::{interaction, Interaction},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Interaction`] by its [`interaction::Id`].
pub type ById = DatabaseQuery<By<Option<Interaction>, interaction::Id>>;

/// Queries a list of [`Interaction`] entities.
pub type List =
    DatabaseQuery<By<Vec<Interaction>, read::interaction::list::Selector>>;
