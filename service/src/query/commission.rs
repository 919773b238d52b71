//! [`Query`] collection related to [`Commission`] entities.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{commission, Commission},
    infra::{database, Database},
    read, view, Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`Commission`] by its [`commission::Id`].
pub type ById = DatabaseQuery<By<Option<Commission>, commission::Id>>;

/// Queries a list of [`Commission`] entities matching a
/// [`view::filter::CommissionFilter`].
pub type Search = super::Search<
    Commission,
    read::commission::list::Filter,
    Option<read::commission::list::Sort>,
    view::filter::CommissionFilter,
>;

/// Queries [`view::commission::Stats`] of all the [`Commission`] entities.
#[derive(Clone, Copy, Debug)]
pub struct Stats;

impl<Db> Query<Stats> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Commission>, read::commission::list::Selector>>,
        Ok = Vec<Commission>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = view::commission::Stats;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Stats) -> Result<Self::Ok, Self::Err> {
        let commissions = self
            .database()
            .execute(Select(By::<Vec<Commission>, _>::new(
                read::commission::list::Selector::default(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(view::commission::Stats::of(
            &commissions,
            self.clock().today(),
        ))
    }
}
