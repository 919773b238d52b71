//! [`Query`] collection related to [`Reminder`] entities.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{reminder, Reminder},
    infra::{database, Database},
    read, view, Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`Reminder`] by its [`reminder::Id`].
pub type ById = DatabaseQuery<By<Option<Reminder>, reminder::Id>>;

/// Queries a list of [`Reminder`] entities matching a
/// [`view::filter::ReminderFilter`].
pub type Search = super::Search<
    Reminder,
    read::reminder::list::Filter,
    Option<read::reminder::list::Sort>,
    view::filter::ReminderFilter,
>;

/// Queries a [`view::Agenda`] of the [`Reminder`]s matching the
/// [`read::reminder::list::Filter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Agenda(pub read::reminder::list::Filter);

impl<Db> Query<Agenda> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Reminder>, read::reminder::list::Selector>>,
        Ok = Vec<Reminder>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = view::Agenda;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Agenda(filter): Agenda,
    ) -> Result<Self::Ok, Self::Err> {
        let reminders = self
            .database()
            .execute(Select(By::<Vec<Reminder>, _>::new(
                read::reminder::list::Selector {
                    filter,
                    sort: Some(read::reminder::list::Sort::asc(
                        read::reminder::list::SortField::DueAt,
                    )),
                    limit: None,
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(view::Agenda::of(reminders, &self.clock()))
    }
}

/// Queries [`view::reminder::Stats`] of all the [`Reminder`] entities.
#[derive(Clone, Copy, Debug)]
pub struct Stats;

impl<Db> Query<Stats> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Reminder>, read::reminder::list::Selector>>,
        Ok = Vec<Reminder>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = view::reminder::Stats;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Stats) -> Result<Self::Ok, Self::Err> {
        let reminders = self
            .database()
            .execute(Select(By::<Vec<Reminder>, _>::new(
                read::reminder::list::Selector {
                    filter: read::reminder::list::Filter {
                        status: Some(reminder::Status::Pending),
                        ..read::reminder::list::Filter::default()
                    },
                    ..read::reminder::list::Selector::default()
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(view::reminder::Stats::of(&reminders, &self.clock()))
    }
}
