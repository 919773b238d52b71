//! [`Dashboard`] [`Query`].

use common::operations::{By, Select};
use futures::try_join;
use tracerr::Traced;

use crate::{
    domain::{Client, Commission, Interaction, Property, Reminder},
    infra::{database, Database},
    read, view, Service,
};

use super::Query;

/// Queries a [`view::Overview`] of the whole agency.
#[derive(Clone, Copy, Debug)]
pub struct Dashboard;

impl<Db> Query<Dashboard> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Property>, read::property::list::Selector>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Client>, read::client::list::Selector>>,
            Ok = Vec<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Commission>, read::commission::list::Selector>>,
            Ok = Vec<Commission>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reminder>, read::reminder::list::Selector>>,
            Ok = Vec<Reminder>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Interaction>, read::interaction::list::Selector>>,
            Ok = Vec<Interaction>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = view::Overview;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Dashboard) -> Result<Self::Ok, Self::Err> {
        let db = self.database();
        let (properties, clients, commissions, reminders, interactions) =
            try_join!(
                db.execute(Select(By::<Vec<Property>, _>::new(
                    read::property::list::Selector::default(),
                ))),
                db.execute(Select(By::<Vec<Client>, _>::new(
                    read::client::list::Selector::default(),
                ))),
                db.execute(Select(By::<Vec<Commission>, _>::new(
                    read::commission::list::Selector::default(),
                ))),
                db.execute(Select(By::<Vec<Reminder>, _>::new(
                    read::reminder::list::Selector::default(),
                ))),
                db.execute(Select(By::<Vec<Interaction>, _>::new(
                    read::interaction::list::Selector::default(),
                ))),
            )
            .map_err(tracerr::wrap!())?;

        Ok(view::Overview::compose(
            properties,
            &clients,
            &commissions,
            reminders,
            interactions,
            &self.clock(),
        ))
    }
}
