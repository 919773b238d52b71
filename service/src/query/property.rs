//! [`Query`] collection related to [`Property`] entities.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    read, view, Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries a list of [`Property`] entities matching a
/// [`view::filter::PropertyFilter`].
pub type Search = super::Search<
    Property,
    read::property::list::Filter,
    Option<read::property::list::Sort>,
    view::filter::PropertyFilter,
>;

/// Queries [`Property`] entities needing a contract renewal.
#[derive(Clone, Copy, Debug)]
pub struct ContractAlerts;

impl<Db> Query<ContractAlerts> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Property>, read::property::list::Selector>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: ContractAlerts) -> Result<Self::Ok, Self::Err> {
        let today = self.clock().today();
        let properties = self
            .database()
            .execute(Select(By::<Vec<Property>, _>::new(
                read::property::list::Selector {
                    filter: read::property::list::Filter {
                        contract_ends_within: Some((
                            today,
                            today.add_days(view::property::CONTRACT_ALERT_DAYS),
                        )),
                        ..read::property::list::Filter::default()
                    },
                    ..read::property::list::Selector::default()
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(view::property::contract_alerts(properties, today))
    }
}

/// Queries a [`view::Map`] of [`Property`] entities matching a
/// [`view::map::MapFilter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Map(pub view::map::MapFilter);

impl<Db> Query<Map> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Property>, read::property::list::Selector>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = view::Map;
    type Err = Traced<database::Error>;

    async fn execute(&self, Map(filter): Map) -> Result<Self::Ok, Self::Err> {
        let properties = self
            .database()
            .execute(Select(By::<Vec<Property>, _>::new(
                read::property::list::Selector {
                    filter: read::property::list::Filter {
                        status: filter.status,
                        ..read::property::list::Filter::default()
                    },
                    ..read::property::list::Selector::default()
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(view::Map::of(properties, &filter))
    }
}
