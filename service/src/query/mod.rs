//! [`Query`] definition.

pub mod client;
pub mod commission;
pub mod dashboard;
pub mod interaction;
pub mod property;
pub mod reminder;

use std::marker::PhantomData;

use common::{
    list::Selector,
    operations::{By, Select},
};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    view::Filter,
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] [`Select`]ing an ordered list of `T` entities from a
/// [`Database`] and retaining only the ones matching a view [`Filter`].
///
/// The [`Selector::limit`] is applied after the view [`Filter`].
#[derive(Clone, Debug)]
pub struct Search<T, F, S, VF> {
    /// [`Selector`] of the entities in a [`Database`].
    selector: Selector<F, S>,

    /// View [`Filter`] of the selected entities.
    filter: VF,

    /// Type of the searched entities.
    _entity: PhantomData<fn() -> T>,
}

impl<T, F, S, VF> Search<T, F, S, VF> {
    /// Creates a new [`Search`] with the provided [`Selector`] and view
    /// [`Filter`].
    #[must_use]
    pub fn new(selector: Selector<F, S>, filter: VF) -> Self {
        Self {
            selector,
            filter,
            _entity: PhantomData,
        }
    }
}

impl<Db, T, F, S, VF> Query<Search<T, F, S, VF>> for Service<Db>
where
    Db: Database<
        Select<By<Vec<T>, Selector<F, S>>>,
        Ok = Vec<T>,
        Err = Traced<database::Error>,
    >,
    VF: Filter<T>,
{
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        query: Search<T, F, S, VF>,
    ) -> Result<Self::Ok, Self::Err> {
        let Search {
            mut selector,
            filter,
            ..
        } = query;
        let limit = selector.limit.take();

        let mut found = filter.apply(
            self.database()
                .execute(Select(By::<Vec<T>, _>::new(selector)))
                .await
                .map_err(tracerr::wrap!())?,
        );
        if let Some(limit) = limit {
            found.truncate(limit.get());
        }
        Ok(found)
    }
}
