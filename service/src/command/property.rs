//! [`Command`]s for creating and updating a [`Property`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date, DateTime, Money, Percent,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, property, Property},
    infra::{database, Database},
    Invalidation, Service,
};

use super::Command;

/// Editable attributes of a [`Property`].
#[derive(Clone, Debug)]
pub struct Attributes {
    /// [`property::Title`] of the [`Property`].
    pub title: property::Title,

    /// [`property::Description`] of the [`Property`].
    pub description: property::Description,

    /// [`property::Address`] of the [`Property`].
    pub address: property::Address,

    /// [`property::City`] of the [`Property`].
    pub city: property::City,

    /// [`property::ZipCode`] of the [`Property`], if any.
    pub zip_code: Option<property::ZipCode>,

    /// [`property::Kind`] of the [`Property`].
    pub kind: property::Kind,

    /// [`property::ListingKind`] of the [`Property`].
    pub listing: property::ListingKind,

    /// [`property::Status`] of the [`Property`].
    pub status: property::Status,

    /// Asking price of the [`Property`].
    pub price: Money,

    /// Number of bedrooms, if known.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms, if known.
    pub bathrooms: Option<u16>,

    /// Area in square feet, if known.
    pub area_sqft: Option<u32>,

    /// [`property::Feature`]s of the [`Property`].
    pub features: Vec<property::Feature>,

    /// [`property::ImageUrl`]s of the [`Property`].
    pub images: Vec<property::ImageUrl>,

    /// [`property::Latitude`] of the [`Property`], if known.
    pub latitude: Option<property::Latitude>,

    /// [`property::Longitude`] of the [`Property`], if known.
    pub longitude: Option<property::Longitude>,

    /// ID of the [`Client`] owning the [`Property`], if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub owner_id: Option<client::Id>,

    /// Agreed commission rate, if any.
    pub commission_rate: Option<Percent>,

    /// [`Date`] the agency contract ends on, if any.
    pub contract_end_date: Option<Date>,

    /// [`property::PortalListing`]s of the [`Property`].
    pub portal_listings: Vec<property::PortalListing>,
}

impl Attributes {
    /// Builds a [`Property`] with these [`Attributes`].
    fn into_property(
        self,
        id: property::Id,
        created_at: property::CreationDateTime,
    ) -> Property {
        let Self {
            title,
            description,
            address,
            city,
            zip_code,
            kind,
            listing,
            status,
            price,
            bedrooms,
            bathrooms,
            area_sqft,
            features,
            images,
            latitude,
            longitude,
            owner_id,
            commission_rate,
            contract_end_date,
            portal_listings,
        } = self;
        Property {
            id,
            title,
            description,
            address,
            city,
            zip_code,
            kind,
            listing,
            status,
            price,
            bedrooms,
            bathrooms,
            area_sqft,
            features,
            images,
            latitude,
            longitude,
            owner_id,
            commission_rate,
            contract_end_date,
            portal_listings,
            created_at,
        }
    }
}

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug, From)]
pub struct CreateProperty(pub Attributes);

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        CreateProperty(attrs): CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let property = attrs
            .into_property(property::Id::new(), DateTime::now().coerce());

        // Portal listings are stored in a separate table.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;
        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.invalidate(Invalidation::Property);
        Ok(property)
    }
}

/// [`Command`] for overwriting [`Attributes`] of an existing [`Property`].
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to be updated.
    pub id: property::Id,

    /// New [`Attributes`] of the [`Property`].
    pub attributes: Attributes,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty { id, attributes } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::<Property, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(id))
            .map_err(tracerr::wrap!())?;

        let property = attributes.into_property(id, existing.created_at);
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Property);
        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::sync::{Arc, Mutex};

    use common::{
        datetime::UtcOffset,
        operations::{Commit, Insert, Transact},
    };
    use tokio::sync::broadcast::{self, error::TryRecvError};
    use tracerr::Traced;

    use crate::{
        domain::Property,
        infra::{database, postgres, Database},
        task::schedule_contract_renewals,
        view::fixture,
        Config, Invalidation, Service,
    };

    use super::{Attributes, CreateProperty};

    /// In-memory [`Database`] journaling the executed operations.
    #[derive(Clone, Debug, Default)]
    struct Journal {
        ops: Arc<Mutex<Vec<&'static str>>>,
        fail_insert: bool,
    }

    /// Transaction opened on a [`Journal`].
    #[derive(Debug)]
    struct JournalTx(Journal);

    impl Journal {
        fn record(&self, op: &'static str) {
            self.ops.lock().unwrap().push(op);
        }

        fn ops(&self) -> Vec<&'static str> {
            self.ops.lock().unwrap().clone()
        }
    }

    impl Database<Transact> for Journal {
        type Ok = JournalTx;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            self.record("transact");
            Ok(JournalTx(self.clone()))
        }
    }

    impl Database<Insert<Property>> for JournalTx {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Insert<Property>,
        ) -> Result<Self::Ok, Self::Err> {
            self.0.record("insert");
            if self.0.fail_insert {
                let e = postgres::Error::from(
                    deadpool_postgres::PoolError::Closed,
                );
                return Err(tracerr::new!(database::Error::from(e)));
            }
            Ok(())
        }
    }

    impl Database<Commit> for JournalTx {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            self.0.record("commit");
            Ok(())
        }
    }

    fn service(database: Journal) -> Service<Journal> {
        let (invalidations, _) = broadcast::channel(4);
        Service {
            config: Config {
                utc_offset: UtcOffset::UTC,
                invalidations_capacity: 4,
                schedule_contract_renewals:
                    schedule_contract_renewals::Config::default(),
            },
            database,
            invalidations,
        }
    }

    fn attributes() -> Attributes {
        let p = fixture::property("Cottage");
        Attributes {
            title: p.title,
            description: p.description,
            address: p.address,
            city: p.city,
            zip_code: p.zip_code,
            kind: p.kind,
            listing: p.listing,
            status: p.status,
            price: p.price,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area_sqft: p.area_sqft,
            features: p.features,
            images: p.images,
            latitude: p.latitude,
            longitude: p.longitude,
            owner_id: p.owner_id,
            commission_rate: p.commission_rate,
            contract_end_date: p.contract_end_date,
            portal_listings: p.portal_listings,
        }
    }

    #[tokio::test]
    async fn creates_property_in_transaction() {
        let db = Journal::default();
        let service = service(db.clone());
        let mut rx = service.subscribe();

        let created = service
            .execute(CreateProperty(attributes()))
            .await
            .unwrap();

        assert_eq!(created.title.as_str(), "Cottage");
        assert_eq!(db.ops(), ["transact", "insert", "commit"]);
        assert_eq!(rx.try_recv().unwrap(), Invalidation::Property);
    }

    #[tokio::test]
    async fn failed_insert_is_not_committed() {
        let db = Journal {
            fail_insert: true,
            ..Journal::default()
        };
        let service = service(db.clone());
        let mut rx = service.subscribe();

        let res = service.execute(CreateProperty(attributes())).await;

        assert!(res.is_err());
        assert_eq!(db.ops(), ["transact", "insert"]);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }
}
