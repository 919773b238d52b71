//! [`Command`]s for recording and updating a [`Commission`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date, DateTime, Money, Percent,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{client, commission, property, Commission, Property},
    infra::{database, Database},
    Invalidation, Service,
};

use super::Command;

/// Editable attributes of a [`Commission`].
///
/// [`Commission::amount`] is always derived from these.
#[derive(Clone, Debug)]
pub struct Attributes {
    /// ID of the [`Property`] the deal was made upon, if any.
    pub property_id: Option<property::Id>,

    /// ID of the [`Client`] the deal was made with, if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// [`commission::DealKind`] of the [`Commission`].
    pub deal: commission::DealKind,

    /// Value of the deal.
    pub deal_value: Money,

    /// Rate of the [`Commission`] from the deal value.
    pub rate: Percent,

    /// [`commission::Status`] of the [`Commission`].
    pub status: commission::Status,

    /// [`Date`] the deal was closed on, if it was.
    pub closing_date: Option<Date>,

    /// [`Date`] the [`Commission`] was paid on, if it was.
    pub payment_date: Option<Date>,

    /// [`commission::Notes`] about the [`Commission`].
    pub notes: commission::Notes,
}

impl Attributes {
    /// Builds a [`Commission`] with these [`Attributes`].
    fn into_commission(
        self,
        id: commission::Id,
        created_at: commission::CreationDateTime,
    ) -> Commission {
        let Self {
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            status,
            closing_date,
            payment_date,
            notes,
        } = self;
        Commission {
            id,
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            amount: Commission::amount_of(deal_value, rate),
            status,
            closing_date,
            payment_date,
            notes,
            created_at,
        }
    }
}

/// [`Command`] for recording a new [`Commission`].
///
/// Unspecified deal details are prefilled from the [`Property`] the deal was
/// made upon (if any), see [`CreateCommission::prefill()`].
#[derive(Clone, Debug)]
pub struct CreateCommission {
    /// ID of the [`Property`] the deal was made upon, if any.
    pub property_id: Option<property::Id>,

    /// ID of the [`Client`] the deal was made with, if any.
    ///
    /// [`Client`]: crate::domain::Client
    pub client_id: Option<client::Id>,

    /// [`commission::DealKind`] of the [`Commission`], if specified.
    pub deal: Option<commission::DealKind>,

    /// Value of the deal, if specified.
    pub deal_value: Option<Money>,

    /// Rate of the [`Commission`], if specified.
    pub rate: Option<Percent>,

    /// [`commission::Status`] of the [`Commission`].
    pub status: commission::Status,

    /// [`Date`] the deal was closed on, if it was.
    pub closing_date: Option<Date>,

    /// [`Date`] the [`Commission`] was paid on, if it was.
    pub payment_date: Option<Date>,

    /// [`commission::Notes`] about the [`Commission`].
    pub notes: commission::Notes,
}

impl CreateCommission {
    /// Completes this [`CreateCommission`] into [`Attributes`], taking the
    /// unspecified details from the provided [`Property`]:
    /// - deal value from its price;
    /// - rate from its commission rate;
    /// - deal kind from its listing kind;
    /// - client from its owner.
    ///
    /// The rate falls back to the [`Commission::DEFAULT_RATE`] and the deal
    /// kind to the [`commission::DealKind::Sale`].
    ///
    /// # Errors
    ///
    /// With an [`ExecutionError::DealValueUnknown`] if the deal value is
    /// neither specified nor can be prefilled.
    pub fn prefill(
        self,
        property: Option<&Property>,
    ) -> Result<Attributes, ExecutionError> {
        let Self {
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            status,
            closing_date,
            payment_date,
            notes,
        } = self;

        let deal_value = deal_value
            .or_else(|| property.map(|p| p.price))
            .ok_or(ExecutionError::DealValueUnknown)?;
        let rate = rate
            .or_else(|| property.and_then(|p| p.commission_rate))
            .unwrap_or(Percent::from(Commission::DEFAULT_RATE));
        let deal = deal
            .or_else(|| {
                property.map(|p| match p.listing {
                    property::ListingKind::Sale => commission::DealKind::Sale,
                    property::ListingKind::Rent => {
                        commission::DealKind::Rental
                    }
                })
            })
            .unwrap_or(commission::DealKind::Sale);
        let client_id = client_id.or_else(|| property.and_then(|p| p.owner_id));

        Ok(Attributes {
            property_id,
            client_id,
            deal,
            deal_value,
            rate,
            status,
            closing_date,
            payment_date,
            notes,
        })
    }
}

impl<Db> Command<CreateCommission> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<Commission>, Err = Traced<database::Error>>,
{
    type Ok = Commission;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCommission,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let property = if let Some(id) = cmd.property_id {
            self.database()
                .execute(Select(By::<Option<Property>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
        } else {
            None
        };

        let commission = cmd
            .prefill(property.as_ref())
            .map_err(tracerr::wrap!())?
            .into_commission(commission::Id::new(), DateTime::now().coerce());

        self.database()
            .execute(Insert(commission.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Commission);
        Ok(commission)
    }
}

/// [`Command`] for overwriting [`Attributes`] of an existing [`Commission`].
#[derive(Clone, Debug)]
pub struct UpdateCommission {
    /// ID of the [`Commission`] to be updated.
    pub id: commission::Id,

    /// New [`Attributes`] of the [`Commission`].
    pub attributes: Attributes,
}

impl<Db> Command<UpdateCommission> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Commission>, commission::Id>>,
            Ok = Option<Commission>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Commission, commission::Id>>,
            Err = Traced<database::Error>,
        > + Database<Update<Commission>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Commission;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateCommission,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCommission { id, attributes } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Commission`.
        tx.execute(Lock(By::<Commission, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Commission>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CommissionNotExists(id))
            .map_err(tracerr::wrap!())?;

        let commission = attributes.into_commission(id, existing.created_at);
        tx.execute(Update(commission.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.invalidate(Invalidation::Commission);
        Ok(commission)
    }
}

/// Error of [`CreateCommission`] and [`UpdateCommission`] [`Command`]s
/// execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Commission`] with the provided ID does not exist.
    #[display("`Commission(id: {_0})` does not exist")]
    #[from(ignore)]
    CommissionNotExists(#[error(not(source))] commission::Id),

    /// Deal value is neither specified nor can be taken from a [`Property`].
    #[display("Deal value is unknown")]
    #[from(ignore)]
    DealValueUnknown,

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::{Money, Percent};

    use crate::{
        domain::{client, commission, property},
        view::fixture,
    };

    use super::{CreateCommission, ExecutionError};

    fn blank() -> CreateCommission {
        CreateCommission {
            property_id: None,
            client_id: None,
            deal: None,
            deal_value: None,
            rate: None,
            status: commission::Status::Pending,
            closing_date: None,
            payment_date: None,
            notes: commission::Notes::default(),
        }
    }

    #[test]
    fn prefills_from_property() {
        let mut rental = fixture::property("Loft");
        rental.listing = property::ListingKind::Rent;
        rental.price = fixture::money("2500");
        rental.commission_rate = Some(Percent::from(10));
        rental.owner_id = Some(client::Id::new());

        let attrs = CreateCommission {
            property_id: Some(rental.id),
            ..blank()
        }
        .prefill(Some(&rental))
        .unwrap();

        assert_eq!(attrs.property_id, Some(rental.id));
        assert_eq!(attrs.deal_value, fixture::money("2500"));
        assert_eq!(attrs.rate, Percent::from(10));
        assert_eq!(attrs.deal, commission::DealKind::Rental);
        assert_eq!(attrs.client_id, rental.owner_id);
    }

    #[test]
    fn specified_details_win() {
        let property = fixture::property("House");
        let client_id = client::Id::new();

        let attrs = CreateCommission {
            client_id: Some(client_id),
            deal: Some(commission::DealKind::Rental),
            deal_value: Some(fixture::money("100")),
            rate: Some(Percent::from(50)),
            ..blank()
        }
        .prefill(Some(&property))
        .unwrap();

        assert_eq!(attrs.client_id, Some(client_id));
        assert_eq!(attrs.deal, commission::DealKind::Rental);
        assert_eq!(attrs.deal_value, fixture::money("100"));
        assert_eq!(attrs.rate, Percent::from(50));
    }

    #[test]
    fn falls_back_to_defaults() {
        let attrs = CreateCommission {
            deal_value: Some(fixture::money("500000")),
            ..blank()
        }
        .prefill(None)
        .unwrap();

        assert_eq!(attrs.rate, Percent::from(3));
        assert_eq!(attrs.deal, commission::DealKind::Sale);
        assert_eq!(attrs.client_id, None);

        let created_at = fixture::datetime("2024-05-01T00:00:00Z").coerce();
        let commission =
            attrs.into_commission(commission::Id::new(), created_at);
        assert_eq!(commission.amount, "15000.00".parse::<Money>().unwrap());
    }

    #[test]
    fn requires_deal_value() {
        assert!(matches!(
            blank().prefill(None),
            Err(ExecutionError::DealValueUnknown),
        ));
    }
}
