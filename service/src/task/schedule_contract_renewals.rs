//! [`ScheduleContractRenewals`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{
        By, Commit, Insert, Lock, Perform, Select, Start, Transact, Transacted,
    },
    DateTime,
};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, reminder, Property, Reminder},
    infra::{database, Database},
    read, view, Invalidation, Service,
};

use super::Task;

/// Configuration for [`ScheduleContractRenewals`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between checks of the [`Property`] contracts.
    #[default(time::Duration::from_secs(60 * 60))]
    pub interval: time::Duration,
}

/// [`Task`] for scheduling a [`reminder::Kind::ContractRenewal`] for every
/// [`Property`] which agency contract is about to end.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleContractRenewals<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<ScheduleContractRenewals<Self>, Config>>>
    for Service<Db>
where
    ScheduleContractRenewals<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<ScheduleContractRenewals<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let task = ScheduleContractRenewals {
            config: by.into_inner(),
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            _ = interval.tick().await;
            if let Err(e) = task.execute(Perform(())).await {
                log::error!("`task::ScheduleContractRenewals` failed: {e}");
            }
        }
    }
}

impl<Db> Task<Perform<()>> for ScheduleContractRenewals<Service<Db>>
where
    Db: Database<
            Select<By<Vec<Property>, read::property::list::Selector>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Reminder>, read::reminder::list::Selector>>,
            Ok = Vec<Reminder>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reminder>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let clock = self.service.clock();
        let today = clock.today();

        let properties = self
            .service
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

        let mut scheduled = 0_usize;
        for property in properties {
            let tx = self
                .service
                .database()
                .execute(Transact)
                .await
                .map_err(tracerr::wrap!())?;

            // Avoid scheduling the same renewal twice.
            tx.execute(Lock(By::<Property, _>::new(property.id)))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;

            let existing = tx
                .execute(Select(By::<Vec<Reminder>, _>::new(
                    read::reminder::list::Selector {
                        filter: read::reminder::list::Filter {
                            kind: Some(reminder::Kind::ContractRenewal),
                            status: None,
                            property_id: Some(property.id),
                            client_id: None,
                        },
                        sort: None,
                        limit: None,
                    },
                )))
                .await
                .map_err(tracerr::wrap!())?;
            if !needs_renewal_reminder(&property, &existing, &clock) {
                continue;
            }

            let Some(reminder) = renewal_reminder(&property, &clock) else {
                log::warn!(
                    "cannot schedule contract renewal of \
                     `Property(id: {})`",
                    property.id,
                );
                continue;
            };
            tx.execute(Insert(reminder))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
            tx.execute(Commit)
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
            scheduled += 1;
        }

        if scheduled > 0 {
            log::info!("scheduled {scheduled} contract renewal `Reminder`s");
            self.service.invalidate(Invalidation::Reminder);
        }
        Ok(())
    }
}

/// Checks whether the provided [`Property`] still needs a
/// [`reminder::Kind::ContractRenewal`] [`Reminder`], given its `existing`
/// ones.
///
/// A renewal [`Reminder`] already scheduled for the current contract end
/// [`Date`] counts regardless of its status, so a completed or dismissed one
/// is never recreated.
///
/// [`Date`]: common::Date
fn needs_renewal_reminder(
    property: &Property,
    existing: &[Reminder],
    clock: &view::Clock,
) -> bool {
    let Some(end) = property.contract_end_date else {
        return false;
    };
    let due_at = DateTime::start_of(end, clock.offset);
    !existing.iter().any(|r| {
        r.kind == reminder::Kind::ContractRenewal
            && r.property_id == Some(property.id)
            && r.due_at.coerce::<()>() == due_at
    })
}

/// Creates a new [`reminder::Kind::ContractRenewal`] [`Reminder`] due at the
/// start of the contract end [`Date`] of the provided [`Property`].
///
/// [`None`] is returned if the [`Property`] has no contract end [`Date`].
///
/// [`Date`]: common::Date
fn renewal_reminder(
    property: &Property,
    clock: &view::Clock,
) -> Option<Reminder> {
    let end = property.contract_end_date?;
    let title =
        reminder::Title::new(format!("Renew contract: {}", property.title))
            .or_else(|| reminder::Title::new("Renew contract"))?;
    Some(Reminder {
        id: reminder::Id::new(),
        title,
        description: reminder::Description::new(format!(
            "Agency contract for {} ends on {end}.",
            property.address,
        ))
        .unwrap_or_default(),
        due_at: DateTime::start_of(end, clock.offset).coerce(),
        kind: reminder::Kind::ContractRenewal,
        priority: reminder::Priority::High,
        status: reminder::Status::Pending,
        client_id: property.owner_id,
        property_id: Some(property.id),
        created_at: clock.now.coerce(),
    })
}

/// Error of [`ScheduleContractRenewals`] execution.
pub type ExecutionError = Traced<database::Error>;

#[cfg(test)]
mod spec {
    use common::datetime::UtcOffset;

    use crate::{
        domain::{client, reminder},
        view::{fixture, Clock},
    };

    use super::{needs_renewal_reminder, renewal_reminder};

    #[test]
    fn reminder_is_due_at_contract_end() {
        let clock = Clock::at(
            fixture::datetime("2024-05-15T12:00:00Z"),
            UtcOffset::from_hms(2, 0, 0).unwrap(),
        );
        let mut property = fixture::property("Loft");
        property.owner_id = Some(client::Id::new());
        property.contract_end_date = Some(fixture::date("2024-06-01"));

        let reminder = renewal_reminder(&property, &clock).unwrap();

        assert_eq!(reminder.kind, reminder::Kind::ContractRenewal);
        assert_eq!(reminder.status, reminder::Status::Pending);
        assert_eq!(reminder.priority, reminder::Priority::High);
        assert_eq!(reminder.title.as_str(), "Renew contract: Loft");
        assert_eq!(reminder.property_id, Some(property.id));
        assert_eq!(reminder.client_id, property.owner_id);
        assert_eq!(
            reminder.due_at.coerce::<()>(),
            fixture::datetime("2024-05-31T22:00:00Z"),
        );
    }

    #[test]
    fn no_reminder_without_contract_end() {
        assert!(
            renewal_reminder(&fixture::property("Loft"), &fixture::clock())
                .is_none()
        );
    }

    #[test]
    fn long_titles_fall_back() {
        let mut property = fixture::property(&"x".repeat(512));
        property.contract_end_date = Some(fixture::date("2024-06-01"));

        let reminder = renewal_reminder(&property, &fixture::clock()).unwrap();

        assert_eq!(reminder.title.as_str(), "Renew contract");
    }

    #[test]
    fn schedules_renewal_once_per_contract_end() {
        let clock = fixture::clock();
        let mut property = fixture::property("Loft");
        property.contract_end_date = Some(fixture::date("2024-06-01"));

        assert!(needs_renewal_reminder(&property, &[], &clock));

        let mut scheduled = renewal_reminder(&property, &clock).unwrap();
        assert!(!needs_renewal_reminder(
            &property,
            &[scheduled.clone()],
            &clock,
        ));

        for status in [reminder::Status::Completed, reminder::Status::Dismissed]
        {
            scheduled.status = status;
            assert!(
                !needs_renewal_reminder(
                    &property,
                    &[scheduled.clone()],
                    &clock,
                ),
                "{status:?} renewal must not be recreated",
            );
        }
    }

    #[test]
    fn reschedules_renewal_of_extended_contract() {
        let clock = fixture::clock();
        let mut property = fixture::property("Loft");
        property.contract_end_date = Some(fixture::date("2024-06-01"));
        let mut previous = renewal_reminder(&property, &clock).unwrap();
        previous.status = reminder::Status::Dismissed;

        property.contract_end_date = Some(fixture::date("2024-06-10"));

        assert!(needs_renewal_reminder(&property, &[previous], &clock));
    }

    #[test]
    fn no_renewal_needed_without_contract_end() {
        assert!(!needs_renewal_reminder(
            &fixture::property("Loft"),
            &[],
            &fixture::clock(),
        ));
    }
}
