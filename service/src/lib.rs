//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;
pub mod view;

use common::{
    datetime::UtcOffset,
    operations::{By, Start},
};
use derive_more::{Debug, Error};
use tokio::sync::broadcast;
use tracing as log;

#[cfg(doc)]
use infra::Database;

pub use self::{
    command::Command, domain::EntityKind as Invalidation, query::Query,
    task::Task,
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// [`UtcOffset`] the calendar days of the agency are observed in.
    pub utc_offset: UtcOffset,

    /// Capacity of the [`Invalidation`]s channel.
    ///
    /// Subscribers lagging behind more than this number of [`Invalidation`]s
    /// miss the oldest ones.
    pub invalidations_capacity: usize,

    /// [`task::ScheduleContractRenewals`] configuration.
    pub schedule_contract_renewals: task::schedule_contract_renewals::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// Sender of the [`Invalidation`]s published by [`Command`]s.
    invalidations: broadcast::Sender<Invalidation>,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::ScheduleContractRenewals<Self>,
                        task::schedule_contract_renewals::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let (invalidations, _) =
            broadcast::channel(config.invalidations_capacity.max(1));
        let this = Service {
            config,
            database,
            invalidations,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("schedule_contract_renewals", async move {
            svc.execute(Start(By::new(
                svc.config().schedule_contract_renewals,
            )))
            .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns a [`view::Clock`] pointing to the current moment.
    #[must_use]
    pub fn clock(&self) -> view::Clock {
        view::Clock::now(self.config.utc_offset)
    }

    /// Subscribes to the [`Invalidation`]s published after successful
    /// [`Command`]s.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.invalidations.subscribe()
    }

    /// Publishes the provided [`Invalidation`] to all the current
    /// subscribers.
    pub(crate) fn invalidate(&self, kind: Invalidation) {
        // No subscribers is not an error.
        _ = self.invalidations.send(kind);
        log::debug!("`{kind}` lists invalidated");
    }
}

#[cfg(test)]
mod spec {
    use common::datetime::UtcOffset;
    use tokio::sync::broadcast;

    use crate::{
        task::schedule_contract_renewals, Config, Invalidation, Service,
    };

    fn config() -> Config {
        Config {
            utc_offset: UtcOffset::UTC,
            invalidations_capacity: 4,
            schedule_contract_renewals:
                schedule_contract_renewals::Config::default(),
        }
    }

    #[test]
    fn publishes_invalidations_to_subscribers() {
        let (invalidations, _) = broadcast::channel(4);
        let service = Service {
            config: config(),
            database: (),
            invalidations,
        };
        let mut first = service.subscribe();
        let mut second = service.subscribe();

        service.invalidate(Invalidation::Property);
        service.invalidate(Invalidation::Reminder);

        for rx in [&mut first, &mut second] {
            assert_eq!(rx.try_recv().unwrap(), Invalidation::Property);
            assert_eq!(rx.try_recv().unwrap(), Invalidation::Reminder);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn invalidating_without_subscribers_is_noop() {
        let (invalidations, _) = broadcast::channel(4);
        let service = Service {
            config: config(),
            database: (),
            invalidations,
        };

        service.invalidate(Invalidation::Client);

        let mut late = service.subscribe();
        assert!(late.try_recv().is_err());
    }
}
