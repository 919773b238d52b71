//! Dashboard overview.

use std::cmp::Reverse;

use common::Money;

use crate::domain::{
    client, property, Client, Commission, Interaction, Property, Reminder,
};

use super::{commission, property::contract_alerts, reminder::Bucket, Clock};

/// Summary of the agency state.
#[derive(Clone, Debug, PartialEq)]
pub struct Overview {
    /// Number of [`Property`]s available on the market.
    pub active_listings: usize,

    /// Number of all the [`Property`]s.
    pub total_properties: usize,

    /// Number of active [`Client`]s.
    pub active_clients: usize,

    /// Number of all the [`Client`]s.
    pub total_clients: usize,

    /// Total amount of [`Commission`]s closed in the current calendar month.
    pub monthly_revenue: Money,

    /// Number of pending [`Reminder`]s.
    pub pending_reminders: usize,

    /// Earliest pending [`Reminder`]s which are not overdue.
    pub agenda: Vec<Reminder>,

    /// [`Property`]s needing a contract renewal.
    pub contract_alerts: Vec<Property>,

    /// Most recently created [`Interaction`]s.
    pub recent_interactions: Vec<Interaction>,

    /// Most recently created [`Property`]s.
    pub recent_properties: Vec<Property>,
}

impl Overview {
    /// Maximum number of [`Overview::agenda`] items.
    pub const AGENDA_LEN: usize = 5;

    /// Maximum number of [`Overview::recent_interactions`].
    pub const RECENT_INTERACTIONS: usize = 10;

    /// Maximum number of [`Overview::recent_properties`].
    pub const RECENT_PROPERTIES: usize = 3;

    /// Composes a new [`Overview`] out of the provided entities.
    #[must_use]
    pub fn compose(
        mut properties: Vec<Property>,
        clients: &[Client],
        commissions: &[Commission],
        reminders: Vec<Reminder>,
        mut interactions: Vec<Interaction>,
        clock: &Clock,
    ) -> Self {
        let today = clock.today();

        let pending_reminders =
            reminders.iter().filter(|r| r.is_pending()).count();
        let mut agenda = reminders
            .into_iter()
            .filter(|r| {
                matches!(
                    Bucket::of(r, clock),
                    Some(Bucket::Today | Bucket::Upcoming),
                )
            })
            .collect::<Vec<_>>();
        agenda.sort_by_key(|r| r.due_at);
        agenda.truncate(Self::AGENDA_LEN);

        interactions.sort_by_key(|i| Reverse(i.created_at));
        interactions.truncate(Self::RECENT_INTERACTIONS);

        properties.sort_by_key(|p| Reverse(p.created_at));

        Self {
            active_listings: properties
                .iter()
                .filter(|p| p.status == property::Status::Available)
                .count(),
            total_properties: properties.len(),
            active_clients: clients
                .iter()
                .filter(|c| c.status == client::Status::Active)
                .count(),
            total_clients: clients.len(),
            monthly_revenue: commission::monthly_revenue(commissions, today),
            pending_reminders,
            agenda,
            contract_alerts: contract_alerts(properties.iter().cloned(), today),
            recent_interactions: interactions,
            recent_properties: properties
                .into_iter()
                .take(Self::RECENT_PROPERTIES)
                .collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{client, commission, property, reminder::Status},
        view::fixture,
    };

    use super::Overview;

    #[test]
    fn composes_counters() {
        let clock = fixture::clock();

        let mut sold = fixture::property("Sold");
        sold.status = property::Status::Sold;
        let mut closed = fixture::client("Closed");
        closed.status = client::Status::Closed;

        let overview = Overview::compose(
            vec![fixture::property("Loft"), sold],
            &[fixture::client("Active"), closed],
            &[
                fixture::commission(
                    "1000",
                    commission::Status::Paid,
                    Some("2024-05-02"),
                ),
                fixture::commission(
                    "2000",
                    commission::Status::Pending,
                    Some("2024-04-02"),
                ),
            ],
            vec![
                fixture::reminder("2024-05-14T09:00:00Z", Status::Pending),
                fixture::reminder("2024-05-14T09:00:00Z", Status::Completed),
            ],
            vec![],
            &clock,
        );

        assert_eq!(overview.active_listings, 1);
        assert_eq!(overview.total_properties, 2);
        assert_eq!(overview.active_clients, 1);
        assert_eq!(overview.total_clients, 2);
        assert_eq!(overview.monthly_revenue, fixture::money("1000"));
        assert_eq!(overview.pending_reminders, 1);
    }

    #[test]
    fn agenda_skips_overdue_and_keeps_earliest_five() {
        let clock = fixture::clock();
        let overdue =
            fixture::reminder("2024-05-15T11:59:59Z", Status::Pending);
        let upcoming = (1..=6)
            .rev()
            .map(|d| {
                fixture::reminder(
                    &format!("2024-05-{:02}T09:00:00Z", 15 + d),
                    Status::Pending,
                )
            })
            .collect::<Vec<_>>();
        let today = fixture::reminder("2024-05-15T20:00:00Z", Status::Pending);

        let mut reminders = vec![overdue];
        reminders.extend(upcoming.iter().cloned());
        reminders.push(today.clone());

        let overview =
            Overview::compose(vec![], &[], &[], reminders, vec![], &clock);

        let expected = [
            today,
            upcoming[5].clone(),
            upcoming[4].clone(),
            upcoming[3].clone(),
            upcoming[2].clone(),
        ];
        assert_eq!(overview.agenda, expected);
        assert_eq!(overview.pending_reminders, 8);
    }

    #[test]
    fn recent_lists_are_newest_first() {
        let clock = fixture::clock();

        let interactions = (0..12)
            .map(|h| {
                fixture::interaction(&format!("2024-05-01T{h:02}:00:00Z"))
            })
            .collect::<Vec<_>>();
        let properties = (1..=4)
            .map(|d| {
                let mut p = fixture::property(&format!("Property {d}"));
                p.created_at =
                    fixture::datetime(&format!("2024-05-0{d}T00:00:00Z"))
                        .coerce();
                p
            })
            .collect::<Vec<_>>();

        let overview = Overview::compose(
            properties.clone(),
            &[],
            &[],
            vec![],
            interactions.clone(),
            &clock,
        );

        assert_eq!(overview.recent_interactions.len(), 10);
        assert_eq!(overview.recent_interactions[0], interactions[11]);
        assert_eq!(overview.recent_interactions[9], interactions[2]);
        assert_eq!(
            overview.recent_properties,
            [
                properties[3].clone(),
                properties[2].clone(),
                properties[1].clone(),
            ],
        );
    }

    #[test]
    fn alerts_contract_renewals() {
        let clock = fixture::clock();
        let mut expiring = fixture::property("Expiring");
        expiring.contract_end_date = Some(clock.today().add_days(29));
        let mut later = fixture::property("Later");
        later.contract_end_date = Some(clock.today().add_days(31));

        let overview = Overview::compose(
            vec![expiring.clone(), later],
            &[],
            &[],
            vec![],
            vec![],
            &clock,
        );

        assert_eq!(overview.contract_alerts, [expiring]);
    }
}
