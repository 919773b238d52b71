//! [`Dashboard`]-related definitions.

use common::Money;
use juniper::GraphQLObject;
use service::view;

use crate::{api, Context};

/// Summary of the agency state.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Dashboard {
    /// Number of `Property`s available on the market.
    pub active_listings: i32,

    /// Number of all the `Property`s.
    pub total_properties: i32,

    /// Number of `ACTIVE` `Client`s.
    pub active_clients: i32,

    /// Number of all the `Client`s.
    pub total_clients: i32,

    /// Total amount of `Commission`s closed in the current month.
    pub monthly_revenue: Money,

    /// Label of the `monthlyRevenue` (`$15,000`).
    pub monthly_revenue_label: String,

    /// Number of `PENDING` `Reminder`s.
    pub pending_reminders: i32,

    /// Earliest `PENDING` `Reminder`s which are not overdue.
    pub agenda: Vec<api::Reminder>,

    /// `Property`s whose agency contract ends within the next 30 days.
    pub contract_alerts: Vec<api::Property>,

    /// Most recently logged `Interaction`s.
    pub recent_interactions: Vec<api::Interaction>,

    /// Most recently created `Property`s.
    pub recent_properties: Vec<api::Property>,
}

impl From<view::Overview> for Dashboard {
    fn from(overview: view::Overview) -> Self {
        let view::Overview {
            active_listings,
            total_properties,
            active_clients,
            total_clients,
            monthly_revenue,
            pending_reminders,
            agenda,
            contract_alerts,
            recent_interactions,
            recent_properties,
        } = overview;
        Self {
            active_listings: api::count(active_listings),
            total_properties: api::count(total_properties),
            active_clients: api::count(active_clients),
            total_clients: api::count(total_clients),
            monthly_revenue,
            monthly_revenue_label: view::format::format_currency(
                monthly_revenue,
            ),
            pending_reminders: api::count(pending_reminders),
            agenda: agenda.into_iter().map(Into::into).collect(),
            contract_alerts: contract_alerts
                .into_iter()
                .map(Into::into)
                .collect(),
            recent_interactions: recent_interactions
                .into_iter()
                .map(Into::into)
                .collect(),
            recent_properties: recent_properties
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
