//! [`Commission`] aggregates.

use common::{Date, Money};

use crate::domain::{commission, Commission};

/// Aggregated amounts of [`Commission`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Total amount of all the [`Commission`]s.
    pub total: Money,

    /// Number of all the [`Commission`]s.
    pub count: usize,

    /// Total amount of the paid [`Commission`]s.
    pub paid: Money,

    /// Number of the paid [`Commission`]s.
    pub paid_count: usize,

    /// Total amount of the pending [`Commission`]s.
    pub pending: Money,

    /// Number of the pending [`Commission`]s.
    pub pending_count: usize,

    /// Total amount of the [`Commission`]s closed in the current calendar
    /// month.
    pub monthly: Money,
}

impl Stats {
    /// Aggregates the provided [`Commission`]s as of the `today` [`Date`].
    #[must_use]
    pub fn of<'a>(
        commissions: impl IntoIterator<Item = &'a Commission>,
        today: Date,
    ) -> Self {
        commissions.into_iter().fold(Self::default(), |mut s, c| {
            s.total += c.amount;
            s.count += 1;
            match c.status {
                commission::Status::Paid => {
                    s.paid += c.amount;
                    s.paid_count += 1;
                }
                commission::Status::Pending => {
                    s.pending += c.amount;
                    s.pending_count += 1;
                }
                commission::Status::PartiallyPaid => {}
            }
            if c.closing_date.is_some_and(|d| d.same_month(today)) {
                s.monthly += c.amount;
            }
            s
        })
    }
}

/// Sums the amounts of the [`Commission`]s closed in the same calendar month
/// as `today`.
#[must_use]
pub fn monthly_revenue<'a>(
    commissions: impl IntoIterator<Item = &'a Commission>,
    today: Date,
) -> Money {
    commissions
        .into_iter()
        .filter(|c| c.closing_date.is_some_and(|d| d.same_month(today)))
        .map(|c| c.amount)
        .sum()
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{domain::commission::Status, view::fixture};

    use super::{monthly_revenue, Stats};

    #[test]
    fn aggregates_by_status() {
        let commissions = [
            fixture::commission("10000", Status::Paid, Some("2024-05-03")),
            fixture::commission("5000", Status::Pending, Some("2024-05-20")),
            fixture::commission("8000", Status::Paid, Some("2024-04-30")),
        ];

        let stats = Stats::of(&commissions, fixture::date("2024-05-15"));

        assert_eq!(stats.total, fixture::money("23000"));
        assert_eq!(stats.paid, fixture::money("18000"));
        assert_eq!(stats.pending, fixture::money("5000"));
        assert_eq!(stats.monthly, fixture::money("15000"));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.paid_count, 2);
        assert_eq!(stats.pending_count, 1);
    }

    #[test]
    fn partially_paid_counts_only_in_total() {
        let commissions =
            [fixture::commission("700", Status::PartiallyPaid, None)];

        let stats = Stats::of(&commissions, fixture::date("2024-05-15"));

        assert_eq!(stats.total, fixture::money("700"));
        assert_eq!(stats.paid, Money::ZERO);
        assert_eq!(stats.pending, Money::ZERO);
        assert_eq!(stats.monthly, Money::ZERO);
    }

    #[test]
    fn monthly_includes_month_bounds() {
        let commissions = [
            fixture::commission("1", Status::Paid, Some("2024-05-01")),
            fixture::commission("2", Status::Paid, Some("2024-05-31")),
            fixture::commission("4", Status::Paid, Some("2024-06-01")),
            fixture::commission("8", Status::Paid, None),
        ];

        assert_eq!(
            monthly_revenue(&commissions, fixture::date("2024-05-15")),
            fixture::money("3"),
        );
        assert_eq!(
            Stats::of(std::iter::empty(), fixture::date("2024-05-15")),
            Stats::default(),
        );
    }
}
