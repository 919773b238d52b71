//! [`Property`] derived views.

use common::Date;

use crate::domain::Property;

/// Number of days before the contract end a [`Property`] is alerted for
/// renewal.
pub const CONTRACT_ALERT_DAYS: i64 = 30;

/// Checks whether the agency contract of the provided [`Property`] ends
/// within [`CONTRACT_ALERT_DAYS`] from `today` (both ends inclusive).
#[must_use]
pub fn needs_contract_renewal(property: &Property, today: Date) -> bool {
    property.contract_end_date.is_some_and(|end| {
        today <= end && end <= today.add_days(CONTRACT_ALERT_DAYS)
    })
}

/// Retains only the [`Property`]s needing a contract renewal, ordered by the
/// contract end [`Date`].
#[must_use]
pub fn contract_alerts(
    properties: impl IntoIterator<Item = Property>,
    today: Date,
) -> Vec<Property> {
    let mut alerts = properties
        .into_iter()
        .filter(|p| needs_contract_renewal(p, today))
        .collect::<Vec<_>>();
    alerts.sort_by_key(|p| p.contract_end_date);
    alerts
}

#[cfg(test)]
mod spec {
    use crate::view::fixture;

    use super::{contract_alerts, needs_contract_renewal};

    #[test]
    fn alerts_within_thirty_days() {
        let today = fixture::date("2024-05-15");
        let with_end = |days| {
            let mut p = fixture::property("Loft");
            p.contract_end_date = Some(today.add_days(days));
            p
        };

        assert!(needs_contract_renewal(&with_end(29), today));
        assert!(needs_contract_renewal(&with_end(30), today));
        assert!(needs_contract_renewal(&with_end(0), today));
        assert!(!needs_contract_renewal(&with_end(31), today));
        assert!(!needs_contract_renewal(&with_end(-1), today));
        assert!(!needs_contract_renewal(&fixture::property("Loft"), today));
    }

    #[test]
    fn alerts_are_ordered_by_end_date() {
        let today = fixture::date("2024-05-15");
        let mut late = fixture::property("Late");
        late.contract_end_date = Some(today.add_days(20));
        let mut soon = fixture::property("Soon");
        soon.contract_end_date = Some(today.add_days(2));

        let alerts = contract_alerts(
            [late.clone(), fixture::property("None"), soon.clone()],
            today,
        );

        assert_eq!(alerts, [soon, late]);
    }
}
