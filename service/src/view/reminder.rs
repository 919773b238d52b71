//! [`Reminder`] bucketing and aggregates.

use std::time::Duration;

use crate::domain::{reminder, Reminder};

use super::Clock;

/// Bucket of a pending [`Reminder`] relative to the current moment.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Bucket {
    /// Due moment has already passed.
    Overdue,

    /// Due later today.
    Today,

    /// Due on a later day.
    Upcoming,
}

impl Bucket {
    /// Returns the [`Bucket`] of the provided [`Reminder`].
    ///
    /// [`None`] is returned for non-pending [`Reminder`]s.
    #[must_use]
    pub fn of(reminder: &Reminder, clock: &Clock) -> Option<Self> {
        if !reminder.is_pending() {
            return None;
        }
        let due = reminder.due_at.coerce::<()>();
        Some(if due < clock.now {
            Self::Overdue
        } else if clock.date_of(due) == clock.today() {
            Self::Today
        } else {
            Self::Upcoming
        })
    }
}

/// [`Reminder`]s grouped for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Agenda {
    /// Pending [`Reminder`]s in the [`Bucket::Overdue`].
    pub overdue: Vec<Reminder>,

    /// Pending [`Reminder`]s in the [`Bucket::Today`].
    pub today: Vec<Reminder>,

    /// Pending [`Reminder`]s in the [`Bucket::Upcoming`].
    pub upcoming: Vec<Reminder>,

    /// Completed [`Reminder`]s.
    pub completed: Vec<Reminder>,
}

impl Agenda {
    /// Groups the provided [`Reminder`]s, preserving their order within each
    /// group.
    ///
    /// Dismissed [`Reminder`]s are left out.
    #[must_use]
    pub fn of(
        reminders: impl IntoIterator<Item = Reminder>,
        clock: &Clock,
    ) -> Self {
        let mut agenda = Self::default();
        for r in reminders {
            match Bucket::of(&r, clock) {
                Some(Bucket::Overdue) => agenda.overdue.push(r),
                Some(Bucket::Today) => agenda.today.push(r),
                Some(Bucket::Upcoming) => agenda.upcoming.push(r),
                None if r.status == reminder::Status::Completed => {
                    agenda.completed.push(r);
                }
                None => {}
            }
        }
        agenda
    }
}

/// Counters of [`Reminder`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of pending [`Reminder`]s.
    pub pending: usize,

    /// Number of pending [`Reminder`]s in the [`Bucket::Overdue`].
    pub overdue: usize,

    /// Number of pending [`Reminder`]s in the [`Bucket::Today`].
    pub today: usize,

    /// Number of pending [`Reminder`]s due within the next seven days.
    pub this_week: usize,
}

impl Stats {
    /// Length of the [`Stats::this_week`] window.
    pub const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    /// Counts the provided [`Reminder`]s.
    #[must_use]
    pub fn of<'a>(
        reminders: impl IntoIterator<Item = &'a Reminder>,
        clock: &Clock,
    ) -> Self {
        let week_end = clock.now + Self::WEEK;
        reminders.into_iter().fold(Self::default(), |mut s, r| {
            let Some(bucket) = Bucket::of(r, clock) else {
                return s;
            };
            s.pending += 1;
            match bucket {
                Bucket::Overdue => s.overdue += 1,
                Bucket::Today => s.today += 1,
                Bucket::Upcoming => {}
            }
            let due = r.due_at.coerce::<()>();
            if clock.now <= due && due <= week_end {
                s.this_week += 1;
            }
            s
        })
    }
}

#[cfg(test)]
mod spec {
    use common::datetime::UtcOffset;

    use crate::{
        domain::reminder::Status,
        view::{fixture, Clock},
    };

    use super::{Agenda, Bucket, Stats};

    #[test]
    fn buckets_pending_reminders() {
        let clock = fixture::clock();

        let yesterday =
            fixture::reminder("2024-05-14T09:00:00Z", Status::Pending);
        let earlier_today =
            fixture::reminder("2024-05-15T08:00:00Z", Status::Pending);
        let later_today =
            fixture::reminder("2024-05-15T18:00:00Z", Status::Pending);
        let in_five_days =
            fixture::reminder("2024-05-20T09:00:00Z", Status::Pending);
        let completed =
            fixture::reminder("2024-05-15T18:00:00Z", Status::Completed);

        assert_eq!(Bucket::of(&yesterday, &clock), Some(Bucket::Overdue));
        assert_eq!(Bucket::of(&earlier_today, &clock), Some(Bucket::Overdue));
        assert_eq!(Bucket::of(&later_today, &clock), Some(Bucket::Today));
        assert_eq!(Bucket::of(&in_five_days, &clock), Some(Bucket::Upcoming));
        assert_eq!(Bucket::of(&completed, &clock), None);
    }

    #[test]
    fn today_depends_on_offset() {
        let late_evening =
            fixture::reminder("2024-05-15T23:00:00Z", Status::Pending);

        assert_eq!(
            Bucket::of(&late_evening, &fixture::clock()),
            Some(Bucket::Today),
        );
        assert_eq!(
            Bucket::of(
                &late_evening,
                &Clock::at(
                    fixture::datetime("2024-05-15T12:00:00Z"),
                    UtcOffset::from_hms(3, 0, 0).unwrap(),
                ),
            ),
            Some(Bucket::Upcoming),
        );
    }

    #[test]
    fn agenda_partitions_pending_reminders() {
        let reminders = vec![
            fixture::reminder("2024-05-14T09:00:00Z", Status::Pending),
            fixture::reminder("2024-05-15T18:00:00Z", Status::Pending),
            fixture::reminder("2024-05-20T09:00:00Z", Status::Pending),
            fixture::reminder("2024-05-21T09:00:00Z", Status::Pending),
            fixture::reminder("2024-05-15T18:00:00Z", Status::Completed),
            fixture::reminder("2024-05-15T18:00:00Z", Status::Dismissed),
        ];

        let agenda = Agenda::of(reminders.clone(), &fixture::clock());

        assert_eq!(agenda.overdue, [reminders[0].clone()]);
        assert_eq!(agenda.today, [reminders[1].clone()]);
        assert_eq!(
            agenda.upcoming,
            [reminders[2].clone(), reminders[3].clone()],
        );
        assert_eq!(agenda.completed, [reminders[4].clone()]);
    }

    #[test]
    fn counts_reminders() {
        let reminders = [
            fixture::reminder("2024-05-14T09:00:00Z", Status::Pending),
            fixture::reminder("2024-05-15T18:00:00Z", Status::Pending),
            fixture::reminder("2024-05-22T12:00:00Z", Status::Pending),
            fixture::reminder("2024-05-22T12:00:01Z", Status::Pending),
            fixture::reminder("2024-05-16T09:00:00Z", Status::Dismissed),
        ];

        assert_eq!(
            Stats::of(&reminders, &fixture::clock()),
            Stats {
                pending: 4,
                overdue: 1,
                today: 1,
                this_week: 2,
            },
        );
    }
}
