//! [`Reminder`]-related read definitions.

#[cfg(doc)]
use crate::domain::Reminder;

pub mod list {
    //! [`Reminder`] list definitions.

    use common::list;
    use strum::{Display, EnumString};

    use crate::domain::{client, property, reminder};
    #[cfg(doc)]
    use crate::domain::Reminder;

    /// Field a [`Reminder`] list can be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    pub enum SortField {
        /// [`Reminder::due_at`].
        #[strum(serialize = "due_date")]
        DueAt,

        /// [`Reminder::created_at`].
        CreatedAt,
    }

    /// [`list::Sort`] of a [`Reminder`] list.
    pub type Sort = list::Sort<SortField>;

    /// [`list::Selector`] of a [`Reminder`] list.
    ///
    /// Earliest due [`Reminder`]s go first if no [`Sort`] is specified.
    pub type Selector = list::Selector<Filter, Option<Sort>>;

    /// Filter of a [`Reminder`] list performed by a [`Database`].
    ///
    /// [`Database`]: crate::infra::Database
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`reminder::Kind`] of the [`Reminder`].
        pub kind: Option<reminder::Kind>,

        /// [`reminder::Status`] of the [`Reminder`].
        pub status: Option<reminder::Status>,

        /// ID of the [`Client`] the [`Reminder`] concerns.
        ///
        /// [`Client`]: crate::domain::Client
        pub client_id: Option<client::Id>,

        /// ID of the [`Property`] the [`Reminder`] concerns.
        ///
        /// [`Property`]: crate::domain::Property
        pub property_id: Option<property::Id>,
    }

    #[cfg(test)]
    mod spec {
        use common::list::Order;

        use super::{Sort, SortField};

        #[test]
        fn parses_sort_keys() {
            let sort = "-due_date".parse::<Sort>().unwrap();

            assert_eq!(sort.field, SortField::DueAt);
            assert_eq!(sort.order, Order::Desc);
            assert_eq!(sort.to_string(), "-due_date");
            assert_eq!(
                "created_at".parse::<Sort>().unwrap(),
                Sort::asc(SortField::CreatedAt),
            );
        }

        #[test]
        fn rejects_unknown_sort_keys() {
            assert!("-due_at".parse::<Sort>().is_err());
            assert!("price".parse::<Sort>().is_err());
            assert!("".parse::<Sort>().is_err());
        }
    }
}
