//! [`Commission`]-related read definitions.

#[cfg(doc)]
use crate::domain::Commission;

pub mod list {
    //! [`Commission`] list definitions.

    use common::list;
    use strum::{Display, EnumString};

    use crate::domain::{client, property};
    #[cfg(doc)]
    use crate::domain::Commission;

    /// Field a [`Commission`] list can be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    pub enum SortField {
        /// [`Commission::created_at`].
        CreatedAt,

        /// [`Commission::closing_date`].
        ClosingDate,

        /// [`Commission::deal_value`].
        DealValue,
    }

    /// [`list::Sort`] of a [`Commission`] list.
    pub type Sort = list::Sort<SortField>;

    /// [`list::Selector`] of a [`Commission`] list.
    ///
    /// Newest [`Commission`]s go first if no [`Sort`] is specified.
    pub type Selector = list::Selector<Filter, Option<Sort>>;

    /// Filter of a [`Commission`] list performed by a [`Database`].
    ///
    /// [`Database`]: crate::infra::Database
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Property`] the deal was made upon.
        ///
        /// [`Property`]: crate::domain::Property
        pub property_id: Option<property::Id>,

        /// ID of the [`Client`] the deal was made with.
        ///
        /// [`Client`]: crate::domain::Client
        pub client_id: Option<client::Id>,
    }
}
