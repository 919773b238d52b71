//! [`Client`]-related read definitions.

#[cfg(doc)]
use crate::domain::Client;

pub mod list {
    //! [`Client`] list definitions.

    use common::list;
    use strum::{Display, EnumString};

    use crate::domain::client;
    #[cfg(doc)]
    use crate::domain::Client;

    /// Field a [`Client`] list can be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    pub enum SortField {
        /// [`Client::created_at`].
        CreatedAt,

        /// [`Client::name`].
        Name,
    }

    /// [`list::Sort`] of a [`Client`] list.
    pub type Sort = list::Sort<SortField>;

    /// [`list::Selector`] of a [`Client`] list.
    ///
    /// Newest [`Client`]s go first if no [`Sort`] is specified.
    pub type Selector = list::Selector<Filter, Option<Sort>>;

    /// Filter of a [`Client`] list performed by a [`Database`].
    ///
    /// [`Database`]: crate::infra::Database
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`client::Status`] of the [`Client`].
        pub status: Option<client::Status>,
    }
}
