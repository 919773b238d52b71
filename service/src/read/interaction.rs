//! [`Interaction`]-related read definitions.

#[cfg(doc)]
use crate::domain::Interaction;

pub mod list {
    //! [`Interaction`] list definitions.

    use common::list;
    use strum::{Display, EnumString};

    use crate::domain::{client, property};
    #[cfg(doc)]
    use crate::domain::Interaction;

    /// Field an [`Interaction`] list can be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    pub enum SortField {
        /// [`Interaction::created_at`].
        CreatedAt,

        /// [`Interaction::occurred_at`].
        #[strum(serialize = "date")]
        OccurredAt,
    }

    /// [`list::Sort`] of an [`Interaction`] list.
    pub type Sort = list::Sort<SortField>;

    /// [`list::Selector`] of an [`Interaction`] list.
    ///
    /// Newest [`Interaction`]s go first if no [`Sort`] is specified.
    pub type Selector = list::Selector<Filter, Option<Sort>>;

    /// Filter of an [`Interaction`] list performed by a [`Database`].
    ///
    /// [`Database`]: crate::infra::Database
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Client`] the [`Interaction`] was made with.
        ///
        /// [`Client`]: crate::domain::Client
        pub client_id: Option<client::Id>,

        /// ID of the [`Property`] the [`Interaction`] concerns.
        ///
        /// [`Property`]: crate::domain::Property
        pub property_id: Option<property::Id>,
    }
}
