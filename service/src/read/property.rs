//! [`Property`]-related read definitions.

#[cfg(doc)]
use crate::domain::Property;

pub mod list {
    //! [`Property`] list definitions.

    use common::{list, Date};
    use strum::{Display, EnumString};

    use crate::domain::{client, property};
    #[cfg(doc)]
    use crate::domain::Property;

    /// Field a [`Property`] list can be sorted by.
    #[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
    #[strum(serialize_all = "snake_case")]
    pub enum SortField {
        /// [`Property::created_at`].
        CreatedAt,

        /// [`Property::price`].
        Price,

        /// [`Property::title`].
        Title,

        /// [`Property::contract_end_date`].
        ContractEndDate,
    }

    /// [`list::Sort`] of a [`Property`] list.
    pub type Sort = list::Sort<SortField>;

    /// [`list::Selector`] of a [`Property`] list.
    ///
    /// Newest [`Property`]s go first if no [`Sort`] is specified.
    pub type Selector = list::Selector<Filter, Option<Sort>>;

    /// Filter of a [`Property`] list performed by a [`Database`].
    ///
    /// [`Database`]: crate::infra::Database
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Client`] owning the [`Property`].
        ///
        /// [`Client`]: crate::domain::Client
        pub owner_id: Option<client::Id>,

        /// [`property::Status`] of the [`Property`].
        pub status: Option<property::Status>,

        /// Inclusive range of the [`Property::contract_end_date`].
        pub contract_ends_within: Option<(Date, Date)>,
    }
}
