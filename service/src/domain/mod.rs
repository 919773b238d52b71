//! Domain definitions.

pub mod client;
pub mod commission;
pub mod interaction;
pub mod property;
pub mod reminder;

use std::fmt;

use common::define_kind;

pub use self::{
    client::Client, commission::Commission, interaction::Interaction,
    property::Property, reminder::Reminder,
};

define_kind! {
    #[doc = "Kind of a domain entity."]
    enum EntityKind {
        #[doc = "[`Property`] entity."]
        Property = 1,

        #[doc = "[`Client`] entity."]
        Client = 2,

        #[doc = "[`Commission`] entity."]
        Commission = 3,

        #[doc = "[`Interaction`] entity."]
        Interaction = 4,

        #[doc = "[`Reminder`] entity."]
        Reminder = 5,
    }
}

/// Domain entity stored in a [`Database`].
///
/// [`Database`]: crate::infra::Database
pub trait Entity {
    /// ID of this [`Entity`].
    type Id: Copy + fmt::Debug + fmt::Display;

    /// [`EntityKind`] of this [`Entity`].
    const KIND: EntityKind;

    /// Returns the ID of this [`Entity`].
    fn id(&self) -> Self::Id;
}

macro_rules! impl_entity {
    ($($ty:ident => $module:ident),* $(,)?) => {$(
        impl Entity for $ty {
            type Id = $module::Id;

            const KIND: EntityKind = EntityKind::$ty;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    )*};
}

impl_entity! {
    Property => property,
    Client => client,
    Commission => commission,
    Interaction => interaction,
    Reminder => reminder,
}
