//! [`Command`] definition.

pub mod client;
pub mod commission;
pub mod delete_entity;
pub mod interaction;
pub mod property;
pub mod reminder;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    client::{CreateClient, UpdateClient},
    commission::{CreateCommission, UpdateCommission},
    delete_entity::DeleteEntity,
    interaction::{CreateInteraction, UpdateInteraction},
    property::{CreateProperty, UpdateProperty},
    reminder::{CreateReminder, SetReminderStatus, UpdateReminder},
};
