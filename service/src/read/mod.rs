//! Read entities definitions.
//!
//! Each entity module provides a `list` of definitions for [`Select`]ing
//! ordered lists of the entity from a [`Database`].
//!
//! [`Database`]: crate::infra::Database
//! [`Select`]: common::operations::Select

pub mod client;
pub mod commission;
pub mod interaction;
pub mod property;
pub mod reminder;
