//! Background [`Task`]s definitions.

mod background;
pub mod schedule_contract_renewals;

pub use common::Handler as Task;

pub use self::{
    background::{Background, Failure},
    schedule_contract_renewals::ScheduleContractRenewals,
};
