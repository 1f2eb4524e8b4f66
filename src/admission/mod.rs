//! Admission control logic and per-client state management.

mod controller;
mod counter;
mod decision;
mod policy;

pub use controller::{AdmissionController, DEFAULT_MAX_TRACKED_CLIENTS};
pub use decision::{
    Decision, LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER, RETRY_AFTER_HEADER, UNKNOWN_CLIENT,
};
pub use policy::Policy;
