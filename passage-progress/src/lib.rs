//! # passage-progress
//!
//! The learner-journey engine: the per-course [`ProgressStore`], the pure
//! [`gate`] deriving stage display statuses, and [`CertificateEligibility`]
//! driving the request-once certificate flow. All timing is deterministic:
//! callers supply `now`, nothing here spawns timers or threads.

pub mod debounce;
pub mod eligibility;
pub mod gate;
pub mod registry;
pub mod store;

pub use debounce::Debouncer;
pub use eligibility::CertificateEligibility;
pub use gate::{select_stage, stage_status, stage_statuses, GateSnapshot};
pub use registry::StoreRegistry;
pub use store::{AutoSaveStatus, ProgressStore, ReplicationEvent, ReplicationHook};
