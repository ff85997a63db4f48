pub mod eligibility;
pub mod lifecycle;

pub use eligibility::IneligibleReason;
pub use lifecycle::{DispatchError, TripLifecycle};
