pub mod shift_override;
pub mod tracked;
pub mod window;

pub use shift_override::{OverrideRecord, OverrideRequest};
pub use tracked::TrackedOverride;
pub use window::{OverrideWindow, PastWindowRule};
