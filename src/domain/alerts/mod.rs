//! Price-alert aggregate: default thresholds and subscriptions.

pub mod subscription;
pub mod thresholds;

pub use subscription::*;
pub use thresholds::*;
