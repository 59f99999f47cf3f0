pub mod decide;
pub mod decision;

pub use decide::decide;
pub use decision::{RoutingDecision, RoutingPriority};
