pub mod clock;
pub mod deadline;
pub mod event_bus;

pub use clock::Clock;
pub use deadline::Deadline;
pub use event_bus::{Event, EventBus};
