//! Controller layer: UI events and command orchestration around the request lifecycle.

pub mod events;
pub mod orchestration;
