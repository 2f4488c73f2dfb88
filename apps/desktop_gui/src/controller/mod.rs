//! Controller layer: UI events and their application to the row list.

pub mod events;
pub mod orchestration;
