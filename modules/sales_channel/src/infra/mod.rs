//! Infrastructure layer - storage and event delivery adapters

pub mod events;
pub mod storage;
