//! Data store modules

pub mod games;

pub use games::{GameStore, StoreError};
