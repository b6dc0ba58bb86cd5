pub mod controller;
pub mod state;

pub use controller::{SearchSync, SyncSettings};
pub use state::SyncState;
