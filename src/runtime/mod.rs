pub mod effect;
pub mod event;
pub mod intent;
pub mod key_bindings;
pub mod reducer;
pub mod runner;
pub mod scheduler;
pub mod state;
pub mod storefront;

pub use runner::Runtime;
pub use storefront::Storefront;
