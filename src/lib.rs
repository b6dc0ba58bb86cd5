pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod routing;
pub mod runtime;
pub mod search;
pub mod terminal;
pub mod ui;

pub use error::{Error, Result};
pub use runtime::{Runtime, Storefront};
