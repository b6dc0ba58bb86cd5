pub mod collate;
pub mod filter;
pub mod format;
pub mod product;
pub mod source;

pub use filter::{FilteredCatalog, filter_products};
pub use format::format_price;
pub use product::{Product, ProductId};
pub use source::{JsonCatalog, MemoryCatalog, ProductSource};
