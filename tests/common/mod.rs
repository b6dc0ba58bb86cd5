#![allow(dead_code)]

use std::time::{Duration, Instant};

use vitrina::Storefront;
use vitrina::catalog::{MemoryCatalog, Product, ProductSource};
use vitrina::config::Config;
use vitrina::routing::{Location, MemoryHistory, Navigator};
use vitrina::runtime::intent::Intent;

pub type TestStorefront = Storefront<MemoryCatalog, MemoryHistory>;

pub const DEBOUNCE: Duration = Duration::from_millis(300);
pub const GUARD: Duration = Duration::from_millis(100);

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

pub fn loc(url: &str) -> Location {
    Location::parse(url).expect("valid location")
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new("1", "Smartphone X", 899.0).with_category("Phones"),
        Product::new("2", "Laptop Air", 1299.0).with_category("Computers"),
        Product::new("3", "Phone Case", 19.9).with_category("Accessories"),
        Product::new("4", "Headphones Pro", 249.0).with_category("Audio"),
        Product::new("5", "Tablet Mini", 499.0).with_category("Tablets"),
        Product::new("6", "Laptop Pro", 2199.0).with_category("Computers"),
        Product::new("7", "USB Cable", 9.0),
    ]
}

pub fn numbered(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|n| Product::new(n.to_string(), format!("Item {n:02}"), n as f64))
        .collect()
}

pub fn storefront(url: &str) -> TestStorefront {
    storefront_with(url, products(), Config::default())
}

pub fn storefront_with(url: &str, products: Vec<Product>, config: Config) -> TestStorefront {
    Storefront::new(
        &config,
        MemoryCatalog::new(products),
        MemoryHistory::new(loc(url)),
    )
    .expect("storefront")
}

/// Types `text` one character every 10ms starting at `start`. Returns the
/// instant of the last keystroke.
pub fn type_text(storefront: &mut TestStorefront, text: &str, start: Instant) -> Instant {
    let mut now = start;
    for (index, ch) in text.chars().enumerate() {
        now = start + ms(10 * index as u64);
        storefront.intent(Intent::InsertChar(ch), now);
    }
    now
}

pub fn current_url<S: ProductSource, N: Navigator>(storefront: &Storefront<S, N>) -> String {
    storefront.navigator().location().to_string()
}

pub fn listed_names<S: ProductSource, N: Navigator>(storefront: &Storefront<S, N>) -> Vec<String> {
    storefront
        .state()
        .listing()
        .current_items()
        .iter()
        .map(|product| product.name.clone())
        .collect()
}
