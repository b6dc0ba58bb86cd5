use std::sync::Arc;

use crate::catalog::{FilteredCatalog, Product, ProductId};
use crate::config::Config;
use crate::error::Result;
use crate::pagination::Paginator;
use crate::routing::{Location, Route, RouteTable};
use crate::runtime::effect::Effect;
use crate::search::{SearchSync, SyncSettings};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Found(Product),
    NotFound(ProductId),
    Unavailable { id: ProductId, reason: String },
}

/// Everything the storefront screens read: the search controller, the
/// filtered and paginated listing, and the current route.
#[derive(Debug)]
pub struct StorefrontState {
    routes: RouteTable,
    search: SearchSync,
    catalog: FilteredCatalog,
    paginator: Paginator<Product>,
    location: Location,
    route: Route,
    detail: Option<DetailView>,
    selected: usize,
    scroll_offset: usize,
    scroll_resets: usize,
    notice: Option<String>,
    exit_requested: bool,
}

impl StorefrontState {
    pub fn new(
        config: &Config,
        location: Location,
        products: Arc<[Product]>,
    ) -> Result<Self> {
        let routes = RouteTable::new(&config.routes)?;
        let route = routes.resolve(&location);
        let search = SearchSync::new(
            SyncSettings::from_config(config),
            location.clone(),
            route.clone(),
        );
        let catalog = FilteredCatalog::new(products, search.url_term());
        let paginator =
            Paginator::with_source(Arc::clone(catalog.result()), config.items_per_page());

        Ok(Self {
            routes,
            search,
            catalog,
            paginator,
            location,
            route,
            detail: None,
            selected: 0,
            scroll_offset: 0,
            scroll_resets: 0,
            notice: None,
            exit_requested: false,
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn search(&self) -> &SearchSync {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchSync {
        &mut self.search
    }

    pub fn into_search(self) -> SearchSync {
        self.search
    }

    pub fn catalog(&self) -> &FilteredCatalog {
        &self.catalog
    }

    pub fn listing(&self) -> &Paginator<Product> {
        &self.paginator
    }

    pub fn listing_mut(&mut self) -> &mut Paginator<Product> {
        &mut self.paginator
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn set_detail(&mut self, detail: Option<DetailView>) {
        self.detail = detail;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.paginator.current_items().get(self.selected)
    }

    /// Moves the listing cursor within the current page.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.paginator.current_items().len();
        if len == 0 {
            return false;
        }
        let next = self
            .selected
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
        let moved = next != self.selected;
        self.selected = next;
        moved
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    /// Number of times the viewport was sent back to the top.
    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.scroll_resets += 1;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Takes in a location the navigator entered. The search controller sees
    /// it first; the listing is then re-derived from the URL term.
    pub fn apply_route(&mut self, location: Location, detail: Option<DetailView>) -> Vec<Effect> {
        let route = self.routes.resolve(&location);
        let path_changed = !self.location.same_path(&location);
        self.location = location.clone();
        self.route = route.clone();
        self.detail = detail;

        let mut effects = self.search.on_route_changed(location, route);
        self.refresh_listing();
        if path_changed {
            effects.push(Effect::ScrollToTop);
        }
        effects.push(Effect::RequestRender);
        effects
    }

    /// Swaps in a freshly fetched product collection.
    pub fn replace_products(&mut self, products: Arc<[Product]>) {
        let term = self.search.url_term().to_string();
        self.catalog.refresh(&products, &term);
        self.sync_paginator();
    }

    fn refresh_listing(&mut self) {
        let term = self.search.url_term().to_string();
        self.catalog.set_term(&term);
        self.sync_paginator();
    }

    fn sync_paginator(&mut self) {
        if self.paginator.set_source(Arc::clone(self.catalog.result())) {
            self.selected = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StorefrontState;
    use crate::catalog::Product;
    use crate::config::Config;
    use crate::routing::Location;
    use crate::runtime::effect::Effect;
    use std::sync::Arc;

    fn products() -> Arc<[Product]> {
        (1..=8)
            .map(|n| Product::new(n.to_string(), format!("Phone {n}"), 100.0))
            .collect()
    }

    fn state(url: &str) -> StorefrontState {
        let location = Location::parse(url).expect("location");
        StorefrontState::new(&Config::default(), location, products()).expect("state")
    }

    #[test]
    fn listing_is_filtered_by_the_url_term() {
        let state = state("/products?q=phone 1");
        assert_eq!(state.catalog().result().len(), 1);
        assert_eq!(state.listing().total_pages(), 1);
    }

    #[test]
    fn new_term_resets_page_and_selection() {
        let mut state = state("/products");
        let _ = state.listing_mut().request_page(2);
        state.move_selection(1);
        assert_eq!(state.selected(), 1);

        let effects = state.apply_route(Location::parse("/products?q=phone").expect("location"), None);
        assert_eq!(state.listing().current_page(), 1);
        assert_eq!(state.selected(), 0);
        assert!(!effects.contains(&Effect::ScrollToTop));
    }

    #[test]
    fn path_change_scrolls_to_top() {
        let mut state = state("/products");
        let effects = state.apply_route(Location::parse("/about").expect("location"), None);
        assert!(effects.contains(&Effect::ScrollToTop));
    }

    #[test]
    fn selection_stays_within_the_page() {
        let mut state = state("/products");
        assert!(!state.move_selection(-1));
        for _ in 0..20 {
            state.move_selection(1);
        }
        assert_eq!(state.selected(), 5);
        assert_eq!(
            state.selected_product().map(|p| p.name.as_str()),
            Some("Phone 6")
        );
    }
}
