use std::time::Instant;

use tracing::{debug, trace};

use crate::routing::{NavigationRequest, Route};
use crate::runtime::effect::{Effect, HistoryStep};
use crate::runtime::intent::Intent;
use crate::runtime::state::StorefrontState;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut StorefrontState, intent: Intent, now: Instant) -> Vec<Effect> {
        match intent {
            Intent::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Intent::InsertChar(ch) => {
                let mut value = state.search().input().to_string();
                value.push(ch);
                state.search_mut().on_input(value, now)
            }
            Intent::DeleteChar => {
                let mut value = state.search().input().to_string();
                if value.pop().is_none() {
                    return Vec::new();
                }
                state.search_mut().on_input(value, now)
            }
            Intent::ClearSearch => {
                if state.search().input().is_empty() {
                    return Vec::new();
                }
                state.search_mut().on_input(String::new(), now)
            }
            Intent::SetSearch(value) => state.search_mut().on_input(value, now),
            Intent::SelectNext => select(state, 1),
            Intent::SelectPrev => select(state, -1),
            Intent::OpenSelected => {
                let index = state.selected();
                open_product(state, index)
            }
            Intent::OpenProduct(index) => open_product(state, index),
            Intent::NextPage => step_page(state, true),
            Intent::PrevPage => step_page(state, false),
            Intent::GoToPage(page) => {
                if !state.route().is_listing() {
                    return Vec::new();
                }
                change_page(state, page)
            }
            Intent::Scroll(delta) => {
                state.scroll_by(delta);
                vec![Effect::RequestRender]
            }
            Intent::OpenRoute(route) => {
                let target = state.routes().location_of(&route);
                vec![Effect::Navigate(NavigationRequest::push(target))]
            }
            Intent::Back => vec![Effect::History(HistoryStep::Back)],
            Intent::Forward => vec![Effect::History(HistoryStep::Forward)],
            Intent::Reload => vec![Effect::ReloadCatalog],
            Intent::Noop => Vec::new(),
        }
    }
}

fn select(state: &mut StorefrontState, delta: isize) -> Vec<Effect> {
    if state.route().is_listing() && state.move_selection(delta) {
        vec![Effect::RequestRender]
    } else {
        Vec::new()
    }
}

fn open_product(state: &mut StorefrontState, index: usize) -> Vec<Effect> {
    if !state.route().is_listing() {
        return Vec::new();
    }
    let Some(product) = state.listing().current_items().get(index) else {
        trace!(index, "no product at index on this page");
        return Vec::new();
    };
    let target = state
        .routes()
        .location_of(&Route::Detail(product.id.clone()));
    vec![Effect::Navigate(NavigationRequest::push(target))]
}

/// Previous/next behave like the pager buttons: disabled at the edges.
fn step_page(state: &mut StorefrontState, forward: bool) -> Vec<Effect> {
    if !state.route().is_listing() {
        return Vec::new();
    }
    let controls = state.listing().controls();
    let enabled = if forward {
        controls.next_enabled
    } else {
        controls.previous_enabled
    };
    if !enabled {
        trace!(page = controls.current, total = controls.total, "pager button disabled");
        return Vec::new();
    }
    let target = if forward {
        controls.current + 1
    } else {
        controls.current - 1
    };
    change_page(state, target)
}

fn change_page(state: &mut StorefrontState, page: usize) -> Vec<Effect> {
    let change = state.listing_mut().request_page(page);
    state.reset_selection();
    debug!(from = change.from, to = change.to, "page changed");
    vec![Effect::ScrollToTop, Effect::RequestRender]
}
