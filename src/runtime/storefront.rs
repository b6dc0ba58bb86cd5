use std::time::{Duration, Instant};

use tracing::warn;

use crate::catalog::{ProductId, ProductSource};
use crate::config::Config;
use crate::error::Result;
use crate::routing::{Location, Navigator, Route};
use crate::runtime::effect::{Effect, HistoryStep};
use crate::runtime::event::AppEvent;
use crate::runtime::intent::Intent;
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::runtime::state::{DetailView, StorefrontState};

/// Headless storefront: state, collaborators and timers behind a single
/// event queue. Time is always supplied by the caller.
pub struct Storefront<S, N> {
    state: StorefrontState,
    source: S,
    navigator: N,
    scheduler: Scheduler,
    render_requested: bool,
}

impl<S: ProductSource, N: Navigator> Storefront<S, N> {
    pub fn new(config: &Config, source: S, navigator: N) -> Result<Self> {
        config.validate()?;
        let products = source.list_products()?;
        let location = navigator.location().clone();
        let mut state = StorefrontState::new(config, location, products)?;
        if let Route::Detail(id) = state.route().clone() {
            state.set_detail(Some(lookup_detail(&source, id)));
        }

        Ok(Self {
            state,
            source,
            navigator,
            scheduler: Scheduler::new(),
            render_requested: true,
        })
    }

    pub fn state(&self) -> &StorefrontState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn intent(&mut self, intent: Intent, now: Instant) {
        self.dispatch(AppEvent::Intent(intent), now);
    }

    /// Queues `event` and processes everything that is ready at `now`,
    /// including the route changes and timers it causes.
    pub fn dispatch(&mut self, event: AppEvent, now: Instant) {
        self.scheduler.schedule(SchedulerCommand::EmitNow(event), now);
        self.advance(now);
    }

    /// Fires every timer due at `now`.
    pub fn advance(&mut self, now: Instant) {
        while let Some(event) = self.scheduler.next_ready(now) {
            let effects = self.handle_event(event, now);
            self.apply_effects(effects, now);
        }
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Unmounts the storefront. The search controller's timers are cancelled
    /// before the scheduler is handed back.
    pub fn shutdown(self) -> Scheduler {
        let Self {
            state,
            mut scheduler,
            ..
        } = self;
        let now = Instant::now();
        for command in state.into_search().dispose() {
            scheduler.schedule(command, now);
        }
        scheduler
    }

    fn handle_event(&mut self, event: AppEvent, now: Instant) -> Vec<Effect> {
        match event {
            AppEvent::Intent(intent) => Reducer::reduce(&mut self.state, intent, now),
            AppEvent::RouteChanged(location) => self.route_changed(location),
            AppEvent::Timer(timer) => self.state.search_mut().on_timer(timer, now),
        }
    }

    fn route_changed(&mut self, location: Location) -> Vec<Effect> {
        let detail = match self.state.routes().resolve(&location) {
            Route::Detail(id) => Some(lookup_detail(&self.source, id)),
            _ => None,
        };
        self.state.apply_route(location, detail)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Navigate(request) => {
                    self.navigator.navigate(request);
                    self.queue_route_changes(now);
                }
                Effect::History(step) => {
                    let moved = match step {
                        HistoryStep::Back => self.navigator.back(),
                        HistoryStep::Forward => self.navigator.forward(),
                    };
                    if moved {
                        self.queue_route_changes(now);
                    }
                }
                Effect::Schedule(command) => self.scheduler.schedule(command, now),
                Effect::ReloadCatalog => self.reload_catalog(),
                Effect::ScrollToTop => self.state.scroll_to_top(),
                Effect::RequestRender => self.render_requested = true,
            }
        }
    }

    fn queue_route_changes(&mut self, now: Instant) {
        for location in self.navigator.drain_changes() {
            self.scheduler
                .schedule(SchedulerCommand::EmitNow(AppEvent::RouteChanged(location)), now);
        }
    }

    fn reload_catalog(&mut self) {
        match self.source.list_products() {
            Ok(products) => {
                self.state.replace_products(products);
                self.state.set_notice(None);
            }
            Err(err) => {
                warn!(error = %err, "catalog reload failed, keeping previous products");
                self.state.set_notice(Some(format!("Could not reload products: {err}")));
            }
        }
        self.render_requested = true;
    }
}

fn lookup_detail<S: ProductSource>(source: &S, id: ProductId) -> DetailView {
    match source.product_by_id(&id) {
        Ok(Some(product)) => DetailView::Found(product),
        Ok(None) => DetailView::NotFound(id),
        Err(err) => {
            warn!(%id, error = %err, "product lookup failed");
            DetailView::Unavailable {
                id,
                reason: err.to_string(),
            }
        }
    }
}
