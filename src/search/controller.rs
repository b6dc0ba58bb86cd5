use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::routing::{Location, NavigationRequest, Route};
use crate::runtime::effect::Effect;
use crate::runtime::event::{AppEvent, TimerEvent};
use crate::runtime::scheduler::{DETAIL_GUARD, SEARCH_DEBOUNCE, SchedulerCommand};
use crate::search::state::SyncState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub query_key: String,
    pub debounce: Duration,
    pub detail_guard: Duration,
    pub listing_path: String,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            query_key: config.search.query_key.clone(),
            debounce: config.search.debounce(),
            detail_guard: config.search.detail_guard(),
            listing_path: config.routes.listing.clone(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Keeps the search box, the URL's query term and the debounced navigation
/// consistent with each other.
///
/// The controller never touches the router itself. It returns [`Effect`]s
/// (navigations and timer schedules) and is told about every route change,
/// including the ones it caused.
#[derive(Debug)]
pub struct SearchSync {
    settings: SyncSettings,
    input: String,
    debouncer: Debouncer<String>,
    state: SyncState,
    last_synced: String,
    location: Location,
    route: Route,
}

impl SearchSync {
    /// Starts from whatever term the URL already carries.
    pub fn new(settings: SyncSettings, location: Location, route: Route) -> Self {
        let term = location
            .param(&settings.query_key)
            .unwrap_or_default()
            .to_string();
        let debouncer = Debouncer::new(term.clone(), settings.debounce);
        Self {
            settings,
            input: term.clone(),
            debouncer,
            state: SyncState::Idle,
            last_synced: term,
            location,
            route,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_typing(&self) -> bool {
        self.state.is_typing()
    }

    pub fn is_suppressed(&self) -> bool {
        self.state.is_suppressed()
    }

    pub fn last_synced(&self) -> &str {
        &self.last_synced
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The term carried by the current URL, empty when absent.
    pub fn url_term(&self) -> &str {
        self.location
            .param(&self.settings.query_key)
            .unwrap_or_default()
    }

    /// The field shows `value` at once; navigation waits for the debounce.
    pub fn on_input(&mut self, value: String, now: Instant) -> Vec<Effect> {
        self.input = value.clone();
        self.debouncer.push(value, now);
        self.state = self.state.on_keystroke();
        trace!(input = %self.input, state = %self.state, "search keystroke");

        vec![
            Effect::Schedule(SchedulerCommand::debounce(
                SEARCH_DEBOUNCE,
                self.settings.debounce,
                AppEvent::Timer(TimerEvent::SearchDebounce),
            )),
            Effect::RequestRender,
        ]
    }

    pub fn on_timer(&mut self, timer: TimerEvent, now: Instant) -> Vec<Effect> {
        match timer {
            TimerEvent::SearchDebounce => self.on_debounce_elapsed(now),
            TimerEvent::DetailGuardElapsed => {
                self.state = self.state.on_guard_elapsed();
                debug!(state = %self.state, "detail guard released");
                Vec::new()
            }
        }
    }

    fn on_debounce_elapsed(&mut self, now: Instant) -> Vec<Effect> {
        let Some(settled) = self.debouncer.poll(now) else {
            trace!("debounce wake-up before the input settled");
            return Vec::new();
        };
        let term = settled.trim().to_string();

        match self.state {
            SyncState::SuppressedAtDetail { typing: true } => {
                debug!(%term, "settled input suppressed at detail page");
                self.state = SyncState::SuppressedAtDetail { typing: false };
                return Vec::new();
            }
            SyncState::Typing => {}
            _ => {
                trace!(%term, state = %self.state, "settled input without typing");
                return Vec::new();
            }
        }

        if term == self.url_term() {
            debug!(%term, "input already matches the url");
            self.state = SyncState::Idle;
            return Vec::new();
        }

        if !term.is_empty() {
            let base = if self.route.is_listing() {
                self.location.clone()
            } else {
                Location::new(&self.settings.listing_path)
            };
            let target = base.with_param(&self.settings.query_key, &term);
            debug!(%term, target_url = %target, "search navigates to listing");
            self.last_synced = term;
            self.state = SyncState::AwaitingNavigation;
            return vec![Effect::Navigate(NavigationRequest::push(target))];
        }

        if self.route.is_listing() {
            let target = self.location.without_param(&self.settings.query_key);
            debug!(target_url = %target, "search cleared on listing");
            self.last_synced.clear();
            self.state = SyncState::AwaitingNavigation;
            return vec![Effect::Navigate(NavigationRequest::replace(target))];
        }

        self.state = SyncState::Idle;
        Vec::new()
    }

    pub fn on_route_changed(&mut self, location: Location, route: Route) -> Vec<Effect> {
        let entered_new_path = !self.location.same_path(&location);
        self.location = location;
        self.route = route;

        let url_term = self.url_term().to_string();
        let mut effects = Vec::new();

        let own_echo =
            self.state == SyncState::AwaitingNavigation && url_term == self.last_synced;
        if self.state == SyncState::AwaitingNavigation {
            self.state = SyncState::Idle;
        }

        if own_echo {
            trace!(%url_term, "route change is our own navigation");
        } else if self.state.is_typing() {
            trace!(%url_term, "url change ignored while typing");
        } else if self.adopt_url_term(&url_term) {
            effects.push(Effect::RequestRender);
        }

        if entered_new_path && self.route.is_detail() && !self.input.trim().is_empty() {
            self.state = SyncState::SuppressedAtDetail {
                typing: self.state.is_typing(),
            };
            debug!(input = %self.input, "detail page entered, suppressing search navigation");
            effects.push(Effect::Schedule(SchedulerCommand::debounce(
                DETAIL_GUARD,
                self.settings.detail_guard,
                AppEvent::Timer(TimerEvent::DetailGuardElapsed),
            )));
        }

        effects
    }

    /// Applies an external URL term to the input. Returns whether the input
    /// changed.
    fn adopt_url_term(&mut self, url_term: &str) -> bool {
        if url_term == self.input {
            self.last_synced = url_term.to_string();
            return false;
        }

        if !url_term.is_empty() {
            debug!(from = %self.input, to = %url_term, "input follows url");
            self.input = url_term.to_string();
        } else if self.route.is_listing() && !self.input.is_empty() {
            debug!(from = %self.input, "url term removed on listing, clearing input");
            self.input.clear();
        } else {
            return false;
        }

        self.last_synced = self.input.clone();
        self.debouncer.reset(self.input.clone());
        true
    }

    /// Tears the controller down. The returned commands cancel its timers so
    /// nothing fires after disposal.
    pub fn dispose(mut self) -> Vec<SchedulerCommand> {
        self.debouncer.cancel();
        vec![
            SchedulerCommand::cancel(SEARCH_DEBOUNCE),
            SchedulerCommand::cancel(DETAIL_GUARD),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchSync, SyncSettings};
    use crate::catalog::ProductId;
    use crate::routing::{HistoryMode, Location, NavigationRequest, Route};
    use crate::runtime::effect::Effect;
    use crate::runtime::event::TimerEvent;
    use crate::runtime::scheduler::{DETAIL_GUARD, SEARCH_DEBOUNCE, SchedulerCommand};
    use crate::search::state::SyncState;
    use std::time::{Duration, Instant};

    fn loc(url: &str) -> Location {
        Location::parse(url).expect("location")
    }

    fn route_of(location: &Location) -> Route {
        match location.path() {
            "/products" => Route::Listing,
            "/about" => Route::About,
            path => match path.strip_prefix("/products/") {
                Some(id) => Route::Detail(ProductId::new(id)),
                None => Route::Other(path.to_string()),
            },
        }
    }

    fn controller(url: &str) -> SearchSync {
        let location = loc(url);
        let route = route_of(&location);
        SearchSync::new(SyncSettings::default(), location, route)
    }

    fn navigations(effects: &[Effect]) -> Vec<NavigationRequest> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Navigate(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn settle(sync: &mut SearchSync, typed_at: Instant) -> Vec<Effect> {
        sync.on_timer(
            TimerEvent::SearchDebounce,
            typed_at + Duration::from_millis(300),
        )
    }

    fn echo(sync: &mut SearchSync, request: &NavigationRequest) -> Vec<Effect> {
        let route = route_of(&request.location);
        sync.on_route_changed(request.location.clone(), route)
    }

    #[test]
    fn adopts_url_term_on_mount() {
        let sync = controller("/products?q=lap");
        assert_eq!(sync.input(), "lap");
        assert_eq!(sync.last_synced(), "lap");
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn keystroke_updates_input_and_schedules_debounce() {
        let now = Instant::now();
        let mut sync = controller("/about");
        let effects = sync.on_input("ph".to_string(), now);

        assert_eq!(sync.input(), "ph");
        assert_eq!(sync.state(), SyncState::Typing);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule(SchedulerCommand::Debounce { key, .. }) if key == SEARCH_DEBOUNCE
        )));
    }

    #[test]
    fn settled_term_navigates_from_any_page() {
        let now = Instant::now();
        let mut sync = controller("/about");
        let _ = sync.on_input(" phone ".to_string(), now);

        let requests = navigations(&settle(&mut sync, now));
        assert_eq!(requests, vec![NavigationRequest::push(loc("/products?q=phone"))]);
        assert_eq!(sync.last_synced(), "phone");
        assert_eq!(sync.state(), SyncState::AwaitingNavigation);
    }

    #[test]
    fn early_wake_up_does_nothing() {
        let now = Instant::now();
        let mut sync = controller("/about");
        let _ = sync.on_input("phone".to_string(), now);

        let effects = sync.on_timer(TimerEvent::SearchDebounce, now + Duration::from_millis(100));
        assert!(effects.is_empty());
        assert!(sync.is_typing());
    }

    #[test]
    fn own_navigation_echo_leaves_input_alone() {
        let now = Instant::now();
        let mut sync = controller("/about");
        let _ = sync.on_input("phone".to_string(), now);
        let requests = navigations(&settle(&mut sync, now));

        let effects = echo(&mut sync, &requests[0]);
        assert!(effects.is_empty());
        assert_eq!(sync.input(), "phone");
        assert_eq!(sync.state(), SyncState::Idle);

        // Seeing the same URL again is a fixed point.
        let again = echo(&mut sync, &requests[0]);
        assert!(again.is_empty());
        assert_eq!(sync.input(), "phone");
    }

    #[test]
    fn listing_keeps_other_params_when_term_changes() {
        let now = Instant::now();
        let mut sync = controller("/products?q=lap&sort=price");
        let _ = sync.on_input("laptop".to_string(), now);

        let requests = navigations(&settle(&mut sync, now));
        assert_eq!(
            requests,
            vec![NavigationRequest::push(loc("/products?q=laptop&sort=price"))]
        );
    }

    #[test]
    fn clearing_on_listing_replaces_url_without_term() {
        let now = Instant::now();
        let mut sync = controller("/products?q=shoes&sort=price");
        let _ = sync.on_input(String::new(), now);

        let requests = navigations(&settle(&mut sync, now));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].mode, HistoryMode::Replace);
        assert_eq!(requests[0].location.to_string(), "/products?sort=price");
        assert_eq!(sync.last_synced(), "");
    }

    #[test]
    fn clearing_elsewhere_does_not_navigate() {
        let now = Instant::now();
        let mut sync = controller("/about");
        let _ = sync.on_input("x".to_string(), now);
        let _ = sync.on_input("   ".to_string(), now + Duration::from_millis(50));

        let effects = sync.on_timer(TimerEvent::SearchDebounce, now + Duration::from_millis(350));
        assert!(navigations(&effects).is_empty());
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn settled_value_equal_to_url_is_steady_state() {
        let now = Instant::now();
        let mut sync = controller("/products?q=lap");
        let _ = sync.on_input("lapt".to_string(), now);
        let _ = sync.on_input("lap".to_string(), now + Duration::from_millis(100));

        let effects = sync.on_timer(TimerEvent::SearchDebounce, now + Duration::from_millis(400));
        assert!(effects.is_empty());
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn external_url_change_updates_input_when_idle() {
        let mut sync = controller("/products?q=phone");
        let effects = sync.on_route_changed(loc("/products?q=tablet"), Route::Listing);

        assert_eq!(effects, vec![Effect::RequestRender]);
        assert_eq!(sync.input(), "tablet");
        assert_eq!(sync.last_synced(), "tablet");
    }

    #[test]
    fn external_url_change_never_overwrites_typing() {
        let now = Instant::now();
        let mut sync = controller("/products?q=phone");
        let _ = sync.on_input("phones".to_string(), now);

        let _ = sync.on_route_changed(loc("/products?q=tablet"), Route::Listing);
        assert_eq!(sync.input(), "phones");
        assert!(sync.is_typing());
    }

    #[test]
    fn empty_url_term_clears_input_only_on_listing() {
        let mut sync = controller("/products?q=phone");
        let _ = sync.on_route_changed(loc("/about"), Route::About);
        assert_eq!(sync.input(), "phone");

        let _ = sync.on_route_changed(loc("/products"), Route::Listing);
        assert_eq!(sync.input(), "");
        assert_eq!(sync.last_synced(), "");
    }

    #[test]
    fn entering_detail_with_a_term_starts_the_guard() {
        let mut sync = controller("/products?q=tablet");
        let detail = loc("/products/7");
        let effects = sync.on_route_changed(detail.clone(), route_of(&detail));

        assert!(sync.is_suppressed());
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule(SchedulerCommand::Debounce { key, delay, .. })
                if key == DETAIL_GUARD && *delay == Duration::from_millis(100)
        )));
        assert_eq!(sync.input(), "tablet");

        let _ = sync.on_timer(TimerEvent::DetailGuardElapsed, Instant::now());
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn entering_detail_without_a_term_is_not_guarded() {
        let mut sync = controller("/products");
        let detail = loc("/products/7");
        let effects = sync.on_route_changed(detail.clone(), route_of(&detail));
        assert!(effects.is_empty());
        assert!(!sync.is_suppressed());
    }

    #[test]
    fn settled_input_during_guard_does_not_navigate() {
        let now = Instant::now();
        let mut sync = controller("/products?q=tablet");
        let _ = sync.on_input("tablets".to_string(), now);
        let detail = loc("/products/7");
        let _ = sync.on_route_changed(detail.clone(), route_of(&detail));
        assert_eq!(sync.state(), SyncState::SuppressedAtDetail { typing: true });

        let effects = settle(&mut sync, now);
        assert!(navigations(&effects).is_empty());
        assert_eq!(sync.state(), SyncState::SuppressedAtDetail { typing: false });
    }

    #[test]
    fn dispose_cancels_both_timers() {
        let sync = controller("/products");
        let commands = sync.dispose();
        assert_eq!(
            commands,
            vec![
                SchedulerCommand::cancel(SEARCH_DEBOUNCE),
                SchedulerCommand::cancel(DETAIL_GUARD),
            ]
        );
    }
}
