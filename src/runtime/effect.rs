use crate::routing::NavigationRequest;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Back,
    Forward,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(NavigationRequest),
    History(HistoryStep),
    Schedule(SchedulerCommand),
    ReloadCatalog,
    ScrollToTop,
    RequestRender,
}
