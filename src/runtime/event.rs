use crate::routing::Location;
use crate::runtime::intent::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SearchDebounce,
    DetailGuardElapsed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Intent(Intent),
    /// The navigator entered `Location`, whoever caused it.
    RouteChanged(Location),
    Timer(TimerEvent),
}
