pub mod history;
pub mod location;
pub mod route;

pub use history::{HistoryMode, MemoryHistory, NavigationRequest, Navigator};
pub use location::Location;
pub use route::{Route, RouteTable};
