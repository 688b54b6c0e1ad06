// Client-side navigation: route table, session guard, router, cancellation

pub mod cancel;
pub mod guard;
pub mod navigator;
pub mod routes;

pub use cancel::{Cancelled, NavigationScope, NavigationToken};
pub use guard::{GuardDecision, SessionGuard};
pub use navigator::{Navigation, NavigationError, Navigator};
pub use routes::{match_route, Page, RouteDef};
