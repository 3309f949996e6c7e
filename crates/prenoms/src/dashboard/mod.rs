//! HTTP surface of the dashboard. Every request recomputes its view from the
//! shared immutable table; nothing is cached between requests.

pub mod options;
pub mod params;
pub mod router;


pub use options::DashboardOptions;
pub use params::{DepartmentParams, FilterParams};
pub use router::{dashboard_router, DashboardState};
