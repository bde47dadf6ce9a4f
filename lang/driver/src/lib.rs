mod cache;
mod config;
mod dependency_graph;
mod render_reports;
mod result;
mod session;

pub use config::*;
pub use dependency_graph::{topo_sort_book, DependencyGraph};
pub use render_reports::*;
pub use result::*;
pub use session::*;
