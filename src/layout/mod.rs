pub mod catalog;
pub mod grid_plan;
pub mod resolver;

pub use catalog::CATALOG;
pub use grid_plan::GridPlan;
pub use resolver::{resolve_layout, LayoutSelection};
