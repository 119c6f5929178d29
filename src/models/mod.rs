pub mod content_item;
pub mod project;

pub use content_item::*;
pub use project::*;
