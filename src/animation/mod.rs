pub mod registry;

pub use registry::{AnimationHandle, AnimationRegistry};
