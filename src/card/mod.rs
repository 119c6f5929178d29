pub mod action;
pub mod idle;
pub mod state;
pub mod tilt;

pub use action::{ActionButton, Navigation};
pub use idle::{IdleAnimation, LogoTransform};
pub use state::{
    visible_ratio, CardState, CardView, IdleCommand, InteractionState, MediaCard, Transition,
};
pub use tilt::Tilt;
