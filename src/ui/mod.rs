pub mod card_widget;
pub mod contact_panel;
pub mod style;
pub mod window;

pub use window::MainWindow;
