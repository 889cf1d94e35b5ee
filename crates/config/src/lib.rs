// Configuration loading

pub mod settings;
pub mod theme;

pub use settings::{Settings, ViewDefaults};
pub use theme::ThemeMode;
