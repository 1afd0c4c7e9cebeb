//! UI layer for the desktop GUI: app shell and per-view screens.

pub mod app;

pub use app::DesktopGuiApp;
