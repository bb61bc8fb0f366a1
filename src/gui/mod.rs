pub mod app;
mod comparison_view;
mod error_modal;
mod form_panel;
mod login;
mod message_overlay;
pub mod settings;
mod theme;
mod top_bar;

pub use app::CompareApp;
