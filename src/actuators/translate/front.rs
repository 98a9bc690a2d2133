pub mod api;
pub mod state;

#[cfg(feature = "translate-front")]
pub mod components;

#[cfg(feature = "translate-front")]
pub use components::App;
