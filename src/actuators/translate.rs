pub mod dto;

#[cfg(feature = "translate-in")]
pub mod back;

#[cfg(feature = "translate-out")]
pub mod front;
