use uuid::Uuid;

pub mod actuators;
pub mod config;
pub mod infer;
pub mod prompts;

#[cfg(feature = "translate-in")]
pub mod service;

pub trait Identifiable {
    fn get_id(&self) -> Uuid;
}
