#[cfg(any(feature = "translate-in", feature = "translate-out"))]
pub mod translate;
