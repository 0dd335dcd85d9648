#[cfg(test)]
pub mod fakes;
mod quiz;
mod scheduler;

pub use quiz::*;
pub use scheduler::*;
