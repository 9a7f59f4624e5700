//! Core types for the intake library.
//!
//! This module contains the fundamental types that define the consumer
//! model: the input algebra, the step state machine, the effect
//! capability, and the error type carried by the fallible effect.

pub mod effect;
pub mod error;
pub mod input;
pub mod step;

// Re-export core items
pub use effect::{Direct, Effect, Fallible, Monad, Task};
pub use error::{Error, Result};
pub use input::{Input, InputFolder};
pub use step::{ContFn, Step, StepFolder};
