//! # Iteratee-style streaming consumers for Rust
//!
//! This crate provides composable stream consumers: values that are fed
//! input chunk by chunk and eventually complete with a result, possibly
//! handing back the input they did not consume.
//!
//! ## Core Concepts
//!
//! - **Input**: what a producer delivers at each feed - nothing yet, one
//!   element, a chunk of elements, or end-of-stream
//! - **Step**: the consumer's current state - awaiting input (`Cont`),
//!   finished (`Done`), or finished with leftover input (`Early`)
//! - **Effect**: the capability a step sequences its work through, so the
//!   same consumers run synchronously, fallibly, or as futures
//!
//! ## Example
//!
//! ```rust
//! use intake::prelude::*;
//!
//! let step: Step<Direct, i32, Vec<i32>> = take(3);
//! let step = step.feed(Input::Chunk(1, 2, vec![3, 4, 5]));
//!
//! assert!(step.is_done());
//! assert_eq!(step.into_value(), Some(vec![1, 2, 3]));
//! ```
//!
//! A producer drives a step by calling [`Step::feed`] in a loop until the
//! step reports [`Step::is_done`]; whatever leftover an `Early` step
//! carries belongs to the next consumer in the pipeline.

pub mod combinators;
pub mod consumers;
pub mod core;

// Re-export commonly used items
pub mod prelude {
    pub use crate::combinators::{join, lift, zip};
    pub use crate::consumers::{
        drain, drain_into, fold, fold_with, head, length, peek, skip, skip_while, take, take_while,
    };
    pub use crate::core::{
        ContFn, Direct, Effect, Error, Fallible, Input, InputFolder, Monad, Result, Step,
        StepFolder, Task,
    };
}

// Re-export main error type
pub use crate::core::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
