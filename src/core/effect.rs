//! Effect capabilities that steps sequence their work through.
//!
//! A step never blocks, spawns, or performs I/O itself; everything
//! effectful flows through the capability supplied as its `Fx` parameter.
//! [`Effect`] is the functor-level capability (`pure` and `map`) and is
//! all that `Step::map` and `lift` require; [`Monad`] adds `flat_map` for
//! the operations that chain effectful continuations (`bind`, `run`,
//! `join`, `zip`, and the effectful collectors).
//!
//! Three capabilities ship with the crate:
//!
//! - [`Direct`] runs everything immediately (`Value<T> = T`)
//! - [`Fallible`] short-circuits on [`Error`](crate::core::Error)
//! - [`Task`] defers work into boxed `Send` futures

use futures::future::{self, BoxFuture, FutureExt};

use crate::core::error::Error;

/// The functor-level capability: lifting values in and mapping over them.
///
/// Implementations must satisfy the usual laws: `map(pure(a), f)` equals
/// `pure(f(a))`, `map(fa, id)` equals `fa`, and mapping composes.
pub trait Effect: 'static {
    /// An effectful computation producing a `T`.
    type Value<T: Send + 'static>: Send + 'static;

    /// Lift a plain value into the effect without performing anything.
    fn pure<T: Send + 'static>(value: T) -> Self::Value<T>;

    /// Apply a function to the eventual result of `fa`.
    fn map<T, U, F>(fa: Self::Value<T>, f: F) -> Self::Value<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static;
}

/// The monad-level capability: sequencing dependent effectful work.
///
/// `flat_map` must agree with [`Effect::map`] (`map(fa, f)` equals
/// `flat_map(fa, |a| pure(f(a)))`) and be associative.
pub trait Monad: Effect {
    /// Run `fa`, then run the computation its result selects.
    fn flat_map<T, U, K>(fa: Self::Value<T>, k: K) -> Self::Value<U>
    where
        T: Send + 'static,
        U: Send + 'static,
        K: FnOnce(T) -> Self::Value<U> + Send + 'static;
}

/// The synchronous effect: computations are plain values, run eagerly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Effect for Direct {
    type Value<T: Send + 'static> = T;

    fn pure<T: Send + 'static>(value: T) -> T {
        value
    }

    fn map<T, U, F>(fa: T, f: F) -> U
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        f(fa)
    }
}

impl Monad for Direct {
    fn flat_map<T, U, K>(fa: T, k: K) -> U
    where
        T: Send + 'static,
        U: Send + 'static,
        K: FnOnce(T) -> U + Send + 'static,
    {
        k(fa)
    }
}

/// The fallible effect: computations short-circuit on the first [`Error`].
///
/// User failures inside a consumer (for example the operation given to
/// `fold_with`) propagate through this channel; the step layer itself
/// never constructs an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallible;

impl Effect for Fallible {
    type Value<T: Send + 'static> = Result<T, Error>;

    fn pure<T: Send + 'static>(value: T) -> Result<T, Error> {
        Ok(value)
    }

    fn map<T, U, F>(fa: Result<T, Error>, f: F) -> Result<U, Error>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        fa.map(f)
    }
}

impl Monad for Fallible {
    fn flat_map<T, U, K>(fa: Result<T, Error>, k: K) -> Result<U, Error>
    where
        T: Send + 'static,
        U: Send + 'static,
        K: FnOnce(T) -> Result<U, Error> + Send + 'static,
    {
        fa.and_then(k)
    }
}

/// The asynchronous effect: computations are boxed `Send` futures.
///
/// Continuations built over `Task` suspend wherever the host runtime
/// wishes; the step layer only sequences them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Task;

impl Effect for Task {
    type Value<T: Send + 'static> = BoxFuture<'static, T>;

    fn pure<T: Send + 'static>(value: T) -> BoxFuture<'static, T> {
        future::ready(value).boxed()
    }

    fn map<T, U, F>(fa: BoxFuture<'static, T>, f: F) -> BoxFuture<'static, U>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        fa.map(f).boxed()
    }
}

impl Monad for Task {
    fn flat_map<T, U, K>(fa: BoxFuture<'static, T>, k: K) -> BoxFuture<'static, U>
    where
        T: Send + 'static,
        U: Send + 'static,
        K: FnOnce(T) -> BoxFuture<'static, U> + Send + 'static,
    {
        fa.then(k).boxed()
    }
}
