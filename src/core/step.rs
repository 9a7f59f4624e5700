//! The step state machine at the core of every consumer.
//!
//! A [`Step`] is the current state of a stream fold: still awaiting input
//! ([`Step::Cont`]), finished ([`Step::Done`]), or finished while holding
//! input it did not consume ([`Step::Early`]). Producers advance a step
//! with [`Step::feed`] until it reports done; composition always builds a
//! new step value.

use std::fmt;

use crate::core::effect::{Effect, Monad};
use crate::core::input::Input;

/// The boxed continuation held by a pending step.
///
/// The closure owns whatever accumulator state the consumer needs; feeding
/// it consumes the step and yields the next one inside the effect.
pub type ContFn<Fx, E, A> =
    Box<dyn FnOnce(Input<E>) -> <Fx as Effect>::Value<Step<Fx, E, A>> + Send>;

/// The state of a stream consumer.
///
/// `Done` and `Early` look the same to a producer - both mean "stop
/// feeding" - except that `Early` carries input the producer must treat as
/// not yet consumed and replay into the next consumer.
pub enum Step<Fx, E, A>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Awaiting more input.
    Cont(ContFn<Fx, E, A>),
    /// Finished with a result and no leftover input.
    Done(A),
    /// Finished with a result plus leftover input to be replayed.
    Early(A, Input<E>),
}

/// Three-arm visitor over a [`Step`].
///
/// `on_early` defaults to delegating to `on_done` for callers that do not
/// care about the leftover.
pub trait StepFolder<Fx, E, A>: Sized
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// The common result type of the arms.
    type Out;

    /// The step is still awaiting input.
    fn on_cont(self, k: ContFn<Fx, E, A>) -> Self::Out;

    /// The step finished with no leftover.
    fn on_done(self, value: A) -> Self::Out;

    /// The step finished holding leftover input.
    fn on_early(self, value: A, leftover: Input<E>) -> Self::Out {
        let _ = leftover;
        self.on_done(value)
    }
}

impl<Fx, E, A> Step<Fx, E, A>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// A pending step from an effectful continuation.
    pub fn cont<K>(k: K) -> Self
    where
        K: FnOnce(Input<E>) -> Fx::Value<Step<Fx, E, A>> + Send + 'static,
    {
        Step::Cont(Box::new(k))
    }

    /// A pending step from a continuation that needs no effect of its own.
    ///
    /// Equivalent to `cont(|input| Fx::pure(k(input)))`.
    pub fn pure_cont<K>(k: K) -> Self
    where
        K: FnOnce(Input<E>) -> Step<Fx, E, A> + Send + 'static,
    {
        Step::Cont(Box::new(move |input| Fx::pure(k(input))))
    }

    /// A finished step with no leftover.
    pub fn done(value: A) -> Self {
        Step::Done(value)
    }

    /// A finished step holding leftover input.
    pub fn early(value: A, leftover: Input<E>) -> Self {
        Step::Early(value, leftover)
    }

    /// Completion triggered by end-of-stream.
    ///
    /// The `End` signal is preserved as leftover so downstream consumers
    /// also see termination.
    pub fn ended(value: A) -> Self {
        Step::Early(value, Input::End)
    }

    /// Returns `true` for `Done` and `Early`, `false` for `Cont`.
    #[inline]
    pub fn is_done(&self) -> bool {
        !matches!(self, Step::Cont(_))
    }

    /// Advance the consumer with one input.
    ///
    /// A finished step yields itself unchanged, performing no effect; a
    /// pending step applies its continuation.
    pub fn feed(self, input: Input<E>) -> Fx::Value<Step<Fx, E, A>> {
        match self {
            Step::Cont(k) => k(input),
            finished => Fx::pure(finished),
        }
    }

    /// Dispatch on the variant with three closures.
    pub fn fold<Z, C, D, Y>(self, on_cont: C, on_done: D, on_early: Y) -> Z
    where
        C: FnOnce(ContFn<Fx, E, A>) -> Z,
        D: FnOnce(A) -> Z,
        Y: FnOnce(A, Input<E>) -> Z,
    {
        match self {
            Step::Cont(k) => on_cont(k),
            Step::Done(value) => on_done(value),
            Step::Early(value, leftover) => on_early(value, leftover),
        }
    }

    /// Dispatch on the variant through a [`StepFolder`].
    pub fn fold_with<F: StepFolder<Fx, E, A>>(self, folder: F) -> F::Out {
        match self {
            Step::Cont(k) => folder.on_cont(k),
            Step::Done(value) => folder.on_done(value),
            Step::Early(value, leftover) => folder.on_early(value, leftover),
        }
    }

    /// Map the eventual result, preserving the variant.
    ///
    /// `Done` stays `Done`, `Early` keeps its leftover, and a pending step
    /// carries the mapping inside its continuation.
    pub fn map<B, F>(self, f: F) -> Step<Fx, E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        match self {
            Step::Done(value) => Step::Done(f(value)),
            Step::Early(value, leftover) => Step::Early(f(value), leftover),
            Step::Cont(k) => {
                Step::Cont(Box::new(move |input| Fx::map(k(input), move |next| next.map(f))))
            }
        }
    }

    /// Sequence a second consumer after this one.
    ///
    /// Leftover input from this consumer is replayed into the next: if the
    /// next consumer is pending it is fed the leftover immediately, and if
    /// it finishes without consuming a fresh input the leftover stays
    /// attached to the combined result. The inner leftover of an
    /// already-finished next consumer is discarded - it never saw a
    /// producer, so only the outer leftover is real unconsumed data.
    pub fn bind<B, F>(self, f: F) -> Fx::Value<Step<Fx, E, B>>
    where
        Fx: Monad,
        B: Send + 'static,
        F: FnOnce(A) -> Fx::Value<Step<Fx, E, B>> + Send + 'static,
    {
        match self {
            Step::Done(value) => f(value),
            Step::Early(value, leftover) => Fx::flat_map(f(value), move |next| match next {
                Step::Cont(k) => k(leftover),
                Step::Done(result) => Fx::pure(Step::Early(result, leftover)),
                Step::Early(result, _) => Fx::pure(Step::Early(result, leftover)),
            }),
            Step::Cont(k) => Fx::pure(Step::Cont(Box::new(move |input| {
                Fx::flat_map(k(input), move |next| next.bind(f))
            }))),
        }
    }

    /// Drive the consumer to completion by feeding end-of-stream.
    ///
    /// A consumer whose continuation never finishes under repeated `End`
    /// feeding makes this diverge; that is a contract violation by the
    /// consumer, not a recoverable condition.
    pub fn run(self) -> Fx::Value<A>
    where
        Fx: Monad,
    {
        match self {
            Step::Done(value) | Step::Early(value, _) => Fx::pure(value),
            Step::Cont(k) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("feeding end into pending step");
                Fx::flat_map(k(Input::End), Step::run)
            }
        }
    }

    /// The final result, if the consumer has finished.
    pub fn into_value(self) -> Option<A> {
        match self {
            Step::Done(value) | Step::Early(value, _) => Some(value),
            Step::Cont(_) => None,
        }
    }

    /// Returns the final result, consuming the step.
    ///
    /// # Panics
    ///
    /// Panics if the step is still awaiting input. Only callers that hold
    /// a step known to be done may use this.
    pub fn unwrap_value(self) -> A {
        match self {
            Step::Done(value) | Step::Early(value, _) => value,
            Step::Cont(_) => panic!("called `Step::unwrap_value()` on a `Cont` step"),
        }
    }
}

impl<Fx, E, A> fmt::Debug for Step<Fx, E, A>
where
    Fx: Effect,
    E: fmt::Debug + Send + 'static,
    A: fmt::Debug + Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Cont(_) => f.write_str("Cont(..)"),
            Step::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Step::Early(value, leftover) => {
                f.debug_tuple("Early").field(value).field(leftover).finish()
            }
        }
    }
}
