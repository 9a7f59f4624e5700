//! The standard consumers.
//!
//! Every consumer here is built the same way: a pending step whose
//! continuation loops, folding each delivery into its accumulator and
//! completing when it has what it needs or when the stream ends. Chunk
//! elements are always processed left to right, and any part of a chunk a
//! consumer declines is handed back as a normalised leftover.

use crate::core::effect::{Effect, Monad};
use crate::core::input::Input;
use crate::core::step::Step;

/// Left-fold every element into an accumulator until end-of-stream.
///
/// Completes as `early(acc, End)` so downstream consumers also see
/// termination.
///
/// # Examples
///
/// ```rust
/// use intake::prelude::*;
///
/// let step: Step<Direct, i32, i32> = fold(0, |acc, el| acc + el);
/// let step = step.feed(Input::Chunk(1, 2, vec![3])).feed(Input::End);
/// assert_eq!(step.into_value(), Some(6));
/// ```
pub fn fold<Fx, E, A, F>(init: A, f: F) -> Step<Fx, E, A>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
    F: Fn(A, E) -> A + Send + 'static,
{
    Step::pure_cont(move |input| match input {
        Input::Empty => fold(init, f),
        Input::El(el) => {
            let acc = f(init, el);
            fold(acc, f)
        }
        Input::Chunk(first, second, rest) => {
            let mut acc = f(f(init, first), second);
            for el in rest {
                acc = f(acc, el);
            }
            fold(acc, f)
        }
        Input::End => Step::ended(init),
    })
}

/// Left-fold with an effectful operation.
///
/// Each chunk element's effect is sequenced left to right before the
/// consumer advances.
pub fn fold_with<Fx, E, A, F>(init: A, f: F) -> Step<Fx, E, A>
where
    Fx: Monad,
    E: Send + 'static,
    A: Send + 'static,
    F: Fn(A, E) -> Fx::Value<A> + Send + 'static,
{
    Step::cont(move |input| match input {
        Input::Empty => Fx::pure(fold_with(init, f)),
        Input::El(el) => {
            let fa = f(init, el);
            advance::<Fx, E, A, F>(fa, Vec::new().into_iter(), f)
        }
        Input::Chunk(first, second, rest) => {
            let mut pending = Vec::with_capacity(1 + rest.len());
            pending.push(second);
            pending.extend(rest);
            let fa = f(init, first);
            advance::<Fx, E, A, F>(fa, pending.into_iter(), f)
        }
        Input::End => Fx::pure(Step::ended(init)),
    })
}

fn advance<Fx, E, A, F>(
    fa: Fx::Value<A>,
    mut pending: std::vec::IntoIter<E>,
    f: F,
) -> Fx::Value<Step<Fx, E, A>>
where
    Fx: Monad,
    E: Send + 'static,
    A: Send + 'static,
    F: Fn(A, E) -> Fx::Value<A> + Send + 'static,
{
    Fx::flat_map(fa, move |acc| match pending.next() {
        Some(el) => {
            let fa = f(acc, el);
            advance::<Fx, E, A, F>(fa, pending, f)
        }
        None => Fx::pure(fold_with(acc, f)),
    })
}

/// Collect every element, in order, until end-of-stream.
pub fn drain<Fx, E>() -> Step<Fx, E, Vec<E>>
where
    Fx: Effect,
    E: Send + 'static,
{
    drain_into()
}

/// Collect every element into any container built from `Default` and
/// `Extend`.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use intake::prelude::*;
///
/// let step: Step<Direct, i32, BTreeSet<i32>> = drain_into();
/// let step = step.feed(Input::Chunk(2, 1, vec![2])).feed(Input::End);
/// assert_eq!(step.into_value(), Some(BTreeSet::from([1, 2])));
/// ```
pub fn drain_into<Fx, E, C>() -> Step<Fx, E, C>
where
    Fx: Effect,
    E: Send + 'static,
    C: Default + Extend<E> + Send + 'static,
{
    collect_loop(C::default())
}

fn collect_loop<Fx, E, C>(acc: C) -> Step<Fx, E, C>
where
    Fx: Effect,
    E: Send + 'static,
    C: Default + Extend<E> + Send + 'static,
{
    Step::pure_cont(move |input| {
        let mut acc = acc;
        match input {
            Input::Empty => collect_loop(acc),
            Input::El(el) => {
                acc.extend(std::iter::once(el));
                collect_loop(acc)
            }
            Input::Chunk(first, second, rest) => {
                acc.extend(std::iter::once(first).chain(std::iter::once(second)).chain(rest));
                collect_loop(acc)
            }
            Input::End => Step::ended(acc),
        }
    })
}

/// Count elements until end-of-stream.
pub fn length<Fx, E>() -> Step<Fx, E, usize>
where
    Fx: Effect,
    E: Send + 'static,
{
    count_loop(0)
}

fn count_loop<Fx, E>(count: usize) -> Step<Fx, E, usize>
where
    Fx: Effect,
    E: Send + 'static,
{
    Step::pure_cont(move |input| match input {
        Input::Empty => count_loop(count),
        Input::El(_) => count_loop(count + 1),
        Input::Chunk(_, _, rest) => count_loop(count + 2 + rest.len()),
        Input::End => Step::ended(count),
    })
}

/// Consume exactly one element.
///
/// Completes `Done(Some(el))` on a single element (it was consumed), hands
/// back the unconsumed tail of a chunk, and completes `Early(None, End)`
/// on an empty stream.
pub fn head<Fx, E>() -> Step<Fx, E, Option<E>>
where
    Fx: Effect,
    E: Send + 'static,
{
    Step::pure_cont(|input| match input {
        Input::Empty => head(),
        Input::El(el) => Step::done(Some(el)),
        Input::Chunk(first, second, rest) => {
            let mut remainder = Vec::with_capacity(1 + rest.len());
            remainder.push(second);
            remainder.extend(rest);
            Step::early(Some(first), Input::from_vec(remainder))
        }
        Input::End => Step::early(None, Input::End),
    })
}

/// Observe the next element without consuming anything.
///
/// The entire input just fed comes back as leftover.
pub fn peek<Fx, E>() -> Step<Fx, E, Option<E>>
where
    Fx: Effect,
    E: Clone + Send + 'static,
{
    Step::pure_cont(|input: Input<E>| match input {
        Input::Empty => peek(),
        Input::El(el) => {
            let seen = el.clone();
            Step::early(Some(seen), Input::El(el))
        }
        Input::Chunk(first, second, rest) => {
            let seen = first.clone();
            Step::early(Some(seen), Input::Chunk(first, second, rest))
        }
        Input::End => Step::early(None, Input::End),
    })
}

/// Collect up to `count` elements in order.
///
/// Completes `Done` when the count is hit exactly at a delivery boundary;
/// a chunk that overshoots is split and the surplus handed back
/// normalised.
pub fn take<Fx, E>(count: usize) -> Step<Fx, E, Vec<E>>
where
    Fx: Effect,
    E: Send + 'static,
{
    if count == 0 {
        return Step::done(Vec::new());
    }
    take_loop(Vec::new(), count)
}

// Invariant: remaining >= 1.
fn take_loop<Fx, E>(acc: Vec<E>, remaining: usize) -> Step<Fx, E, Vec<E>>
where
    Fx: Effect,
    E: Send + 'static,
{
    Step::pure_cont(move |input| {
        let mut acc = acc;
        match input {
            Input::Empty => take_loop(acc, remaining),
            Input::El(el) => {
                acc.push(el);
                if remaining == 1 {
                    Step::done(acc)
                } else {
                    take_loop(acc, remaining - 1)
                }
            }
            Input::Chunk(first, second, rest) => {
                let mut elements = Vec::with_capacity(2 + rest.len());
                elements.push(first);
                elements.push(second);
                elements.extend(rest);
                if elements.len() < remaining {
                    let consumed = elements.len();
                    acc.extend(elements);
                    take_loop(acc, remaining - consumed)
                } else if elements.len() == remaining {
                    acc.extend(elements);
                    Step::done(acc)
                } else {
                    let surplus = elements.split_off(remaining);
                    acc.extend(elements);
                    Step::early(acc, Input::from_vec(surplus))
                }
            }
            Input::End => Step::early(acc, Input::End),
        }
    })
}

/// Collect the longest prefix of elements satisfying `predicate`.
///
/// The first failing element onward comes back as leftover.
pub fn take_while<Fx, E, P>(predicate: P) -> Step<Fx, E, Vec<E>>
where
    Fx: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    span_loop(Vec::new(), predicate)
}

fn span_loop<Fx, E, P>(acc: Vec<E>, predicate: P) -> Step<Fx, E, Vec<E>>
where
    Fx: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    Step::pure_cont(move |input| {
        let mut acc = acc;
        match input {
            Input::Empty => span_loop(acc, predicate),
            Input::El(el) => {
                if predicate(&el) {
                    acc.push(el);
                    span_loop(acc, predicate)
                } else {
                    Step::early(acc, Input::El(el))
                }
            }
            Input::Chunk(first, second, rest) => {
                let mut elements = Vec::with_capacity(2 + rest.len());
                elements.push(first);
                elements.push(second);
                elements.extend(rest);
                match elements.iter().position(|el| !predicate(el)) {
                    None => {
                        acc.extend(elements);
                        span_loop(acc, predicate)
                    }
                    Some(at) => {
                        let failing = elements.split_off(at);
                        acc.extend(elements);
                        Step::early(acc, Input::from_vec(failing))
                    }
                }
            }
            Input::End => Step::early(acc, Input::End),
        }
    })
}

/// Discard up to `count` elements.
pub fn skip<Fx, E>(count: usize) -> Step<Fx, E, ()>
where
    Fx: Effect,
    E: Send + 'static,
{
    if count == 0 {
        return Step::done(());
    }
    skip_loop(count)
}

// Invariant: remaining >= 1.
fn skip_loop<Fx, E>(remaining: usize) -> Step<Fx, E, ()>
where
    Fx: Effect,
    E: Send + 'static,
{
    Step::pure_cont(move |input| match input {
        Input::Empty => skip_loop(remaining),
        Input::El(_) => {
            if remaining == 1 {
                Step::done(())
            } else {
                skip_loop(remaining - 1)
            }
        }
        Input::Chunk(first, second, rest) => {
            let len = 2 + rest.len();
            if len < remaining {
                skip_loop(remaining - len)
            } else if len == remaining {
                Step::done(())
            } else {
                let mut elements = Vec::with_capacity(len);
                elements.push(first);
                elements.push(second);
                elements.extend(rest);
                let kept = elements.split_off(remaining);
                Step::early((), Input::from_vec(kept))
            }
        }
        Input::End => Step::early((), Input::End),
    })
}

/// Discard elements while `predicate` holds.
///
/// The first failing element onward comes back as leftover.
pub fn skip_while<Fx, E, P>(predicate: P) -> Step<Fx, E, ()>
where
    Fx: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    Step::pure_cont(move |input| match input {
        Input::Empty => skip_while(predicate),
        Input::El(el) => {
            if predicate(&el) {
                skip_while(predicate)
            } else {
                Step::early((), Input::El(el))
            }
        }
        Input::Chunk(first, second, rest) => {
            let mut elements = Vec::with_capacity(2 + rest.len());
            elements.push(first);
            elements.push(second);
            elements.extend(rest);
            match elements.iter().position(|el| !predicate(el)) {
                None => skip_while(predicate),
                Some(at) => {
                    let kept = elements.split_off(at);
                    Step::early((), Input::from_vec(kept))
                }
            }
        }
        Input::End => Step::early((), Input::End),
    })
}
