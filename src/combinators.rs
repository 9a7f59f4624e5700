//! Combinators over steps: lifting effects in, collapsing nested
//! consumers, and running two consumers over one stream.

use crate::core::effect::{Effect, Monad};
use crate::core::input::Input;
use crate::core::step::{ContFn, Step};

/// Wrap an effectful value into a step that completes with it.
///
/// The resulting step consumes no input.
pub fn lift<Fx, E, A>(fa: Fx::Value<A>) -> Fx::Value<Step<Fx, E, A>>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    Fx::map(fa, Step::done)
}

/// Collapse a consumer whose result is itself a consumer.
///
/// Once the outer step completes, the inner step it produced is driven to
/// completion with end-of-stream and the joined step finishes `Done` with
/// the inner result. Leftover input at either level is discarded: the
/// inner leftover belongs to a stream nobody can replay, and the outer
/// completion is the end of the joined consumer's interest in its own.
///
/// An inner consumer that never completes under `End` feeding makes this
/// diverge, the same contract as [`Step::run`].
pub fn join<Fx, EO, EI, A>(outer: Step<Fx, EO, Step<Fx, EI, A>>) -> Fx::Value<Step<Fx, EO, A>>
where
    Fx: Monad,
    EO: Send + 'static,
    EI: Send + 'static,
    A: Send + 'static,
{
    match outer {
        Step::Done(inner) | Step::Early(inner, _) => Fx::map(inner.run(), Step::done),
        Step::Cont(k) => Fx::pure(Step::cont(move |input| Fx::flat_map(k(input), join))),
    }
}

enum Classified<Fx, E, A>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    Finished(A, Option<Input<E>>),
    Pending(ContFn<Fx, E, A>),
}

fn classify<Fx, E, A>(step: Step<Fx, E, A>) -> Classified<Fx, E, A>
where
    Fx: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    match step {
        Step::Cont(k) => Classified::Pending(k),
        Step::Done(value) => Classified::Finished(value, None),
        Step::Early(value, leftover) => Classified::Finished(value, Some(leftover)),
    }
}

// End dominates: the stream is closed for whatever follows. A one-sided
// leftover wins outright, and when both sides held something back only the
// shorter tail was declined by both. Ties go to the left operand.
fn shorter_remainder<E>(left: Option<Input<E>>, right: Option<Input<E>>) -> Option<Input<E>> {
    if matches!(left, Some(Input::End)) {
        return left;
    }
    if matches!(right, Some(Input::End)) {
        return right;
    }
    match (left, right) {
        (Some(l), Some(r)) => {
            if l.len() <= r.len() {
                Some(l)
            } else {
                Some(r)
            }
        }
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

/// Run two consumers over a single input stream, pairing their results.
///
/// Each input is fed to the left operand first, then to the right; effects
/// visible through the capability interleave in that order. Once one side
/// finishes, the other keeps consuming alone and its leftover decides the
/// pair's leftover; when both finish together the shorter remainder is
/// kept (see `zip`'s tests for the exact rule).
pub fn zip<Fx, E, A, B>(left: Step<Fx, E, A>, right: Step<Fx, E, B>) -> Fx::Value<Step<Fx, E, (A, B)>>
where
    Fx: Monad,
    E: Clone + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
{
    use Classified::{Finished, Pending};

    match (classify(left), classify(right)) {
        (Pending(lk), Pending(rk)) => Fx::pure(Step::cont(move |input: Input<E>| {
            #[cfg(feature = "tracing")]
            tracing::trace!(elements = input.len(), "feeding both zip operands");
            let for_right = input.clone();
            Fx::flat_map(lk(input), move |next_left| {
                Fx::flat_map(rk(for_right), move |next_right| zip(next_left, next_right))
            })
        })),
        (Pending(lk), Finished(right_value, _)) => {
            Fx::pure(Step::Cont(lk).map(move |left_value| (left_value, right_value)))
        }
        (Finished(left_value, _), Pending(rk)) => {
            Fx::pure(Step::Cont(rk).map(move |right_value| (left_value, right_value)))
        }
        (Finished(left_value, left_rem), Finished(right_value, right_rem)) => {
            let pair = (left_value, right_value);
            match shorter_remainder(left_rem, right_rem) {
                Some(leftover) => Fx::pure(Step::early(pair, leftover)),
                None => Fx::pure(Step::done(pair)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumers::{drain, fold, take};
    use crate::core::effect::Direct;

    #[test]
    fn lift_completes_without_consuming() {
        let step: Step<Direct, i32, i32> = lift::<Direct, i32, i32>(41);
        assert!(matches!(step, Step::Done(41)));
    }

    #[test]
    fn join_runs_the_inner_step_to_completion() {
        let outer: Step<Direct, i32, Step<Direct, i32, i32>> =
            fold(0, |acc, el| acc + el).map(|total| Step::done(total * 2));
        let joined = join(outer);
        let joined = joined
            .feed(Input::El(1))
            .feed(Input::El(2))
            .feed(Input::El(3))
            .feed(Input::End);
        assert!(matches!(joined, Step::Done(12)));
    }

    #[test]
    fn join_drives_a_pending_inner_step_with_end() {
        // The inner consumer still needs end-of-stream to give up its total.
        let outer: Step<Direct, i32, Step<Direct, i32, i32>> =
            Step::done(fold(10, |acc, el| acc + el));
        let joined = join(outer);
        assert!(matches!(joined, Step::Done(10)));
    }

    #[test]
    fn shorter_remainder_prefers_end() {
        let kept = shorter_remainder(Some(Input::El(1)), Some(Input::<i32>::End));
        assert_eq!(kept, Some(Input::End));
        let kept = shorter_remainder(Some(Input::<i32>::End), None);
        assert_eq!(kept, Some(Input::End));
    }

    #[test]
    fn shorter_remainder_keeps_the_smaller_tail() {
        let three = Input::Chunk(1, 2, vec![3]);
        let two = Input::Chunk(4, 5, vec![]);
        assert_eq!(shorter_remainder(Some(three), Some(two.clone())), Some(two));

        let left = Input::Chunk(1, 2, vec![]);
        let right = Input::Chunk(3, 4, vec![]);
        // Ties go to the left operand.
        assert_eq!(
            shorter_remainder(Some(left.clone()), Some(right)),
            Some(left)
        );
    }

    #[test]
    fn shorter_remainder_takes_the_one_sided_tail() {
        let kept = shorter_remainder(Some(Input::El(1)), None);
        assert_eq!(kept, Some(Input::El(1)));
        assert_eq!(shorter_remainder::<i32>(None, None), None);
    }

    #[test]
    fn zip_pairs_two_takes_and_keeps_the_shorter_remainder() {
        let zipped = zip(take::<Direct, i32>(2), take::<Direct, i32>(3));
        let zipped = zipped.feed(Input::Chunk(1, 2, vec![3, 4, 5]));
        match zipped {
            Step::Early((two, three), Input::Chunk(4, 5, rest)) => {
                assert_eq!(two, vec![1, 2]);
                assert_eq!(three, vec![1, 2, 3]);
                assert!(rest.is_empty());
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn zip_with_a_finished_left_side_tracks_the_right() {
        let zipped = zip(Step::<Direct, i32, i32>::done(9), drain::<Direct, i32>());
        let zipped = zipped.feed(Input::Chunk(1, 2, vec![])).feed(Input::End);
        match zipped {
            Step::Early((9, drained), Input::End) => assert_eq!(drained, vec![1, 2]),
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn zip_of_two_finished_sides_keeps_the_one_sided_leftover() {
        let zipped = zip(
            Step::<Direct, i32, i32>::early(1, Input::El(7)),
            Step::<Direct, i32, i32>::done(2),
        );
        match zipped {
            Step::Early((1, 2), Input::El(7)) => {}
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn zip_feeds_end_to_both_pending_sides() {
        let zipped = zip(
            fold::<Direct, i32, i32, _>(0, |acc, el| acc + el),
            drain::<Direct, i32>(),
        );
        let zipped = zipped.feed(Input::Chunk(1, 2, vec![3])).feed(Input::End);
        match zipped {
            Step::Early((6, drained), Input::End) => assert_eq!(drained, vec![1, 2, 3]),
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn zip_feeds_left_before_right() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let order = Arc::new(AtomicUsize::new(0));
        let left_seen = Arc::new(AtomicUsize::new(0));
        let right_seen = Arc::new(AtomicUsize::new(0));

        let left_order = order.clone();
        let left_slot = left_seen.clone();
        let left: Step<Direct, i32, i32> = fold(0, move |acc, _| {
            left_slot.store(left_order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
            acc
        });

        let right_order = order.clone();
        let right_slot = right_seen.clone();
        let right: Step<Direct, i32, i32> = fold(0, move |acc, _| {
            right_slot.store(right_order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
            acc
        });

        let _ = zip(left, right).feed(Input::El(1));
        assert!(left_seen.load(Ordering::SeqCst) < right_seen.load(Ordering::SeqCst));
    }
}
