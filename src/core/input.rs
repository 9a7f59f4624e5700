//! The input algebra delivered to stream consumers.
//!
//! An [`Input`] is the unit of delivery: a producer hands one to a step at
//! each feed. The four variants cover the whole protocol - nothing yet, a
//! single element, a chunk of two or more elements, and end-of-stream.

/// A single delivery from a producer to a consumer.
///
/// Once a producer has delivered [`Input::End`] to a step it must not
/// deliver anything else to that step.
///
/// # Examples
///
/// ```rust
/// use intake::core::Input;
///
/// let chunk = Input::Chunk(1, 2, vec![3]);
/// assert_eq!(chunk.len(), 3);
/// assert_eq!(chunk.into_vec(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<E> {
    /// The producer has nothing to deliver right now; the stream is still open.
    Empty,
    /// Exactly one element.
    El(E),
    /// Two or more elements; the trailing vector may be empty.
    Chunk(E, E, Vec<E>),
    /// Terminal signal; no further elements will arrive.
    End,
}

/// Four-arm visitor over an [`Input`].
///
/// Classifies an input once instead of testing its tag repeatedly; the
/// folder is consumed by whichever arm fires.
pub trait InputFolder<E>: Sized {
    /// The common result type of all four arms.
    type Out;

    /// The producer delivered nothing.
    fn on_empty(self) -> Self::Out;

    /// The producer delivered one element.
    fn on_el(self, element: E) -> Self::Out;

    /// The producer delivered two or more elements.
    fn on_chunk(self, first: E, second: E, rest: Vec<E>) -> Self::Out;

    /// The producer closed the stream.
    fn on_end(self) -> Self::Out;
}

impl<E> Input<E> {
    /// Build an input from a vector, normalising the representation.
    ///
    /// Zero elements become [`Input::Empty`], one becomes [`Input::El`],
    /// two or more become [`Input::Chunk`]. Library code that slices a
    /// chunk always rebuilds the remainder through this constructor, so a
    /// malformed zero- or one-element chunk never escapes.
    pub fn from_vec(elements: Vec<E>) -> Self {
        let mut elements = elements.into_iter();
        match (elements.next(), elements.next()) {
            (Some(first), Some(second)) => Input::Chunk(first, second, elements.collect()),
            (Some(first), None) => Input::El(first),
            _ => Input::Empty,
        }
    }

    /// Returns `true` if this is the terminal [`Input::End`] signal.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self, Input::End)
    }

    /// Returns `true` if this is [`Input::Empty`].
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Input::Empty)
    }

    /// The number of elements carried: 0, 1, or the chunk length.
    pub fn len(&self) -> usize {
        match self {
            Input::Empty | Input::End => 0,
            Input::El(_) => 1,
            Input::Chunk(_, _, rest) => 2 + rest.len(),
        }
    }

    /// Extract the carried elements in order.
    ///
    /// `Empty` and `End` yield an empty vector.
    pub fn into_vec(self) -> Vec<E> {
        match self {
            Input::Empty | Input::End => Vec::new(),
            Input::El(element) => vec![element],
            Input::Chunk(first, second, rest) => {
                let mut elements = Vec::with_capacity(2 + rest.len());
                elements.push(first);
                elements.push(second);
                elements.extend(rest);
                elements
            }
        }
    }

    /// Dispatch on the variant through an [`InputFolder`].
    pub fn fold<F: InputFolder<E>>(self, folder: F) -> F::Out {
        match self {
            Input::Empty => folder.on_empty(),
            Input::El(element) => folder.on_el(element),
            Input::Chunk(first, second, rest) => folder.on_chunk(first, second, rest),
            Input::End => folder.on_end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_normalises() {
        assert_eq!(Input::<i32>::from_vec(vec![]), Input::Empty);
        assert_eq!(Input::from_vec(vec![1]), Input::El(1));
        assert_eq!(Input::from_vec(vec![1, 2]), Input::Chunk(1, 2, vec![]));
        assert_eq!(Input::from_vec(vec![1, 2, 3]), Input::Chunk(1, 2, vec![3]));
    }

    #[test]
    fn predicates() {
        assert!(Input::<i32>::End.is_end());
        assert!(!Input::El(1).is_end());
        assert!(!Input::Chunk(1, 2, vec![]).is_end());
        assert!(Input::<i32>::Empty.is_empty());
        assert!(!Input::<i32>::End.is_empty());
    }

    #[test]
    fn len_counts_elements() {
        assert_eq!(Input::<i32>::Empty.len(), 0);
        assert_eq!(Input::El(7).len(), 1);
        assert_eq!(Input::Chunk(1, 2, vec![]).len(), 2);
        assert_eq!(Input::Chunk(1, 2, vec![3, 4]).len(), 4);
        assert_eq!(Input::<i32>::End.len(), 0);
    }

    #[test]
    fn into_vec_preserves_order() {
        assert_eq!(Input::<i32>::Empty.into_vec(), Vec::<i32>::new());
        assert_eq!(Input::El(1).into_vec(), vec![1]);
        assert_eq!(Input::Chunk(1, 2, vec![3, 4]).into_vec(), vec![1, 2, 3, 4]);
        assert_eq!(Input::<i32>::End.into_vec(), Vec::<i32>::new());
    }

    struct Describe;

    impl InputFolder<i32> for Describe {
        type Out = String;

        fn on_empty(self) -> String {
            "empty".into()
        }

        fn on_el(self, element: i32) -> String {
            format!("el {element}")
        }

        fn on_chunk(self, first: i32, second: i32, rest: Vec<i32>) -> String {
            format!("chunk {first} {second} +{}", rest.len())
        }

        fn on_end(self) -> String {
            "end".into()
        }
    }

    #[test]
    fn folder_dispatches_once_per_variant() {
        assert_eq!(Input::Empty.fold(Describe), "empty");
        assert_eq!(Input::El(3).fold(Describe), "el 3");
        assert_eq!(Input::Chunk(1, 2, vec![3, 4]).fold(Describe), "chunk 1 2 +2");
        assert_eq!(Input::End.fold(Describe), "end");
    }
}
