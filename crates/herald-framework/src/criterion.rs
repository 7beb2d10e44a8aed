//! Predicate combinators.
//!
//! A [`Criterion`] is one named, optional constraint on a filter. It is
//! either unset, a single declared value, or a list of alternatives. Every
//! field rule in the framework goes through [`Criterion::matches_all`];
//! only the comparison closure differs per field.
//!
//! | declared            | result                                  |
//! |---------------------|-----------------------------------------|
//! | `Unset`             | `true`                                  |
//! | `One(a)`            | `compare(a, observed)`                  |
//! | `AnyOf([a, b, …])`  | `compare(a, observed) \|\| compare(b, …)` |
//!
//! An empty `AnyOf` has no alternative that could succeed and is `false`.

/// A declared criterion value.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion<T> {
    /// Nothing declared; vacuously satisfied.
    Unset,
    /// A single declared value.
    One(T),
    /// Alternatives, any one of which satisfies the criterion.
    AnyOf(Vec<T>),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Criterion<T> {
    /// Returns `true` unless the criterion is [`Unset`](Self::Unset).
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Evaluates the criterion against an observed value.
    pub fn matches_all<O, F>(&self, observed: &O, compare: F) -> bool
    where
        O: ?Sized,
        F: Fn(&T, &O) -> bool,
    {
        match self {
            Self::Unset => true,
            Self::One(declared) => compare(declared, observed),
            Self::AnyOf(alternatives) => alternatives.iter().any(|a| compare(a, observed)),
        }
    }

    /// Adds an alternative, widening `One` into `AnyOf` as needed.
    pub fn or(self, alternative: T) -> Self {
        match self {
            Self::Unset => Self::One(alternative),
            Self::One(first) => Self::AnyOf(vec![first, alternative]),
            Self::AnyOf(mut alternatives) => {
                alternatives.push(alternative);
                Self::AnyOf(alternatives)
            }
        }
    }

    /// Returns the declared alternatives in order.
    pub fn alternatives(&self) -> &[T] {
        match self {
            Self::Unset => &[],
            Self::One(declared) => std::slice::from_ref(declared),
            Self::AnyOf(alternatives) => alternatives,
        }
    }
}

impl<T> FromIterator<T> for Criterion<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::AnyOf(iter.into_iter().collect())
    }
}

/// Free-function form of [`Criterion::matches_all`].
pub fn matches_all<T, O, F>(declared: &Criterion<T>, observed: &O, compare: F) -> bool
where
    O: ?Sized,
    F: Fn(&T, &O) -> bool,
{
    declared.matches_all(observed, compare)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(a: &i32, b: &i32) -> bool {
        a == b
    }

    #[test]
    fn test_unset_is_vacuous() {
        assert!(Criterion::<i32>::Unset.matches_all(&1, eq));
        assert!(matches_all(&Criterion::<i32>::default(), &1, |_, _| false));
    }

    #[test]
    fn test_single_value_uses_compare() {
        assert!(Criterion::One(3).matches_all(&3, eq));
        assert!(!Criterion::One(3).matches_all(&4, eq));
    }

    #[test]
    fn test_any_of_is_or_within_criterion() {
        let cases: [(Vec<i32>, bool); 4] = [
            (vec![], false),
            (vec![7], true),
            (vec![1, 7], true),
            (vec![1, 2, 3, 4, 5], false),
        ];
        for (alternatives, expected) in cases {
            let criterion: Criterion<i32> = alternatives.into_iter().collect();
            assert_eq!(criterion.matches_all(&7, eq), expected);
        }

        let five: Criterion<i32> = (1..=5).collect();
        assert!(five.matches_all(&5, eq));
    }

    #[test]
    fn test_or_widens() {
        let c = Criterion::Unset.or(1).or(2).or(3);
        assert_eq!(c, Criterion::AnyOf(vec![1, 2, 3]));
        assert_eq!(c.alternatives(), &[1, 2, 3]);
        assert!(c.is_set());
    }
}
