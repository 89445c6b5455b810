//! Boolean combinators over boxed predicates.
//!
//! Both [`all`] and [`any`] are true for an empty sequence. An empty OR group
//! therefore never disqualifies a rule on its own; the compiler skips empty
//! groups so they do not make every rule match.

/// A thread-safe predicate over `T`.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// AND over `predicates`, short-circuiting on the first `false`.
pub fn all<T: ?Sized + 'static>(predicates: Vec<Predicate<T>>) -> Predicate<T> {
    if predicates.is_empty() {
        return Box::new(|_: &T| true);
    }
    Box::new(move |value: &T| predicates.iter().all(|p| p(value)))
}

/// OR over `predicates`, short-circuiting on the first `true`.
pub fn any<T: ?Sized + 'static>(predicates: Vec<Predicate<T>>) -> Predicate<T> {
    if predicates.is_empty() {
        return Box::new(|_: &T| true);
    }
    Box::new(move |value: &T| predicates.iter().any(|p| p(value)))
}

/// Logical negation.
pub fn not<T: ?Sized + 'static>(predicate: Predicate<T>) -> Predicate<T> {
    Box::new(move |value: &T| !predicate(value))
}

/// `a && b`, evaluating `b` only when `a` holds.
pub fn and<T: ?Sized + 'static>(a: Predicate<T>, b: Predicate<T>) -> Predicate<T> {
    Box::new(move |value: &T| a(value) && b(value))
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn gt(n: i32) -> Predicate<i32> {
        Box::new(move |v: &i32| *v > n)
    }

    fn counting(result: bool, calls: &Arc<AtomicUsize>) -> Predicate<i32> {
        let calls = Arc::clone(calls);
        Box::new(move |_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            result
        })
    }

    #[test]
    fn empty_sequences_are_vacuously_true() {
        assert!(all::<i32>(Vec::new())(&0));
        assert!(any::<i32>(Vec::new())(&0));
    }

    #[test]
    fn all_requires_every_predicate() {
        let p = all(vec![gt(1), gt(5)]);
        assert!(p(&6));
        assert!(!p(&3));
    }

    #[test]
    fn any_requires_one_predicate() {
        let p = any(vec![gt(10), gt(5)]);
        assert!(p(&6));
        assert!(!p(&2));
    }

    #[test]
    fn all_short_circuits_on_false() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = all(vec![counting(false, &calls), counting(true, &calls)]);
        assert!(!p(&0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn any_short_circuits_on_true() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = any(vec![counting(true, &calls), counting(false, &calls)]);
        assert!(p(&0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn not_and_compose_over_unsized_values() {
        let contains_a: Predicate<str> = Box::new(|s: &str| s.contains('a'));
        let is_abc: Predicate<str> = Box::new(|s: &str| s == "abc");
        let p = and(contains_a, not(is_abc));
        assert!(p("bar"));
        assert!(!p("abc"));
        assert!(!p("xyz"));
    }
}
