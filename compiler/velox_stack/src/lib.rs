//! Stack growth guard for Velox.
//!
//! The parser descends once per nesting level of the source and the
//! evaluator descends once per nested expression, block and script call,
//! so both run on the host stack. Deep scripts grow it on demand instead of
//! overflowing; the evaluator additionally enforces its own call-depth limit
//! so runaway recursion ends in a script error rather than memory exhaustion.
//!
//! On `wasm32` the guard is a passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nested list depth, computed the way a recursive-descent parser walks it.
    fn nesting(src: &[u8]) -> usize {
        ensure_sufficient_stack(|| match src.split_first() {
            Some((b'[', rest)) => 1 + nesting(rest),
            _ => 0,
        })
    }

    #[test]
    fn shallow_nesting() {
        assert_eq!(nesting(b"[[[]]]"), 3);
    }

    #[test]
    fn deep_nesting_grows_stack() {
        let src = vec![b'['; 200_000];
        assert_eq!(nesting(&src), 200_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<i64, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
