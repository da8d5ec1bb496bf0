//! Stack growth for deep recursion.
//!
//! The parser descends once per nesting level and the evaluator once per
//! nested expression and per call, so hostile input can exhaust the host
//! stack long before the evaluator's own call-depth limit trips.
//! [`ensure_sufficient_stack`] wraps each recursive entry point and moves
//! execution onto a freshly allocated segment when the current one runs low.
//!
//! On `wasm32` this is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than `RED_ZONE` bytes remain.
///
/// ```text
/// fn parse_expr(&mut self) -> ExprId {
///     ensure_sufficient_stack(|| self.parse_assignment())
/// }
/// ```
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

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        // Roughly what a 200k-deep parenthesized expression would cost.
        fn nest(depth: u32) -> u32 {
            ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
        }

        assert_eq!(nest(200_000), 200_000);
    }
}
