//! Stack growth for the recursive parser and evaluator.
//!
//! Nesting is bounded by `ParserConfig::max_depth`, but each level costs
//! several frames, and programs run on tokio's blocking pool whose threads
//! have small stacks. An overflow aborts the process instead of unwinding,
//! so recursive entry points grow the stack on demand.

/// Grow when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(n: u32) -> u32 {
        ensure_sufficient_stack(|| {
            // keep a sizeable frame alive across the recursive call
            let pad = [n as u8; 512];
            if n == 0 {
                0
            } else {
                1 + nest(n - 1) + u32::from(pad[511] & 0)
            }
        })
    }

    #[test]
    fn test_deep_recursion_on_small_thread() {
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| nest(20_000))
            .unwrap();
        assert_eq!(handle.join().unwrap(), 20_000);
    }
}
