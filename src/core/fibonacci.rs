/// Largest input whose result fits in a `u64`
pub const MAX_FIBONACCI_INPUT: u32 = 93;

/// Naive recursive Fibonacci, exponential in `n` and never memoised.
///
/// Defined for `n >= 1` with `fib(1) = fib(2) = 1`; `n = 0` returns 1.
pub fn fibonacci(n: u32) -> u64 {
    if n <= 2 {
        1
    } else {
        fibonacci(n - 1) + fibonacci(n - 2)
    }
}
