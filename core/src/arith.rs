/// Returns `a + b`.
///
/// Overflow wraps around in 32-bit two's complement, in debug and release
/// builds alike: `sum(i32::MAX, 1) == i32::MIN`.
pub const fn sum(a: i32, b: i32) -> i32 {
  a.wrapping_add(b)
}
