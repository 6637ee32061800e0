/// Rounds `value` up to the next multiple of `align`.
///
/// `align` must be non-zero. It does not need to be a power of two.
#[inline]
pub const fn align_up(value: u32, align: u32) -> u32 {
    debug_assert!(align > 0);
    value.div_ceil(align) * align
}
