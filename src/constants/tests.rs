use super::*;

#[test]
#[expect(
    clippy::assertions_on_constants,
    reason = "Checking the constants against each other"
)]
fn test_sizes_line_up() {
    // The default fill unit is a whole number of pages, so rounded pulls stay page sized
    assert_eq!(CHUNK_SIZE % 1024, 0);
    assert!(CHUNK_SIZE.is_power_of_two());

    // Rounding a shortfall up to the largest fill unit lands on a capacity step
    assert!(MAX_FILL_SIZE > CHUNK_SIZE);
    assert_eq!(MAX_FILL_SIZE % CHUNK_SIZE, 0);
    assert!((MAX_FILL_SIZE / CHUNK_SIZE).is_power_of_two());

    // The capacity ceiling is itself a capacity step, with room for the largest fill unit
    assert!(PRACTICAL_MAX_SIZE > MAX_FILL_SIZE);
    assert_eq!(PRACTICAL_MAX_SIZE % CHUNK_SIZE, 0);
    assert!((PRACTICAL_MAX_SIZE / CHUNK_SIZE).is_power_of_two());

    // Nothing bigger than the top bit of usize can be a multiple of CHUNK_SIZE and a power of 2
    assert_eq!(PRACTICAL_MAX_SIZE, usize::MAX / 2 + 1);
}
