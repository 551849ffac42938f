//! Face values of tile indices.
//!
//! Cells store a small *index*; the number shown on the tile (and scored when it
//! is created by a merge) is `F[index]`, where `F` is the Fibonacci-like sequence
//! `0, 1, 2, 3, 5, 8, 13, ...` seeded with `F[2] = 2` and `F[3] = 3`.

/// Largest index with an entry in the face-value table.
pub const MAX_TILE_INDEX: u8 = 32;

const FACE_VALUES: [u32; MAX_TILE_INDEX as usize + 1] = {
    let mut table = [0; MAX_TILE_INDEX as usize + 1];
    table[1] = 1;
    table[2] = 2;
    let mut i = 3;
    while i < table.len() {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};

/// Returns the face value of a tile index.
///
/// # Panics
///
/// Panics if `index` is greater than [`MAX_TILE_INDEX`].
///
/// ```
/// use fib2048_engine::fibonacci;
///
/// assert_eq!(fibonacci(0), 0);
/// assert_eq!(fibonacci(4), 5);
/// assert_eq!(fibonacci(32), 3_524_578);
/// ```
#[must_use]
pub fn fibonacci(index: u8) -> u32 {
    FACE_VALUES[usize::from(index)]
}

/// Returns the index whose face value is exactly `face`, if any.
///
/// ```
/// use fib2048_engine::index_of;
///
/// assert_eq!(index_of(21), Some(7));
/// assert_eq!(index_of(4), None);
/// ```
#[must_use]
pub fn index_of(face: u32) -> Option<u8> {
    let pos = FACE_VALUES.iter().position(|&value| value == face)?;
    u8::try_from(pos).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_prefix() {
        let expected = [0, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];
        for (i, face) in expected.into_iter().enumerate() {
            assert_eq!(fibonacci(u8::try_from(i).unwrap()), face);
        }
    }

    #[test]
    fn test_table_follows_recurrence_after_seed() {
        for i in 4..=MAX_TILE_INDEX {
            assert_eq!(fibonacci(i), fibonacci(i - 1) + fibonacci(i - 2));
        }
    }

    #[test]
    fn test_index_of_inverts_table() {
        for i in 0..=MAX_TILE_INDEX {
            assert_eq!(index_of(fibonacci(i)), Some(i));
        }
    }

    #[test]
    fn test_index_of_rejects_non_face_values() {
        for face in [4, 6, 7, 9, 10, 100, 3_524_579] {
            assert_eq!(index_of(face), None, "{face} should not be a face value");
        }
    }
}
