//! Benchmark input generators.

use rand::Rng;

/// Generate random printable ASCII of the specified size.
pub fn random_text(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(b' '..=b'~')).collect()
}

/// Generate `count` random chunks with lengths in `1..=max_len`.
pub fn random_chunks(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| random_text(rng.gen_range(1..=max_len)))
        .collect()
}
