pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

pub fn u64s_from_str(input: &str) -> [u64; 4] {
    let u8s = u8s_from_str(input);

    let mut output = [0u64; 4];
    for (i, chunk) in u8s.chunks_exact(8).enumerate() {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        output[i] = u64::from_le_bytes(bytes);
    }
    output
}

/// Folds a phrase and a round counter into a single seed.
pub fn seed_from_phrase(phrase: &str, round: u64) -> [u8; 32] {
    let mut seed = u8s_from_str(phrase);
    for (byte, round_byte) in seed.iter_mut().zip(round.to_le_bytes()) {
        *byte ^= round_byte;
    }
    seed
}
