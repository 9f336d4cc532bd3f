/// FNV-1a over source text. Compiled units use this to key themselves
/// by content, so identical text hashes identically across runs.
pub fn stable_hash64(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
