//! stable content fingerprints used to pair artifacts written by separate steps.
//! the hash must not change between builds or platforms, so std's hashers are not used.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// 64-bit FNV-1a hash over a sequence of byte strings. each part is followed by a
/// separator byte so that ["ab", "c"] and ["a", "bc"] hash differently.
pub fn fnv1a<'a, I>(parts: I) -> u64
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hash = FNV_OFFSET_BASIS;
    for part in parts {
        for byte in part.iter().chain(std::iter::once(&0xffu8)) {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

/// hex-encoded FNV-1a fingerprint of a sequence of strings.
pub fn fingerprint<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let hash = fnv1a(parts.into_iter().map(|s| s.as_bytes()));
    hex::encode(hash.to_be_bytes())
}

/// splitmix64 finalizer. spreads a combined key over all 64 bits, used to derive
/// independent random seeds from (seed, key) pairs.
pub fn mix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
