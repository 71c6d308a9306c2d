// Deterministic seed scramble shared by every display value
// game id -> 32-bit content hash; composed seed -> LCG pre-step -> mulberry32 -> float in [0,1)

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const LCG_MULTIPLIER: f64 = 9301.0;
const LCG_INCREMENT: f64 = 49297.0;
const LCG_MODULUS: f64 = 233280.0;

/// Hashes a game identifier to a stable non-negative integer.
///
/// Walks UTF-16 code units and folds `hash*31 - hash + unit` into an `i32`
/// with two's-complement wraparound after every step.
pub fn hash_id(id: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in id.encode_utf16() {
        hash = hash
            .wrapping_mul(31)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

/// Two rounds of xor-shift / odd-multiply mixing over a 32-bit seed.
pub fn mulberry32(seed: u32) -> u32 {
    let s = seed.wrapping_add(MULBERRY_INCREMENT);
    let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    t ^ (t >> 14)
}

pub fn rng_value(seed: u32) -> f64 {
    (mulberry32(seed) as f64) / (u32::MAX as f64 + 1.0)
}

/// `(seed * 9301 + 49297) mod 233280`, evaluated in doubles.
///
/// Composed seeds reach ~10^13, so the product leaves the exactly
/// representable integer range; browsers round it, and so must we.
/// `%` on `f64` truncates like the browser's remainder, and the integral
/// result is reinterpreted as 32 bits the way mulberry32's `|0` does.
pub fn lcg_scramble(seed: i64) -> u32 {
    let scrambled = ((seed as f64) * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    scrambled as i64 as u32
}

/// Uniform integer in `min..=max` drawn from the two-stage scramble.
pub fn seeded_int(seed: i64, min: i64, max: i64) -> i64 {
    let r = rng_value(lcg_scramble(seed));
    let span = (max - min + 1) as f64;
    (r * span).floor() as i64 + min
}
