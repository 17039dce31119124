//! Content hashing for the compilation cache.

use std::fmt;

/// 32-bit polynomial rolling hash of a LaTeX source.
///
/// Computed as `hash = hash * 31 + unit` over the UTF-16 code units of the
/// source, wrapping at 32 bits. Distinct sources can collide; the cache does
/// not detect this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContentHash(pub i32);

impl ContentHash {
    pub fn of(source: &str) -> Self {
        let hash = source
            .encode_utf16()
            .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32));
        ContentHash(hash)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0 as u32)
    }
}
