//! Seedable pseudo-random generator used to pick the next arrow.
//! xorshift64: deterministic for a given seed, which keeps tests reproducible.

/// xorshift64 generator owned by a single game session.
#[derive(Debug, Clone)]
pub struct SessionRng {
    state: u64,
}

impl SessionRng {
    /// A zero state would make xorshift emit zeros forever, so it is bumped to 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seed from the platform entropy source (`crypto.getRandomValues` in the
    /// browser). Falls back to `fallback_seed` if no entropy is available.
    pub fn from_entropy(fallback_seed: u64) -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => SessionRng::new(u64::from_le_bytes(buf)),
            Err(err) => {
                log::warn!("entropy unavailable ({err}), seeding from clock");
                SessionRng::new(fallback_seed)
            }
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.state = s;
        s
    }

    /// Uniform-enough index in `[0, len)`. Returns 0 for an empty range.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}
