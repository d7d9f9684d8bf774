//! Deterministic random number stream.
//!
//! Level generation and scripted wandering must be reproducible from a seed,
//! so randomness comes from this PCG stream rather than an OS source.

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
///
/// Given the same seed it always yields the same sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgStream {
    state: u64,
}

impl PcgStream {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut stream = Self { state: 0 };
        stream.step();
        stream.state = stream.state.wrapping_add(mix(seed));
        stream.step();
        stream
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }

    /// Uniform value in `[min, max]` inclusive, for signed grid coordinates.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = min.abs_diff(max) + 1;
        min + (self.next_u32() % span) as i32
    }

    /// True with probability `percent / 100`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_u32() % 100 < percent
    }

    /// Picks an element uniformly, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_u32() as usize % items.len();
        items.get(index)
    }
}

/// SplitMix64 finalizer so nearby seeds start far apart.
fn mix(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}
