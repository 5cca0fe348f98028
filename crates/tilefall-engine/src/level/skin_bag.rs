use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SkinKind;

/// Number of shuffle passes made over the expanded multiset on each refill.
const SHUFFLE_PASSES: usize = 50;

/// Relative frequency of a skin in a level's draw queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkinWeight {
    pub kind: SkinKind,
    pub weight: u32,
}

impl SkinWeight {
    #[must_use]
    pub const fn new(kind: SkinKind, weight: u32) -> Self {
        Self { kind, weight }
    }
}

/// Weighted random skin sequencing.
///
/// # Refill
///
/// When the queue runs empty, the weight table is expanded into a multiset
/// where each skin appears `weight` times. The multiset is shuffled and
/// queued in full. Skins are then dealt without replacement until the
/// queue is empty again, so one cycle of `sum(weights)` draws contains each
/// skin exactly `weight` times.
///
/// # Example
///
/// ```
/// use tilefall_engine::{SkinBag, SkinKind, SkinWeight};
///
/// let weights = [SkinWeight::new(SkinKind::O, 2), SkinWeight::new(SkinKind::T, 1)];
/// let mut bag = SkinBag::new(&weights);
///
/// let mut cycle: Vec<_> = (0..3).filter_map(|_| bag.next_skin()).collect();
/// cycle.sort_by_key(|kind| kind.as_char());
/// assert_eq!(cycle, [SkinKind::O, SkinKind::O, SkinKind::T]);
/// ```
#[derive(Debug, Clone)]
pub struct SkinBag {
    rng: Pcg32,
    weights: Vec<SkinWeight>,
    shuffled: Vec<SkinKind>,
    queue: VecDeque<SkinKind>,
}

/// Seed for deterministic skin sequencing.
///
/// A 128-bit seed for the bag's random number generator. Equal seeds yield
/// equal skin sequences. Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use tilefall_engine::SkinSeed;
/// use rand::Rng as _;
///
/// let seed: SkinSeed = rand::rng().random();
/// let parsed: SkinSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinSeed([u8; 16]);

impl SkinSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for SkinSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SkinSeed {
    type Err = String;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SkinSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SkinSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<SkinSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SkinSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SkinSeed(seed)
    }
}

impl SkinBag {
    /// Creates a bag seeded from the thread-local random source.
    #[must_use]
    pub fn new(weights: &[SkinWeight]) -> Self {
        Self::with_seed(weights, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(weights: &[SkinWeight], seed: SkinSeed) -> Self {
        let total = weights.iter().map(|w| w.weight as usize).sum();
        Self {
            rng: Pcg32::from_seed(seed.0),
            weights: weights.to_vec(),
            shuffled: Vec::with_capacity(total),
            queue: VecDeque::with_capacity(total),
        }
    }

    #[must_use]
    pub fn weights(&self) -> &[SkinWeight] {
        &self.weights
    }

    /// Sum of all weights: the length of one full cycle.
    #[must_use]
    pub fn cycle_len(&self) -> usize {
        self.weights.iter().map(|w| w.weight as usize).sum()
    }

    /// Deals the next skin, refilling the queue first if it is empty.
    ///
    /// Returns `None` only if every weight is zero.
    pub fn next_skin(&mut self) -> Option<SkinKind> {
        if self.queue.is_empty() {
            self.refill();
        }
        self.queue.pop_front()
    }

    /// Returns the skins remaining in the current cycle, in dealing order.
    pub fn upcoming(&self) -> impl Iterator<Item = SkinKind> + '_ {
        self.queue.iter().copied()
    }

    /// Drops the remaining skins of the current cycle.
    ///
    /// The random state carries on; the next draw starts a new cycle.
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    fn refill(&mut self) {
        self.shuffled.clear();
        for w in &self.weights {
            self.shuffled
                .extend(std::iter::repeat_n(w.kind, w.weight as usize));
        }

        let len = self.shuffled.len();
        if len > 0 {
            for _ in 0..SHUFFLE_PASSES {
                for i in 0..len {
                    let j = self.rng.random_range(0..len);
                    if i != j {
                        self.shuffled.swap(i, j);
                    }
                }
            }
        }

        self.queue.extend(self.shuffled.iter().copied());
    }
}
