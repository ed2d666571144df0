//! Generation of per-instance secrets.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

pub const SITE_ID_BITS: u32 = 20;
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

// Training corpus for the pronounceable password generator.
const WORDS: &str = "
    admin anchor answer archive autumn balance basket border bridge bright
    broker butter cabin candle canvas carbon castle channel cherry circle
    clever closet cobalt comet copper corner cotton credit crystal custom
    dancer debate delta desert detail dinner direct doctor domain donkey
    dragon dream eager easel echo editor eleven empire engine estate evening
    fabric falcon famous feather fellow festival filter finger forest formal
    fossil garden gentle ginger glider golden gravel harbor harvest helmet
    hollow honest hunter island jacket jungle kernel kettle kitten ladder
    lantern lemon letter linen lizard lumber magnet mallet marble market
    meadow mellow melody mirror monkey motion muffin napkin native nectar
    noble number object ocean office orange orbit oyster paddle palace
    parcel pepper pillow planet pocket poetry polish portal powder quarry
    rabbit radar ribbon river rocket rubber saddle salmon silver simple
    sister socket spider spirit spring summer sunset tablet target temple
    thunder ticket timber tomato travel tunnel velvet violet walnut window
    winter wonder yellow zipper
";

/// Generates human-memorable passwords from an order-2 character Markov
/// chain trained on a fixed word list.
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    transitions: BTreeMap<[u8; 2], Vec<u8>>,
    starts: Vec<[u8; 2]>,
    length: usize,
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_LENGTH)
    }
}

impl PasswordGenerator {
    #[must_use]
    pub fn new(length: usize) -> Self {
        let mut transitions: BTreeMap<[u8; 2], Vec<u8>> = BTreeMap::new();
        let mut starts = Vec::new();
        for word in WORDS.split_whitespace() {
            let bytes = word.as_bytes();
            if bytes.len() < 3 {
                continue;
            }
            starts.push([bytes[0], bytes[1]]);
            for window in bytes.windows(3) {
                transitions
                    .entry([window[0], window[1]])
                    .or_default()
                    .push(window[2]);
            }
        }
        Self {
            transitions,
            starts,
            length,
        }
    }

    /// Generates a password using the thread-local RNG.
    #[must_use]
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generates a password from the supplied RNG.
    ///
    /// Whenever the chain reaches a pair with no successor a new word start
    /// is appended, so the result always has the configured length.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut output: Vec<u8> = Vec::with_capacity(self.length + 2);
        while output.len() < self.length {
            let next = match output.as_slice() {
                [.., a, b] => self
                    .transitions
                    .get(&[*a, *b])
                    .and_then(|candidates| candidates.choose(rng))
                    .copied(),
                _ => None,
            };
            match next {
                Some(byte) => output.push(byte),
                None => {
                    let Some(start) = self.starts.choose(rng) else {
                        break;
                    };
                    output.extend_from_slice(start);
                }
            }
        }
        output.truncate(self.length);
        output.into_iter().map(char::from).collect()
    }
}

/// Generates an admin password with the default generator.
#[must_use]
pub fn generate_password() -> String {
    PasswordGenerator::default().generate()
}

/// Returns a random site identifier in `[0, 2^20)`.
#[must_use]
pub fn generate_site_id() -> u32 {
    generate_site_id_with(&mut rand::thread_rng())
}

pub fn generate_site_id_with<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..(1u32 << SITE_ID_BITS))
}

/// Returns a 32-character lowercase hex token derived from a random UUID.
#[must_use]
pub fn generate_secret_key() -> String {
    Uuid::new_v4().simple().to_string()
}
