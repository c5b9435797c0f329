//! Deterministic per-cell seeds.
//!
//! A cell seed mixes the run seed, the cell coordinates and a pass tag, so each pass draws
//! from its own stream and cells can be visited in any order.
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Identifies the pass a random stream belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageTag {
    Foliage,
    Detail,
}

impl StageTag {
    fn salt(self) -> u64 {
        match self {
            StageTag::Foliage => 0x243F_6A88_85A3_08D3,
            StageTag::Detail => 0x1319_8A2E_0370_7344,
        }
    }
}

/// Creates a deterministic seed for cell `(x, z)` of a pass.
pub fn seed_for_cell(base_seed: u64, x: usize, z: usize, tag: StageTag) -> u64 {
    let cx = x as u64;
    let cz = z as u64;
    let mixed = base_seed
        ^ tag.salt()
        ^ cx.wrapping_mul(0x9E3779B97F4A7C15)
        ^ cz.wrapping_mul(0xBF58476D1CE4E5B9);
    mix_u64(mixed)
}

/// Random generator for cell `(x, z)` of a pass.
pub fn cell_rng(base_seed: u64, x: usize, z: usize, tag: StageTag) -> StdRng {
    StdRng::seed_from_u64(seed_for_cell(base_seed, x, z, tag))
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
