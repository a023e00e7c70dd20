//! RNG module - weighted random figure generation
//!
//! Figures are drawn uniformly from an eight-entry catalog in which the bar
//! appears twice, so it comes up about twice as often as any other kind.
//! A simple LCG keeps the sequence deterministic for a given seed.

use crate::figures::Figure;
use crate::types::{FigureKind, Point, AREA_WIDTH};

/// Weighted figure catalog
pub const CATALOG: [FigureKind; 8] = [
    FigureKind::I,
    FigureKind::I,
    FigureKind::L,
    FigureKind::J,
    FigureKind::S,
    FigureKind::Z,
    FigureKind::O,
    FigureKind::T,
];

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period, so use the high half
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Builds spawned figures
#[derive(Debug, Clone)]
pub struct FigureFactory {
    rng: SimpleRng,
}

impl FigureFactory {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Uniform draw over [`CATALOG`]
    pub fn random_kind(&mut self) -> FigureKind {
        CATALOG[self.rng.next_range(CATALOG.len() as u32) as usize]
    }

    /// A random figure at the spawn position
    pub fn random_figure(&mut self) -> Figure {
        let kind = self.random_kind();
        Self::figure(kind)
    }

    /// A figure of `kind`, horizontally centered on row 0
    pub fn figure(kind: FigureKind) -> Figure {
        let mut figure = Figure::new(kind, Point::default());
        figure.position = Point::new((AREA_WIDTH as i32 - figure.matrix().width) / 2, 0);
        figure
    }
}

impl Default for FigureFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
