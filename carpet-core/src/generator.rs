//! The chaos-game point generator.
//!
//! Each [`ChaosGame::step`] picks one attractor uniformly at random and
//! moves the current point two thirds of the way towards it:
//!
//! `next = (current + 2 * attractor) / 3`
//!
//! With the eight carpet attractors this produces a Sierpinski-carpet-like
//! attractor rather than the triangle produced by the classic midpoint rule.

use crate::{attractor::AttractorSet, types::Step};
use glam::Vec2;
use rand::Rng;

/// Source of uniformly distributed attractor indices.
///
/// Implemented for every [`rand::Rng`], so seeded generators such as
/// `rand_pcg::Pcg64` plug in directly.
pub trait IndexSource {
    /// Returns an index uniformly distributed in `[0, len)`.
    ///
    /// `len` is always non-zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    #[inline]
    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Draws a starting point with two independent coordinates in `[0, 1)`.
pub fn random_seed_point(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.random::<f32>(), rng.random::<f32>())
}

/// Holds the single live point and the attractors it is pulled towards.
#[derive(Debug)]
pub struct ChaosGame<S> {
    current: Vec2,
    attractors: AttractorSet,
    source: S,
}

impl<S: IndexSource> ChaosGame<S> {
    pub fn new(attractors: AttractorSet, seed_point: Vec2, source: S) -> Self {
        let mut game = Self {
            current: Vec2::ZERO,
            attractors,
            source,
        };
        game.initialize(seed_point);
        game
    }

    /// Overwrites the current point.
    ///
    /// The point is clamped into the unit square so the closure invariant
    /// holds from the very first step.
    pub fn initialize(&mut self, seed_point: Vec2) {
        self.current = seed_point.clamp(Vec2::ZERO, Vec2::ONE);
    }

    /// Chooses an attractor and moves the point towards it.
    pub fn step(&mut self) -> Step {
        let index = self.source.next_index(self.attractors.count());
        let attractor = self.attractors.get(index).pos;
        self.current = (self.current + 2.0 * attractor) / 3.0;

        log::trace!("step: attractor {index} -> {}", self.current);

        Step {
            point: self.current,
            index,
        }
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    #[inline]
    pub fn attractors(&self) -> &AttractorSet {
        &self.attractors
    }
}
