use crate::types::Color;
use anyhow::{Result, bail};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attractor {
    pub pos: Vec2,
    pub color: Color,
}

/// Fixed, non-empty list of attractors living in the unit square.
///
/// The order only defines the index space sampled by
/// [`crate::generator::ChaosGame::step`].
#[derive(Clone, Debug)]
pub struct AttractorSet {
    points: Vec<Attractor>,
}

impl AttractorSet {
    /// The eight carpet attractors: the four corners of the unit square
    /// followed by the four edge midpoints, each with its own color.
    pub fn carpet() -> Self {
        let layout = [
            (Vec2::new(0.0, 0.0), Color::RED),
            (Vec2::new(0.0, 1.0), Color::GREEN),
            (Vec2::new(1.0, 1.0), Color::BLUE),
            (Vec2::new(1.0, 0.0), Color::ORANGE),
            (Vec2::new(0.0, 0.5), Color::YELLOW),
            (Vec2::new(0.5, 1.0), Color::CYAN),
            (Vec2::new(1.0, 0.5), Color::MAGENTA),
            (Vec2::new(0.5, 0.0), Color::PURPLE),
        ];

        let points = layout
            .into_iter()
            .map(|(pos, color)| Attractor { pos, color })
            .collect();

        Self { points }
    }

    /// Builds a custom set.
    ///
    /// ### Errors
    /// Fails if `points` is empty or if any position lies outside
    /// `[0, 1] x [0, 1]`; either would break the closure of the update rule.
    pub fn from_attractors(points: Vec<Attractor>) -> Result<Self> {
        if points.is_empty() {
            bail!("attractor set must contain at least one attractor");
        }

        let unit = 0.0..=1.0;
        if let Some((i, a)) = points
            .iter()
            .enumerate()
            .find(|(_, a)| !unit.contains(&a.pos.x) || !unit.contains(&a.pos.y))
        {
            bail!("attractor {i} at {} lies outside the unit square", a.pos);
        }

        Ok(Self { points })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// ### Panics
    /// Panics if `index >= self.count()`.
    #[inline]
    pub fn get(&self, index: usize) -> &Attractor {
        &self.points[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attractor> {
        self.points.iter()
    }
}

impl Default for AttractorSet {
    fn default() -> Self {
        Self::carpet()
    }
}
