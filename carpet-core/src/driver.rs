//! The render loop.
//!
//! One iteration ([`Session::tick`]) runs, in order:
//! 1. poll the [`EventSource`] and stop if it asks to,
//! 2. advance the [`ChaosGame`] by one step,
//! 3. map the new point to pixel coordinates with [`to_pixel`],
//! 4. paint that pixel with the chosen attractor's color,
//! 5. present the surface.
//!
//! The surface is never cleared here, the image is the union of every
//! point plotted so far.

use crate::{
    canvas::{Surface, to_pixel},
    generator::{ChaosGame, IndexSource},
    types::{Control, Step},
};

/// Something that can be asked, between iterations, whether the loop
/// should keep going (typically a window's close request).
pub trait EventSource {
    fn poll(&mut self) -> Control;
}

impl<F: FnMut() -> Control> EventSource for F {
    fn poll(&mut self) -> Control {
        self()
    }
}

/// Explicit application context: the generator, the surface it draws on,
/// and a few counters.
#[derive(Debug)]
pub struct Session<S, C> {
    game: ChaosGame<S>,
    surface: C,
    plotted: u64,
    last: Option<Step>,
}

impl<S: IndexSource, C: Surface> Session<S, C> {
    pub fn new(game: ChaosGame<S>, surface: C) -> Self {
        Self {
            game,
            surface,
            plotted: 0,
            last: None,
        }
    }

    /// Runs a single loop iteration.
    ///
    /// A stop request is only observed here, before any work, so a step
    /// and its pixel are always completed together.
    pub fn tick(&mut self, events: &mut impl EventSource) -> Control {
        if events.poll() == Control::Stop {
            return Control::Stop;
        }

        let step = self.game.step();
        let [x, y] = to_pixel(step.point, self.surface.size());
        let color = self.game.attractors().get(step.index).color;

        self.surface.set_pixel(x, y, color);
        self.surface.present();

        self.plotted += 1;
        self.last = Some(step);
        Control::Continue
    }

    /// Runs at most `frames` iterations, returning early with
    /// [`Control::Stop`] if a stop request arrives.
    pub fn run_frames(&mut self, events: &mut impl EventSource, frames: usize) -> Control {
        for _ in 0..frames {
            if self.tick(events) == Control::Stop {
                return Control::Stop;
            }
        }
        Control::Continue
    }

    /// Loops until the event source requests a stop.
    ///
    /// ### Returns
    /// The number of points plotted during this call.
    pub fn run(&mut self, events: &mut impl EventSource) -> u64 {
        let start = self.plotted;
        while self.tick(events) == Control::Continue {}

        let drawn = self.plotted - start;
        log::debug!("session stopped after {drawn} points ({} total)", self.plotted);
        drawn
    }

    #[inline]
    pub fn plotted(&self) -> u64 {
        self.plotted
    }

    /// The most recent step, if any.
    #[inline]
    pub fn last_step(&self) -> Option<Step> {
        self.last
    }

    pub fn game(&self) -> &ChaosGame<S> {
        &self.game
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut C {
        &mut self.surface
    }

    /// Swaps in a new generator, keeping the surface and what is on it.
    pub fn replace_game(&mut self, game: ChaosGame<S>) {
        self.game = game;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attractor::AttractorSet,
        canvas::PixelBuffer,
        types::Color,
    };
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    /// Continues for `n` polls, then stops.
    struct StopAfter(usize);

    impl EventSource for StopAfter {
        fn poll(&mut self) -> Control {
            if self.0 == 0 {
                Control::Stop
            } else {
                self.0 -= 1;
                Control::Continue
            }
        }
    }

    /// Always picks the attractor at the given index.
    struct Fixed(usize);

    impl IndexSource for Fixed {
        fn next_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn seeded_session(side: usize) -> Session<Pcg64, PixelBuffer> {
        let game = ChaosGame::new(AttractorSet::carpet(), Vec2::splat(0.5), Pcg64::seed_from_u64(1));
        Session::new(game, PixelBuffer::square(side))
    }

    #[test]
    fn stop_before_first_step_draws_nothing() {
        let mut session = seeded_session(1000);

        let drawn = session.run(&mut StopAfter(0));

        assert_eq!(drawn, 0);
        assert_eq!(session.plotted(), 0);
        assert_eq!(session.surface().writes(), 0);
        assert_eq!(session.surface().presents(), 0);
        assert_eq!(session.surface().lit_pixels(), 0);
        assert!(session.last_step().is_none());
        assert_eq!(session.game().current(), Vec2::splat(0.5));
    }

    #[test]
    fn tick_plots_mapped_point_in_attractor_color() {
        let game = ChaosGame::new(AttractorSet::carpet(), Vec2::splat(0.5), Fixed(0));
        let mut session = Session::new(game, PixelBuffer::square(1000));

        let control = session.tick(&mut || Control::Continue);

        assert_eq!(control, Control::Continue);
        // (0.5 + 0) / 3 = 0.1666.. -> pixel 166.
        assert_eq!(session.surface().pixel(166, 166), Color::RED);
        assert_eq!(session.surface().lit_pixels(), 1);
        assert_eq!(session.surface().presents(), 1);
        assert_eq!(session.last_step().map(|s| s.index), Some(0));
    }

    #[test]
    fn run_counts_every_iteration_until_stop() {
        let mut session = seeded_session(200);

        let drawn = session.run(&mut StopAfter(5_000));

        assert_eq!(drawn, 5_000);
        assert_eq!(session.plotted(), 5_000);
        assert_eq!(session.surface().writes(), 5_000);
        assert_eq!(session.surface().presents(), 5_000);
    }

    #[test]
    fn canvas_accumulates_and_every_lit_pixel_has_an_attractor_color() {
        let mut session = seeded_session(300);
        session.run(&mut StopAfter(20_000));

        let palette: Vec<Color> = session.game().attractors().iter().map(|a| a.color).collect();
        let buf = session.surface();

        // Far more pixels than any single frame touches.
        assert!(buf.lit_pixels() > 1_000, "only {} pixels lit", buf.lit_pixels());

        for y in 0..300 {
            for x in 0..300 {
                let c = buf.pixel(x, y);
                assert!(c == Color::BLACK || palette.contains(&c));
            }
        }
    }

    #[test]
    fn carpet_leaves_the_center_hole_empty() {
        let mut session = seeded_session(270);
        session.run(&mut StopAfter(50_000));

        // The middle third of the square is never reached after the transient.
        let buf = session.surface();
        let hole = (95..175)
            .flat_map(|y| (95..175).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.pixel(x, y) != Color::BLACK)
            .count();
        assert!(hole <= 5, "{hole} pixels plotted inside the central hole");
    }

    #[test]
    fn run_frames_stops_early_on_request() {
        let mut session = seeded_session(100);

        assert_eq!(session.run_frames(&mut StopAfter(10), 4), Control::Continue);
        assert_eq!(session.plotted(), 4);

        let mut events = StopAfter(3);
        assert_eq!(session.run_frames(&mut events, 10), Control::Stop);
        assert_eq!(session.plotted(), 7);
    }

    #[test]
    fn replace_game_keeps_the_canvas() {
        let mut session = seeded_session(100);
        session.run_frames(&mut || Control::Continue, 500);
        let lit = session.surface().lit_pixels();

        session.replace_game(ChaosGame::new(
            AttractorSet::carpet(),
            Vec2::splat(0.25),
            Pcg64::seed_from_u64(9),
        ));

        assert_eq!(session.surface().lit_pixels(), lit);
        assert_eq!(session.game().current(), Vec2::splat(0.25));
        assert!(session.last_step().is_none());
    }
}
