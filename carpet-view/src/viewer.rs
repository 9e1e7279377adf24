//! Carpet viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Session`] (generator plus
//! pixel buffer) and implements [`eframe::App`] to drive it and show the
//! accumulated image as a texture.

use carpet_core::{
    attractor::AttractorSet,
    canvas::{PixelBuffer, Surface},
    config::Config,
    driver::{EventSource, Session},
    generator::{ChaosGame, random_seed_point},
    types::{Color, Control},
};
use eframe::App;
use rand_pcg::Pcg64;

/// Reports the window's close request to the render loop.
struct ViewportEvents<'a>(&'a egui::Context);

impl EventSource for ViewportEvents<'_> {
    fn poll(&mut self) -> Control {
        if self.0.input(|i| i.viewport().close_requested()) {
            Control::Stop
        } else {
            Control::Continue
        }
    }
}

/// Main application state for the viewer.
///
/// The per-frame update is:
/// 1. Handle panel interactions.
/// 2. If `running`, perform `cfg.steps_per_frame` loop iterations, each one
///    checking for a close request first.
/// 3. Upload the pixel buffer to the texture if anything was presented.
/// 4. Draw the texture and request another repaint.
///
/// ### Fields
/// - `cfg` - Run configuration (surface size, iterations per frame, seed).
/// - `session` - Generator and pixel buffer.
/// - `texture` - GPU copy of the pixel buffer, created lazily.
/// - `running` - Whether the loop auto-advances.
/// - `stopped` - Set once a close request was seen; nothing is drawn after.
pub struct Viewer {
    cfg: Config,
    session: Session<Pcg64, PixelBuffer>,
    texture: Option<egui::TextureHandle>,
    running: bool,
    stopped: bool,
}

impl Viewer {
    /// Creates a viewer with a black canvas and a freshly seeded generator.
    ///
    /// ### Errors
    /// Returns an error if `cfg` fails [`Config::validate`].
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        cfg.validate()?;

        let session = Session::new(Self::new_game(&cfg), PixelBuffer::square(cfg.win_size));

        log::info!(
            "viewer ready: {0}x{0} canvas, {1} steps per frame, seed {2:?}",
            cfg.win_size,
            cfg.steps_per_frame,
            cfg.seed
        );

        Ok(Self {
            cfg,
            session,
            texture: None,
            running: true,
            stopped: false,
        })
    }

    fn new_game(cfg: &Config) -> ChaosGame<Pcg64> {
        let mut rng = cfg.rng();
        let seed_point = random_seed_point(&mut rng);
        log::debug!("new generator starting at {seed_point}");
        ChaosGame::new(AttractorSet::carpet(), seed_point, rng)
    }

    /// Re-seeds the generator from the current config and clears the canvas.
    fn reset(&mut self) {
        self.session.replace_game(Self::new_game(&self.cfg));
        self.session.surface_mut().clear();
        log::debug!("reset");
    }

    /// Blackens the canvas; the generator keeps its current point.
    fn clear(&mut self) {
        self.session.surface_mut().clear();
        log::debug!("canvas cleared");
    }

    /// Runs a single loop iteration regardless of `running`.
    fn step_once(&mut self) {
        if !self.stopped {
            self.session.tick(&mut || Control::Continue);
        }
    }

    /// Advances the loop for one repaint and latches a stop request.
    fn drive(&mut self, events: &mut impl EventSource) {
        if self.stopped {
            return;
        }

        let control = if self.running {
            self.session.run_frames(events, self.cfg.steps_per_frame)
        } else {
            events.poll()
        };

        if control == Control::Stop {
            self.stopped = true;
            log::info!("close requested after {} points", self.session.plotted());
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let dirty = self.session.surface_mut().take_dirty();
        if !dirty && self.texture.is_some() {
            return;
        }

        let buf = self.session.surface();
        let [w, h] = buf.size();
        let image = egui::ColorImage::from_rgb([w, h], buf.as_rgb());

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("carpet", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn swatch(color: Color) -> egui::Color32 {
        egui::Color32::from_rgb(color.r, color.g, color.b)
    }

    /// Builds the top panel (run controls, stepping, seed).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                    log::debug!("running = {}", self.running);
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.label("steps/frame:");
                ui.add(
                    egui::DragValue::new(&mut self.cfg.steps_per_frame)
                        .range(1..=100_000)
                        .speed(10.0),
                );

                ui.separator();
                let mut fixed = self.cfg.seed.is_some();
                if ui.checkbox(&mut fixed, "fixed seed").changed() {
                    self.cfg.seed = fixed.then_some(0);
                }
                if let Some(seed) = self.cfg.seed.as_mut() {
                    ui.add(egui::DragValue::new(seed));
                }
            });
        });
    }

    /// Builds the bottom status bar (points, current point, last attractor).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("points = {}", self.session.plotted()));
                let p = self.session.game().current();
                ui.label(format!("point = ({:.4}, {:.4})", p.x, p.y));

                if let Some(step) = self.session.last_step() {
                    ui.separator();
                    let color = self.session.game().attractors().get(step.index).color;
                    ui.colored_label(Self::swatch(color), format!("attractor {}", step.index));
                }
            });
        });
    }

    /// Builds the central panel holding the canvas at 1:1 size.
    fn ui_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    let side = self.cfg.win_size as f32;
                    ui.add(
                        egui::Image::new(texture).fit_to_exact_size(egui::vec2(side, side)),
                    );
                }
            });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);

        self.drive(&mut ViewportEvents(ctx));
        self.upload_texture(ctx);
        self.ui_central_panel(ctx);

        if self.running && !self.stopped {
            ctx.request_repaint();
        }
    }
}
