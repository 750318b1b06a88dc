//! The control panel: a File menu, two light intensity sliders, the global
//! light position presets and the shading selector.
//!
//! [`ControlPanel`] only describes widgets and reports what the user did as
//! [`UiAction`]s. [`Gui`] feeds it winit input and paints it with wgpu.

use winit::{event::WindowEvent, window::Window};

use crate::data_structures::{light::LightPosition, model::Shading};

pub const INTENSITY_MAX: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiAction {
    Quit,
    /// Fraction of the starting brightness.
    GlobalLightIntensity(f32),
    SpotlightIntensity(f32),
    GlobalLightPosition(LightPosition),
    Shading(Shading),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlPanel {
    pub global_intensity: u32,
    pub spot_intensity: u32,
    pub shading: Shading,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            global_intensity: INTENSITY_MAX,
            spot_intensity: INTENSITY_MAX,
            shading: Shading::Pbr,
        }
    }
}

pub fn intensity_fraction(slider: u32) -> f32 {
    slider.min(INTENSITY_MAX) as f32 / INTENSITY_MAX as f32
}

impl ControlPanel {
    pub fn show(&mut self, ctx: &egui::Context) -> Vec<UiAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        actions.push(UiAction::Quit);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Set Global Light Intensity");
                    let slider = egui::Slider::new(&mut self.global_intensity, 0..=INTENSITY_MAX);
                    if ui.add(slider).changed() {
                        actions.push(UiAction::GlobalLightIntensity(intensity_fraction(
                            self.global_intensity,
                        )));
                    }
                    ui.label("Set Spotlight Intensity");
                    let slider = egui::Slider::new(&mut self.spot_intensity, 0..=INTENSITY_MAX);
                    if ui.add(slider).changed() {
                        actions.push(UiAction::SpotlightIntensity(intensity_fraction(
                            self.spot_intensity,
                        )));
                    }
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.label("Change Global Light Position");
                    ui.horizontal(|ui| {
                        for preset in LightPosition::ALL {
                            if ui.button(preset.label()).clicked() {
                                actions.push(UiAction::GlobalLightPosition(preset));
                            }
                        }
                    });
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.label("Shading");
                    let before = self.shading;
                    ui.radio_value(&mut self.shading, Shading::Phong, "Phong");
                    ui.radio_value(&mut self.shading, Shading::Pbr, "PBR");
                    if self.shading != before {
                        actions.push(UiAction::Shading(self.shading));
                    }
                });
            });
        });

        actions
    }
}

/// egui state, input translation and wgpu painter for the control panel.
pub struct Gui {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pending: Option<egui::FullOutput>,
    pub panel: ControlPanel,
}

impl Gui {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        Self {
            ctx,
            state,
            renderer,
            pending: None,
            panel: ControlPanel::default(),
        }
    }

    /// Returns `true` when the panel used the event and the camera must ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Lay out the panel for this frame. The result is painted by [`Self::paint`].
    pub fn run(&mut self, window: &Window) -> Vec<UiAction> {
        let raw_input = self.state.take_egui_input(window);
        let mut actions = Vec::new();
        let panel = &mut self.panel;
        let full_output = self.ctx.run(raw_input, |ctx| {
            actions = panel.show(ctx);
        });
        self.state
            .handle_platform_output(window, full_output.platform_output.clone());
        self.pending = Some(full_output);
        actions
    }

    /// Draw the last laid-out frame on top of `view`. Returns command buffers
    /// that must be submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(full_output) = self.pending.take() else {
            return Vec::new();
        };
        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
        command_buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_window() {
        let panel = ControlPanel::default();
        assert_eq!(panel.global_intensity, 100);
        assert_eq!(panel.spot_intensity, 100);
        assert_eq!(panel.shading, Shading::Pbr);
    }

    #[test]
    fn slider_values_become_fractions() {
        assert_eq!(intensity_fraction(100), 1.0);
        assert_eq!(intensity_fraction(25), 0.25);
        assert_eq!(intensity_fraction(0), 0.0);
        assert_eq!(intensity_fraction(250), 1.0);
    }

    #[test]
    fn idle_frame_reports_nothing() {
        let ctx = egui::Context::default();
        let mut panel = ControlPanel::default();
        let mut actions = vec![UiAction::Quit];
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = panel.show(ctx);
        });
        assert!(actions.is_empty());
        assert_eq!(panel, ControlPanel::default());
    }
}
