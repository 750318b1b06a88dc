//! Application event loop.
//!
//! Each frame follows the same order:
//! 1. Window events go to the control panel first and to the camera only when
//!    the panel did not use them
//! 2. The panel is laid out and its actions are applied to the scene
//! 3. Camera and light state is uploaded
//! 4. The scene is drawn, the panel is painted over it and the frame presented
//!
//! Redraws are paced to the configured frame rate with `ControlFlow::WaitUntil`.

use std::{iter, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::SceneConfig,
    context::Context,
    gui::{Gui, UiAction},
    scene::Scene,
};

/// Decides when the next frame is due.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            next: now,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    pub fn next_frame(&self) -> Instant {
        self.next
    }

    /// Returns `true` if a frame is due at `now` and schedules the one after.
    /// Missed frames are dropped rather than rendered in a burst.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.frame;
        if self.next <= now {
            self.next = now + self.frame;
        }
        true
    }
}

struct AppState {
    ctx: Context,
    scene: Scene,
    gui: Gui,
}

impl AppState {
    /// Lay out the control panel and apply its actions. Returns `true` if the
    /// user asked to quit.
    fn update(&mut self) -> bool {
        let mut quit = false;
        for action in self.gui.run(&self.ctx.window) {
            match action {
                UiAction::Quit => quit = true,
                action => self.scene.apply(&action),
            }
        }
        self.scene
            .update(&self.ctx.queue, self.ctx.view_proj(), self.ctx.camera.position());
        quit
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.scene
                .render()
                .into_batches()
                .draw(
                    &self.ctx.pipelines,
                    &self.ctx.queue,
                    self.scene.bind_group(),
                    &mut render_pass,
                );
        }

        let size = [self.ctx.config.width, self.ctx.config.height];
        let gui_buffers =
            self.gui
                .paint(&self.ctx.device, &self.ctx.queue, &mut encoder, &view, size);
        self.ctx
            .queue
            .submit(gui_buffers.into_iter().chain(iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    clock: FrameClock,
}

impl App {
    pub fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        let clock = FrameClock::new(config.fps, Instant::now());
        Ok(Self {
            async_runtime,
            config,
            state: None,
            clock,
        })
    }

    /// Release the scene and stop the loop. Events still queued behind this
    /// one find no state and are ignored.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.scene.dispose();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create the window: {e}");
                event_loop.exit();
                return;
            }
        };

        let config = &self.config;
        let init = async {
            let ctx = Context::new(window.clone(), config).await?;
            let scene = Scene::new(&ctx.gpu(), &config.asset_dir).await;
            anyhow::Ok((ctx, scene))
        };
        match self.async_runtime.block_on(init) {
            Ok((ctx, scene)) => {
                let gui = Gui::new(&window, &ctx.device, ctx.config.format);
                self.state = Some(AppState { ctx, scene, gui });
                window.request_redraw();
            }
            Err(e) => {
                log::error!("App initialization failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        let consumed = state.gui.on_window_event(&state.ctx.window, &event);
        if !consumed {
            state
                .ctx
                .controller
                .handle_window_events(&mut state.ctx.camera, &event);
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                state.ctx.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if state.update() {
                    self.shutdown(event_loop);
                    return;
                }
                match state.render() {
                    Ok(()) => (),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(e) => log::error!("Unable to render {e}"),
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        if self.clock.tick(Instant::now()) {
            state.ctx.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.scene.dispose();
        }
    }
}

pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_is_about_sixteen_milliseconds() {
        let clock = FrameClock::new(60, Instant::now());
        let frame = clock.frame_duration().as_secs_f64();
        assert!((frame - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn first_frame_is_due_immediately() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        assert!(clock.tick(start));
        assert!(!clock.tick(start));
        assert_eq!(clock.next_frame(), start + clock.frame_duration());
    }

    #[test]
    fn frames_follow_the_cadence() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        let frame = clock.frame_duration();
        assert!(clock.tick(start));
        assert!(!clock.tick(start + frame / 2));
        assert!(clock.tick(start + frame));
        assert_eq!(clock.next_frame(), start + frame * 2);
    }

    #[test]
    fn stalls_do_not_cause_a_burst() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60, start);
        let frame = clock.frame_duration();
        assert!(clock.tick(start));
        let late = start + Duration::from_secs(1);
        assert!(clock.tick(late));
        assert!(!clock.tick(late + frame / 2));
        assert_eq!(clock.next_frame(), late + frame);
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        let clock = FrameClock::new(0, Instant::now());
        assert_eq!(clock.frame_duration(), Duration::from_secs(1));
    }
}
