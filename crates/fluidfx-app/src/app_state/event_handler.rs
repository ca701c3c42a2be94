//! `ApplicationHandler` implementation for the winit event loop.

use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use fluidfx_common::PhysicalSize;

use super::core::FluidFxApp;

impl ApplicationHandler for FluidFxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.handle_resize(PhysicalSize::new(size.width, size.height));
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x, position.y, Instant::now());
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer.on_leave();
            }

            WindowEvent::RedrawRequested => {
                if self.should_exit {
                    event_loop.exit();
                    return;
                }
                self.render_frame(Instant::now());
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
        }
    }
}

impl FluidFxApp {
    fn handle_resize(&mut self, size: PhysicalSize) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if let Some(ref mut driver) = self.driver {
            if driver.size() == size {
                return;
            }
            if let Err(e) = driver.resize(size) {
                tracing::error!("Resize to {}x{} failed: {e}", size.width, size.height);
                self.shutdown();
                return;
            }
        }
        self.request_redraw();
    }

    pub(super) fn handle_cursor_moved(&mut self, x: f64, y: f64, now: Instant) {
        let Some(ref driver) = self.driver else {
            return;
        };
        let height = driver.size().height as f32;
        self.pointer.on_move(x as f32, y as f32, height, now);
    }
}
