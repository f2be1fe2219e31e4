use winit::event::WindowEvent;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};

use super::clock::FrameTime;

/// Returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Callbacks driven by [`Runtime`](super::Runtime).
pub trait App {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the event loop ends, while the device is still alive.
    fn on_exit(&mut self) {}
}

/// What an app sees during [`App::on_frame`].
///
/// `'a` is the callback; `'w` is the window borrow carried by [`Gpu`].
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    /// Acquires the next swapchain texture, passes its view to `draw`, then
    /// presents it.
    ///
    /// Surface errors are handled here: the frame is skipped, or
    /// [`AppControl::Exit`] is returned when the device cannot continue.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&wgpu::TextureView),
    {
        let frame = match self.gpu.acquire() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        draw(frame.view());

        self.window.pre_present_notify();
        frame.present();
        AppControl::Continue
    }
}
