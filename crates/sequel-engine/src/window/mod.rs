//! Single-window event loop.
//!
//! [`Runtime::run`] opens a window, binds a [`Gpu`](crate::device::Gpu) to it
//! and calls [`App::on_frame`] once per redraw until the window closes or the
//! app asks to exit.

mod app;
mod clock;
mod runtime;

pub use app::{App, AppControl, FrameCtx};
pub use clock::{FrameClock, FrameTime};
pub use runtime::{Runtime, RuntimeConfig};
