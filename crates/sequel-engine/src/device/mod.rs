//! wgpu device and window surface.
//!
//! [`Gpu`] owns the instance, adapter, device, queue and the configured surface.
//! The batching backend borrows the device and queue from it; frames are
//! acquired here and handed to the backend as a render target.

mod context;
mod error;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use error::SurfaceErrorAction;
pub use init::GpuInit;
