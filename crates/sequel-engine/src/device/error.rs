/// What the frame loop should do after a failed surface acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame can render.
    Reconfigured,
    /// Skip this frame and try again on the next redraw.
    SkipFrame,
    /// The device cannot continue (out of memory); exit the event loop.
    Fatal,
}
