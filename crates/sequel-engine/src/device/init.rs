/// Device and surface preferences.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` is always supported.
    pub present_mode: wgpu::PresentMode,

    /// Requested composite alpha mode; ignored when the surface lacks it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Features requested from the device. The renderer itself needs none.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Frames the presentation engine may queue. A hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::default(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
