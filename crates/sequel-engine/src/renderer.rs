//! The batching context.
//!
//! [`Renderer`] accumulates shape geometry in a [`VertexBuffer`] and hands it to
//! its [`Backend`] in as few draws as possible. A draw is issued only when
//! geometry already queued would otherwise be rendered under the wrong state:
//! before a color, texture or blend change, or on an explicit [`flush`].
//!
//! [`flush`]: Renderer::flush

use glam::Mat4;

use crate::backend::{Backend, GraphicsError, TextureImage, UniformLocation, UniformValue};
use crate::batch::geometry::{self, RECTANGLE_VERTICES, TRIANGLE_VERTICES};
use crate::batch::{BatchConfig, BlendFunc, FilterMode, RenderState, TextureId, Vertex, VertexBuffer};
use crate::coords::{Color, Rect, Vec2};
use crate::error::{Error, Result};
use crate::transform;

/// Counters accumulated since the renderer was created.
///
/// Only batches the backend actually submitted are counted; a batch dropped
/// for lack of a render target is not.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BatchStats {
    /// Draws the backend submitted.
    pub flushes: u64,
    /// Vertices carried by those draws.
    pub vertices_submitted: u64,
    /// Capacity growth events of the pending buffer.
    pub growths: u64,
}

pub struct Renderer<B: Backend> {
    backend: B,
    pending: VertexBuffer,
    state: RenderState,
    transform: Mat4,
    config: BatchConfig,
    stats: BatchStats,
}

impl<B: Backend> Renderer<B> {
    /// Sizes the backend's vertex buffer and applies the default state
    /// (white, untextured, alpha blending, identity transform).
    pub fn new(mut backend: B, config: BatchConfig) -> Result<Self> {
        config.validate()?;

        let pending = VertexBuffer::new(&config);
        let state = RenderState::default();
        let transform = Mat4::IDENTITY;

        backend.resize_vertex_buffer(pending.capacity());
        backend.set_transform(transform);
        backend.set_color(state.color);
        backend.bind_texture(state.texture);
        backend.set_blend(state.blend);

        log::debug!(
            "renderer created: {} vertices (step {}, max {}), auto flush {}, auto expand {}",
            config.initial_vertices,
            config.expand_step,
            config.max_vertices,
            config.auto_flush,
            config.auto_expand
        );

        Ok(Self {
            backend,
            pending,
            state,
            transform,
            config,
            stats: BatchStats::default(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct backend access, e.g. to set a frame target.
    ///
    /// State changed here bypasses tracking; flush first if pending geometry
    /// must not see it.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Vertices queued since the last flush.
    pub fn pending_vertices(&self) -> usize {
        self.pending.len()
    }

    pub fn capacity(&self) -> usize {
        self.pending.capacity()
    }

    /// Toggles flushing on state changes; takes effect on the next setter.
    pub fn set_auto_flush(&mut self, enabled: bool) {
        self.config.auto_flush = enabled;
    }

    /// Toggles growth of the pending buffer; takes effect on the next shape.
    pub fn set_auto_expand(&mut self, enabled: bool) {
        self.config.auto_expand = enabled;
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Queues one triangle. Vertices are kept in the given order.
    pub fn triangle(&mut self, positions: [Vec2; 3], uvs: [Vec2; 3]) -> Result<()> {
        self.push(&geometry::triangle(positions, uvs))
    }

    /// Queues `rect` rotated by `angle` radians about its center.
    ///
    /// `uv0` is sampled at the origin corner and `uv1` at the opposite one.
    pub fn rectangle(&mut self, rect: Rect, uv0: Vec2, uv1: Vec2, angle: f32) -> Result<()> {
        self.push(&geometry::rectangle(rect, uv0, uv1, angle))
    }

    fn push(&mut self, vertices: &[Vertex]) -> Result<()> {
        debug_assert!(
            vertices.len() == TRIANGLE_VERTICES || vertices.len() == RECTANGLE_VERTICES,
            "shapes are whole triangles"
        );

        match self.pending.reserve(vertices.len(), self.config.auto_expand) {
            Ok(None) => {}
            Ok(Some(growth)) => {
                log::debug!(
                    "vertex buffer grown from {} to {} vertices",
                    growth.old_capacity,
                    growth.new_capacity
                );
                self.backend.resize_vertex_buffer(growth.new_capacity);
                self.stats.growths += 1;
            }
            Err(err) => {
                if err.is_fatal() {
                    log::error!("{err}");
                }
                return Err(err);
            }
        }

        self.pending.extend(vertices);
        Ok(())
    }

    // ── submission ────────────────────────────────────────────────────────

    /// Draws every pending vertex in one backend call, then empties the buffer.
    /// Does nothing when nothing is pending.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let count = self.pending.len();
        log::trace!("flush: {count} vertices ({} triangles)", count / TRIANGLE_VERTICES);

        if self.backend.draw(self.pending.vertices()) {
            self.stats.flushes += 1;
            self.stats.vertices_submitted += count as u64;
        } else {
            log::trace!("flush: backend dropped {count} vertices");
        }
        self.pending.reset();
    }

    // ── state ─────────────────────────────────────────────────────────────

    /// Sets the color every following vertex is tinted with.
    ///
    /// Pending geometry is flushed first when the color actually changes and
    /// automatic flushing is on. The backend is updated either way.
    pub fn set_color(&mut self, color: Color) {
        if color != self.state.color && self.config.auto_flush {
            self.flush();
        }
        self.state.color = color;
        self.backend.set_color(color);
    }

    /// Binds `texture`, or disables sampling with `None`.
    pub fn set_texture(&mut self, texture: Option<TextureId>) {
        if texture != self.state.texture && self.config.auto_flush {
            self.flush();
        }
        self.state.texture = texture;
        self.backend.bind_texture(texture);
    }

    pub fn set_blend(&mut self, blend: BlendFunc) {
        if blend != self.state.blend && self.config.auto_flush {
            self.flush();
        }
        self.state.blend = blend;
        self.backend.set_blend(blend);
    }

    /// Replaces the transform with `T(-x, -y) · S(scale_x, scale_y) · R(angle)`.
    ///
    /// Does not flush: pending geometry is drawn with whatever transform is
    /// current when it is flushed.
    pub fn set_transform(&mut self, x: f32, y: f32, scale_x: f32, scale_y: f32, angle_degrees: f32) {
        self.set_transform_matrix(transform::view_matrix(x, y, scale_x, scale_y, angle_degrees));
    }

    /// Same as [`set_transform`](Self::set_transform) with a prebuilt matrix.
    pub fn set_transform_matrix(&mut self, matrix: Mat4) {
        self.transform = matrix;
        self.backend.set_transform(matrix);
    }

    /// Clears the target to `color`. Pending geometry is kept and drawn on top
    /// at the next flush.
    pub fn clear(&mut self, color: Color) {
        self.backend.clear(color);
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// Uploads tightly packed RGBA8 pixels, row by row.
    pub fn create_texture(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        filter: FilterMode,
    ) -> Result<TextureId> {
        if width == 0 || height == 0 {
            log::warn!("rejected texture of size {width}x{height}");
            return Err(Error::InvalidTextureSize { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            log::warn!("rejected {width}x{height} texture: {} bytes of pixel data", pixels.len());
            return Err(Error::InvalidTextureData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(self.backend.create_texture(TextureImage {
            pixels,
            width,
            height,
            filter,
        }))
    }

    /// Deletes `texture`. Unknown ids are ignored.
    ///
    /// If it is the bound texture, pending geometry is flushed (when automatic
    /// flushing is on) and the renderer falls back to untextured drawing.
    pub fn free_texture(&mut self, texture: TextureId) {
        if self.state.texture == Some(texture) {
            if self.config.auto_flush {
                self.flush();
            }
            self.state.texture = None;
            self.backend.bind_texture(None);
        }
        if !self.backend.free_texture(texture) {
            log::trace!("free of unknown texture {}", texture.get());
        }
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.backend.uniform_location(name)
    }

    pub fn set_uniform_float(&mut self, location: UniformLocation, value: f32) {
        self.backend.set_uniform(location, UniformValue::Float(value));
    }

    pub fn set_uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]) {
        self.backend.set_uniform(location, UniformValue::Vec4(value));
    }

    pub fn set_uniform_int(&mut self, location: UniformLocation, value: i32) {
        self.backend.set_uniform(location, UniformValue::Int(value));
    }

    // ── diagnostics / lifecycle ───────────────────────────────────────────

    /// Most recent graphics API error, if any. With `drain`, older errors are
    /// discarded too.
    pub fn error(&mut self, drain: bool) -> Option<GraphicsError> {
        self.backend.poll_error(drain)
    }

    /// Releases the backend's resources and hands it back.
    ///
    /// Pending geometry is discarded, not drawn.
    pub fn teardown(mut self) -> B {
        if !self.pending.is_empty() {
            log::debug!("teardown discards {} pending vertices", self.pending.len());
        }
        self.pending.reset();
        self.backend.release();
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Command, GraphicsErrorKind, RecordingBackend};
    use crate::batch::BlendFactor;

    fn renderer() -> Renderer<RecordingBackend> {
        renderer_with(BatchConfig::default())
    }

    fn renderer_with(config: BatchConfig) -> Renderer<RecordingBackend> {
        let mut r = Renderer::new(RecordingBackend::new(), config).unwrap();
        r.backend_mut().clear_commands();
        r
    }

    fn unit_rect(r: &mut Renderer<RecordingBackend>) {
        r.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Vec2::zero(), Vec2::new(1.0, 1.0), 0.0)
            .unwrap();
    }

    fn tri(r: &mut Renderer<RecordingBackend>) {
        let p = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        r.triangle(p, p).unwrap();
    }

    // ── initialization ────────────────────────────────────────────────────

    #[test]
    fn new_applies_defaults_once() {
        let r = Renderer::new(RecordingBackend::new(), BatchConfig::default()).unwrap();
        assert_eq!(
            r.backend().commands(),
            &[
                Command::ResizeVertexBuffer(BatchConfig::DEFAULT_VERTICES),
                Command::SetTransform(Mat4::IDENTITY),
                Command::SetColor(Color::WHITE),
                Command::BindTexture(None),
                Command::SetBlend(BlendFunc::ALPHA),
            ]
        );
        assert_eq!(*r.state(), RenderState::default());
        assert_eq!(r.pending_vertices(), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = BatchConfig::default().with_capacity(0, 512, 8192);
        assert!(matches!(
            Renderer::new(RecordingBackend::new(), config),
            Err(Error::InvalidConfig(_))
        ));
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn shapes_count_vertices() {
        let mut r = renderer();
        tri(&mut r);
        unit_rect(&mut r);
        tri(&mut r);
        assert_eq!(r.pending_vertices(), 2 * 3 + 6);
        assert_eq!(r.backend().draw_count(), 0);
    }

    #[test]
    fn buffer_full_writes_nothing() {
        let config = BatchConfig::default()
            .with_auto_expand(false)
            .with_capacity(6, 6, 60);
        let mut r = renderer_with(config);
        unit_rect(&mut r);

        let err = r.triangle([Vec2::zero(); 3], [Vec2::zero(); 3]).unwrap_err();
        assert_eq!(err, Error::BufferFull { requested: 9, capacity: 6 });
        assert!(!err.is_fatal());
        assert_eq!(r.pending_vertices(), 6);

        r.flush();
        tri(&mut r);
        assert_eq!(r.pending_vertices(), 3);
    }

    // ── growth ────────────────────────────────────────────────────────────

    #[test]
    fn growth_resizes_mirror_by_one_step() {
        let mut r = renderer();
        for _ in 0..(BatchConfig::DEFAULT_VERTICES / RECTANGLE_VERTICES) {
            unit_rect(&mut r);
        }
        // 85 rectangles = 510 vertices; one more does not fit in 512.
        assert_eq!(r.capacity(), BatchConfig::DEFAULT_VERTICES);
        unit_rect(&mut r);

        let expected = BatchConfig::DEFAULT_VERTICES + BatchConfig::EXPAND_STEP;
        assert_eq!(r.capacity(), expected);
        assert_eq!(r.backend().commands(), &[Command::ResizeVertexBuffer(expected)]);
        assert_eq!(r.backend().vertex_capacity(), expected);
        assert_eq!(r.pending_vertices(), 516);
        assert_eq!(r.stats().growths, 1);
    }

    #[test]
    fn ceiling_is_fatal_and_keeps_pending() {
        let config = BatchConfig::default().with_capacity(6, 6, 12);
        let mut r = renderer_with(config);
        unit_rect(&mut r);
        unit_rect(&mut r);

        let err = r
            .rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Vec2::zero(), Vec2::zero(), 0.0)
            .unwrap_err();
        assert_eq!(err, Error::CapacityExceeded { requested: 18, max: 12 });
        assert!(err.is_fatal());
        assert_eq!(r.pending_vertices(), 12);
        assert_eq!(r.backend().draw_count(), 0);
    }

    #[test]
    fn ceiling_applies_even_without_auto_expand() {
        let config = BatchConfig::default()
            .with_auto_expand(false)
            .with_capacity(3, 3, 3);
        let mut r = renderer_with(config);
        assert!(r.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Vec2::zero(), Vec2::zero(), 0.0)
            .unwrap_err()
            .is_fatal());
    }

    // ── flush ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_flush_is_noop() {
        let mut r = renderer();
        r.flush();
        r.flush();
        assert!(r.backend().commands().is_empty());
        assert_eq!(r.stats(), BatchStats::default());
    }

    #[test]
    fn flush_draws_everything_once_then_resets() {
        let mut r = renderer();
        tri(&mut r);
        tri(&mut r);
        r.flush();
        assert_eq!(r.backend().draws().len(), 1);
        assert_eq!(r.backend().draws()[0].len(), 6);
        assert_eq!(r.pending_vertices(), 0);

        r.flush();
        assert_eq!(r.backend().draw_count(), 1);
        assert_eq!(r.stats().vertices_submitted, 6);
    }

    #[test]
    fn dropped_batch_is_not_counted() {
        let mut r = renderer();
        r.backend_mut().set_detached(true);
        tri(&mut r);
        r.flush();
        assert_eq!(r.pending_vertices(), 0);
        assert_eq!(r.stats(), BatchStats::default());

        r.backend_mut().set_detached(false);
        tri(&mut r);
        r.flush();
        assert_eq!(r.stats().flushes, 1);
        assert_eq!(r.stats().vertices_submitted, 3);
    }

    #[test]
    fn draw_order_follows_call_order() {
        let mut r = renderer();
        r.triangle([Vec2::new(1.0, 0.0); 3], [Vec2::zero(); 3]).unwrap();
        r.flush();
        r.triangle([Vec2::new(2.0, 0.0); 3], [Vec2::zero(); 3]).unwrap();
        r.flush();
        let draws = r.backend().draws();
        assert_eq!(draws[0][0].pos, [1.0, 0.0]);
        assert_eq!(draws[1][0].pos, [2.0, 0.0]);
    }

    // ── color ─────────────────────────────────────────────────────────────

    #[test]
    fn same_color_does_not_flush_but_is_reapplied() {
        let mut r = renderer();
        tri(&mut r);
        r.set_color(Color::WHITE);
        assert_eq!(r.backend().draw_count(), 0);
        assert_eq!(r.backend().commands(), &[Command::SetColor(Color::WHITE)]);
        assert_eq!(r.pending_vertices(), 3);
    }

    #[test]
    fn color_change_flushes_pending_first() {
        let mut r = renderer();
        unit_rect(&mut r);
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        r.set_color(red);

        let cmds = r.backend().commands();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(&cmds[0], Command::Draw(v) if v.len() == 6));
        assert_eq!(cmds[1], Command::SetColor(red));
        assert_eq!(r.pending_vertices(), 0);
        assert_eq!(r.state().color, red);
    }

    #[test]
    fn color_compares_every_component() {
        let mut r = renderer();
        tri(&mut r);
        r.set_color(Color::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(r.backend().draw_count(), 1);

        tri(&mut r);
        r.set_color(Color::new(1.0, 0.5, 1.0, 0.5));
        assert_eq!(r.backend().draw_count(), 2);
        assert_eq!(r.state().color.g, 0.5);
        assert_eq!(r.state().color.r, 1.0);
    }

    #[test]
    fn color_change_with_nothing_pending_draws_nothing() {
        let mut r = renderer();
        r.set_color(Color::BLACK);
        assert_eq!(r.backend().draw_count(), 0);
    }

    // ── texture / blend ───────────────────────────────────────────────────

    #[test]
    fn texture_change_flushes() {
        let mut r = renderer();
        let tex = r.create_texture(&[255; 16], 2, 2, FilterMode::Nearest).unwrap();
        r.backend_mut().clear_commands();

        tri(&mut r);
        r.set_texture(Some(tex));
        assert_eq!(r.backend().draw_count(), 1);
        assert_eq!(r.backend().commands().last(), Some(&Command::BindTexture(Some(tex))));

        tri(&mut r);
        r.set_texture(Some(tex));
        assert_eq!(r.backend().draw_count(), 1);

        r.set_texture(None);
        assert_eq!(r.backend().draw_count(), 2);
        assert_eq!(r.state().texture, None);
    }

    #[test]
    fn blend_is_reissued_but_flushes_only_on_change() {
        let mut r = renderer();
        tri(&mut r);
        r.set_blend(BlendFunc::ALPHA);
        assert_eq!(r.backend().draw_count(), 0);
        assert_eq!(r.backend().commands(), &[Command::SetBlend(BlendFunc::ALPHA)]);

        let half = BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::One);
        r.set_blend(half);
        assert_eq!(r.backend().draw_count(), 1);
        assert_eq!(r.state().blend, BlendFunc::ADDITIVE);
    }

    #[test]
    fn manual_flush_mode_tracks_state_without_drawing() {
        let mut r = renderer_with(BatchConfig::default().with_auto_flush(false));
        tri(&mut r);
        r.set_color(Color::BLACK);
        r.set_blend(BlendFunc::ADDITIVE);
        r.set_texture(TextureId::new(7));

        assert_eq!(r.backend().draw_count(), 0);
        assert_eq!(r.pending_vertices(), 3);
        assert_eq!(r.state().color, Color::BLACK);
        assert_eq!(r.state().blend, BlendFunc::ADDITIVE);
        assert_eq!(r.state().texture, TextureId::new(7));
    }

    #[test]
    fn auto_flush_toggle_applies_to_next_setter() {
        let mut r = renderer_with(BatchConfig::default().with_auto_flush(false));
        tri(&mut r);
        r.set_color(Color::BLACK);
        r.set_auto_flush(true);
        r.set_color(Color::WHITE);
        assert_eq!(r.backend().draw_count(), 1);
    }

    // ── transform / clear ─────────────────────────────────────────────────

    #[test]
    fn transform_replaces_without_flushing() {
        let mut r = renderer();
        tri(&mut r);
        r.set_transform(1.0, 2.0, 3.0, 4.0, 90.0);
        r.set_transform(0.0, 0.0, 1.0, 1.0, 0.0);
        assert_eq!(r.backend().draw_count(), 0);
        assert_eq!(r.transform(), Mat4::IDENTITY);
        assert_eq!(
            r.backend().commands().last(),
            Some(&Command::SetTransform(Mat4::IDENTITY))
        );
    }

    #[test]
    fn clear_uses_given_color_and_keeps_pending() {
        let mut r = renderer();
        tri(&mut r);
        r.clear(Color::BLACK);
        assert_eq!(r.backend().commands(), &[Command::Clear(Color::BLACK)]);
        assert_eq!(r.pending_vertices(), 3);
    }

    // ── resources ─────────────────────────────────────────────────────────

    #[test]
    fn create_texture_validates_input() {
        let mut r = renderer();
        assert_eq!(
            r.create_texture(&[], 0, 4, FilterMode::Nearest),
            Err(Error::InvalidTextureSize { width: 0, height: 4 })
        );
        assert_eq!(
            r.create_texture(&[0; 15], 2, 2, FilterMode::Linear),
            Err(Error::InvalidTextureData { expected: 16, actual: 15 })
        );
        assert!(r.backend().commands().is_empty());

        let id = r.create_texture(&[0; 16], 2, 2, FilterMode::Linear).unwrap();
        assert!(r.backend().is_live(id));
    }

    #[test]
    fn freeing_bound_texture_flushes_and_unbinds() {
        let mut r = renderer();
        let tex = r.create_texture(&[255; 4], 1, 1, FilterMode::Nearest).unwrap();
        r.set_texture(Some(tex));
        tri(&mut r);
        r.backend_mut().clear_commands();

        r.free_texture(tex);
        assert_eq!(r.state().texture, None);
        let cmds = r.backend().commands();
        assert!(matches!(cmds[0], Command::Draw(_)));
        assert_eq!(cmds[1], Command::BindTexture(None));
        assert_eq!(cmds[2], Command::FreeTexture(tex));
    }

    #[test]
    fn freeing_unknown_texture_is_silent() {
        let mut r = renderer();
        let Some(id) = TextureId::new(42) else { unreachable!() };
        r.free_texture(id);
        assert!(r.backend().commands().is_empty());
    }

    // ── uniforms / diagnostics ────────────────────────────────────────────

    #[test]
    fn uniform_setters_pass_through() {
        let mut r = Renderer::new(
            RecordingBackend::new().with_uniforms(["time", "tint"]),
            BatchConfig::default(),
        )
        .unwrap();

        let time = r.uniform_location("time").unwrap();
        let tint = r.uniform_location("tint").unwrap();
        assert_eq!(r.uniform_location("missing"), None);

        r.set_uniform_float(time, 1.5);
        r.set_uniform_vec4(tint, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(r.backend().uniform_value(time), Some(UniformValue::Float(1.5)));
        assert_eq!(
            r.backend().uniform_value(tint),
            Some(UniformValue::Vec4([0.1, 0.2, 0.3, 0.4]))
        );

        r.set_uniform_int(time, 3);
        assert_eq!(r.backend().uniform_value(time), Some(UniformValue::Int(3)));
    }

    #[test]
    fn error_polling_returns_latest_and_drains() {
        let mut r = renderer();
        assert_eq!(r.error(false), None);

        r.backend_mut().push_error(GraphicsError::new(GraphicsErrorKind::Validation, "first"));
        r.backend_mut().push_error(GraphicsError::new(GraphicsErrorKind::OutOfMemory, "second"));
        r.backend_mut().push_error(GraphicsError::new(GraphicsErrorKind::Internal, "third"));

        assert_eq!(r.error(false).map(|e| e.message), Some("third".to_owned()));
        assert_eq!(r.error(true).map(|e| e.message), Some("second".to_owned()));
        assert_eq!(r.error(false), None);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn teardown_releases_without_drawing() {
        let mut r = renderer();
        tri(&mut r);
        let backend = r.teardown();
        assert_eq!(backend.commands(), &[Command::Release]);
        assert_eq!(backend.vertex_capacity(), 0);
    }
}
