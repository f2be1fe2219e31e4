use std::collections::{BTreeSet, HashMap};

use glam::Mat4;

use crate::batch::{BlendFunc, FilterMode, TextureId, Vertex};
use crate::coords::Color;

use super::{Backend, GraphicsError, TextureImage, UniformLocation, UniformValue};

/// A backend call captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ResizeVertexBuffer(usize),
    Draw(Vec<Vertex>),
    SetColor(Color),
    SetTransform(Mat4),
    BindTexture(Option<TextureId>),
    SetBlend(BlendFunc),
    Clear(Color),
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
        filter: FilterMode,
    },
    FreeTexture(TextureId),
    SetUniform(UniformLocation, UniformValue),
    Release,
}

/// In-memory backend that records every call in order.
///
/// Holds no GPU resources, so the batching engine can be exercised headless.
/// Errors can be injected with [`push_error`](Self::push_error) to drive the
/// diagnostics path.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<Command>,
    uniforms: HashMap<String, UniformLocation>,
    uniform_values: HashMap<UniformLocation, UniformValue>,
    live_textures: BTreeSet<TextureId>,
    next_texture: u32,
    vertex_capacity: usize,
    errors: Vec<GraphicsError>,
    detached: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares user uniforms, assigning slots in order.
    pub fn with_uniforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (slot, name) in names.into_iter().enumerate() {
            self.uniforms.insert(name.into(), UniformLocation(slot as u32));
        }
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Forgets recorded commands; resources and uniform values are kept.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Vertex lists of every draw, in submission order.
    pub fn draws(&self) -> Vec<&[Vertex]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw(v) => Some(v.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, Command::Draw(_))).count()
    }

    /// Current capacity of the vertex buffer mirror.
    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    pub fn uniform_value(&self, location: UniformLocation) -> Option<UniformValue> {
        self.uniform_values.get(&location).copied()
    }

    pub fn is_live(&self, texture: TextureId) -> bool {
        self.live_textures.contains(&texture)
    }

    /// With `detached`, draws are dropped as if there were no render target.
    pub fn set_detached(&mut self, detached: bool) {
        self.detached = detached;
    }

    pub fn push_error(&mut self, error: GraphicsError) {
        self.errors.push(error);
    }
}

impl Backend for RecordingBackend {
    fn resize_vertex_buffer(&mut self, capacity: usize) {
        self.vertex_capacity = capacity;
        self.commands.push(Command::ResizeVertexBuffer(capacity));
    }

    fn draw(&mut self, vertices: &[Vertex]) -> bool {
        debug_assert!(vertices.len() <= self.vertex_capacity, "draw larger than mirror");
        if self.detached {
            return false;
        }
        self.commands.push(Command::Draw(vertices.to_vec()));
        true
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(Command::SetColor(color));
    }

    fn set_transform(&mut self, matrix: Mat4) {
        self.commands.push(Command::SetTransform(matrix));
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.commands.push(Command::BindTexture(texture));
    }

    fn set_blend(&mut self, blend: BlendFunc) {
        self.commands.push(Command::SetBlend(blend));
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(Command::Clear(color));
    }

    fn create_texture(&mut self, image: TextureImage<'_>) -> TextureId {
        self.next_texture += 1;
        let Some(id) = TextureId::new(self.next_texture) else {
            unreachable!("texture counter starts at 1");
        };
        self.live_textures.insert(id);
        self.commands.push(Command::CreateTexture {
            id,
            width: image.width,
            height: image.height,
            filter: image.filter,
        });
        id
    }

    fn free_texture(&mut self, texture: TextureId) -> bool {
        if !self.live_textures.remove(&texture) {
            return false;
        }
        self.commands.push(Command::FreeTexture(texture));
        true
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.uniform_values.insert(location, value);
        self.commands.push(Command::SetUniform(location, value));
    }

    fn poll_error(&mut self, drain: bool) -> Option<GraphicsError> {
        let latest = self.errors.pop();
        if drain {
            self.errors.clear();
        }
        latest
    }

    fn release(&mut self) {
        self.live_textures.clear();
        self.vertex_capacity = 0;
        self.commands.push(Command::Release);
    }
}
