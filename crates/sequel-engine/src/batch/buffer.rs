use crate::error::{Error, Result};

use super::config::BatchConfig;
use super::vertex::Vertex;

/// Outcome of [`VertexBuffer::reserve`] that required new capacity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Growth {
    pub old_capacity: usize,
    pub new_capacity: usize,
}

/// Pending vertices accumulated between two flushes.
///
/// Invariants:
/// - `len() <= capacity() <= max_vertices`
/// - capacity only grows, and is always `initial + k * expand_step`
///
/// The GPU mirror is owned by the backend; callers resize it whenever
/// [`reserve`](Self::reserve) reports a [`Growth`].
#[derive(Debug)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
    capacity: usize,
    expand_step: usize,
    max_vertices: usize,
}

impl VertexBuffer {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            vertices: Vec::with_capacity(config.initial_vertices),
            capacity: config.initial_vertices,
            expand_step: config.expand_step,
            max_vertices: config.max_vertices,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Flat scalar view: 4 floats per vertex.
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Makes room for `additional` vertices.
    ///
    /// Returns `Ok(None)` when the current capacity suffices, `Ok(Some(growth))`
    /// after growing (only when `allow_growth`), and an error otherwise. The
    /// ceiling check comes first, so an impossible request is always
    /// [`Error::CapacityExceeded`] regardless of `allow_growth`.
    pub fn reserve(&mut self, additional: usize, allow_growth: bool) -> Result<Option<Growth>> {
        let required = self.vertices.len() + additional;
        if required > self.max_vertices {
            return Err(Error::CapacityExceeded {
                requested: required,
                max: self.max_vertices,
            });
        }
        if required <= self.capacity {
            return Ok(None);
        }
        if !allow_growth {
            return Err(Error::BufferFull {
                requested: required,
                capacity: self.capacity,
            });
        }

        let missing = required - self.capacity;
        let steps = missing.div_ceil(self.expand_step);
        let new_capacity = self.capacity + steps * self.expand_step;
        // A validated config puts the ceiling on the step grid, so whole steps
        // never overshoot it.
        debug_assert!(new_capacity <= self.max_vertices, "ceiling off the step grid");

        let growth = Growth {
            old_capacity: self.capacity,
            new_capacity,
        };
        self.vertices.reserve_exact(new_capacity - self.vertices.len());
        self.capacity = new_capacity;
        Ok(Some(growth))
    }

    /// Appends vertices that were previously reserved.
    ///
    /// Callers reserve first; pushing past capacity is a logic error.
    #[inline]
    pub(crate) fn extend(&mut self, vertices: &[Vertex]) {
        debug_assert!(
            self.vertices.len() + vertices.len() <= self.capacity,
            "VertexBuffer::extend past reserved capacity"
        );
        self.vertices.extend_from_slice(vertices);
    }

    /// Drops all pending vertices; capacity is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.vertices.clear();
    }
}
