use crate::error::{Error, Result};

/// Environment variable that turns off flush-on-state-change when set.
pub const ENV_NO_AUTOMATIC_FLUSH: &str = "SEQUEL_NO_AUTOMATIC_FLUSH";

/// Environment variable that turns off automatic buffer growth when set.
pub const ENV_NO_AUTOMATIC_EXPAND: &str = "SEQUEL_NO_AUTOMATIC_EXPAND";

/// Runtime configuration of the batching engine.
///
/// Capacities are counted in vertices. Both automations are read at call time,
/// so toggling them between frames takes effect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Flush pending geometry before a color/texture/blend change.
    ///
    /// When disabled, the caller must flush before a state change that should
    /// only apply to later geometry.
    pub auto_flush: bool,

    /// Grow the pending buffer when a shape does not fit.
    ///
    /// When disabled, a shape that does not fit fails with [`Error::BufferFull`].
    pub auto_expand: bool,

    /// Capacity the pending buffer and its GPU mirror start with.
    pub initial_vertices: usize,

    /// Growth increment.
    pub expand_step: usize,

    /// Absolute ceiling. Requests past it fail with [`Error::CapacityExceeded`].
    ///
    /// Must be `initial_vertices` plus a whole number of `expand_step`s, so every
    /// capacity the buffer reaches is `initial_vertices + k * expand_step`.
    pub max_vertices: usize,
}

impl BatchConfig {
    pub const DEFAULT_VERTICES: usize = 512;
    pub const EXPAND_STEP: usize = 512;
    pub const MAX_VERTICES: usize = 8192;

    /// Default configuration with the automation toggles taken from the
    /// environment (`SEQUEL_NO_AUTOMATIC_FLUSH`, `SEQUEL_NO_AUTOMATIC_EXPAND`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).is_some())
    }

    fn from_lookup(is_set: impl Fn(&str) -> bool) -> Self {
        Self {
            auto_flush: !is_set(ENV_NO_AUTOMATIC_FLUSH),
            auto_expand: !is_set(ENV_NO_AUTOMATIC_EXPAND),
            ..Self::default()
        }
    }

    pub fn with_auto_flush(mut self, enabled: bool) -> Self {
        self.auto_flush = enabled;
        self
    }

    pub fn with_auto_expand(mut self, enabled: bool) -> Self {
        self.auto_expand = enabled;
        self
    }

    pub fn with_capacity(mut self, initial: usize, step: usize, max: usize) -> Self {
        self.initial_vertices = initial;
        self.expand_step = step;
        self.max_vertices = max;
        self
    }

    /// Checks the capacity constants against each other.
    pub fn validate(&self) -> Result<()> {
        if self.initial_vertices == 0 {
            return Err(Error::InvalidConfig("initial_vertices must be non-zero".into()));
        }
        if self.expand_step == 0 {
            return Err(Error::InvalidConfig("expand_step must be non-zero".into()));
        }
        if self.initial_vertices > self.max_vertices {
            return Err(Error::InvalidConfig(format!(
                "initial_vertices ({}) exceeds max_vertices ({})",
                self.initial_vertices, self.max_vertices
            )));
        }
        if (self.max_vertices - self.initial_vertices) % self.expand_step != 0 {
            return Err(Error::InvalidConfig(format!(
                "max_vertices ({}) is not initial_vertices ({}) plus whole steps of {}",
                self.max_vertices, self.initial_vertices, self.expand_step
            )));
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            auto_flush: true,
            auto_expand: true,
            initial_vertices: Self::DEFAULT_VERTICES,
            expand_step: Self::EXPAND_STEP,
            max_vertices: Self::MAX_VERTICES,
        }
    }
}
