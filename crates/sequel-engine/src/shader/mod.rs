//! Shader source assembly.
//!
//! The batching shader is fixed except for one user hook:
//!
//! ```wgsl
//! fn effect(color: vec4<f32>, uv: vec2<f32>) -> vec4<f32>
//! ```
//!
//! `color` is the uniform color, already multiplied by the texel when a texture
//! is bound. Declared user uniforms are readable from the effect through
//! `param_<name>()` (or `effect_param(slot)`).

use std::collections::HashMap;

use anyhow::{bail, Result};
use bytemuck::{Pod, Zeroable};

use crate::backend::UniformLocation;

/// Number of `vec4` slots available to user uniforms.
pub const MAX_EFFECT_UNIFORMS: usize = 8;

/// Effect used when none (or an empty one) is supplied.
pub const DEFAULT_EFFECT: &str = "fn effect(color: vec4<f32>, uv: vec2<f32>) -> vec4<f32> {\n    return color;\n}\n";

const BOILERPLATE: &str = include_str!("sprite.wgsl");

/// User-facing shader customization.
#[derive(Debug, Clone, Default)]
pub struct ShaderOptions {
    /// WGSL source defining `effect`. `None` or blank selects [`DEFAULT_EFFECT`].
    pub effect: Option<String>,
    /// Names of user uniforms, assigned slots in order.
    pub uniforms: Vec<String>,
}

impl ShaderOptions {
    pub fn with_effect(mut self, source: impl Into<String>) -> Self {
        self.effect = Some(source.into());
        self
    }

    pub fn with_uniform(mut self, name: impl Into<String>) -> Self {
        self.uniforms.push(name.into());
        self
    }
}

/// Uniform block shared by both shader stages (`Globals` in WGSL).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Globals {
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub flags: [u32; 4],
    pub params: [[f32; 4]; MAX_EFFECT_UNIFORMS],
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            transform: glam::Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
            flags: [0; 4],
            params: [[0.0; 4]; MAX_EFFECT_UNIFORMS],
        }
    }
}

/// Full WGSL module: boilerplate, uniform accessors, then the effect.
pub fn compose(options: &ShaderOptions) -> Result<String> {
    let table = uniform_table(options)?;

    let effect = options
        .effect
        .as_deref()
        .filter(|src| !src.trim().is_empty())
        .unwrap_or(DEFAULT_EFFECT);

    let mut slots: Vec<(&String, &UniformLocation)> = table.iter().collect();
    slots.sort_by_key(|(_, loc)| loc.0);

    let mut source = String::with_capacity(BOILERPLATE.len() + effect.len() + 64 * slots.len());
    source.push_str(BOILERPLATE);
    source.push('\n');
    for (name, loc) in slots {
        source.push_str(&format!(
            "fn param_{name}() -> vec4<f32> {{\n    return globals.params[{}];\n}}\n",
            loc.0
        ));
    }
    source.push_str(effect);
    Ok(source)
}

/// Name → slot table, validated against WGSL identifier rules and the slot count.
pub fn uniform_table(options: &ShaderOptions) -> Result<HashMap<String, UniformLocation>> {
    if options.uniforms.len() > MAX_EFFECT_UNIFORMS {
        bail!(
            "{} user uniforms declared, at most {MAX_EFFECT_UNIFORMS} are supported",
            options.uniforms.len()
        );
    }

    let mut table = HashMap::with_capacity(options.uniforms.len());
    for (slot, name) in options.uniforms.iter().enumerate() {
        if !is_identifier(name) {
            bail!("uniform name {name:?} is not a valid WGSL identifier");
        }
        if table.insert(name.clone(), UniformLocation(slot as u32)).is_some() {
            bail!("uniform {name:?} declared twice");
        }
    }
    Ok(table)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
