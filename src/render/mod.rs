//! Rendering backend(s).

/// Frame type, offscreen targets and the [`backend::RenderSurface`] trait.
pub mod backend;
/// CPU backend powered by `vello_cpu`.
pub mod cpu;
