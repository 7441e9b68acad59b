//! RenderTarget trait - a drawing destination

use std::any::Any;

/// A drawing destination: the on-screen display surface or an off-screen
/// set of textures.
///
/// Concrete forms are backend-specific and constructed only through the
/// owning `Renderer` (`get_display_target` / `create_texture_target`), so
/// callers never name the backend type. Passing a target created by a
/// different backend to `Renderer::render` is a caller contract violation
/// and is reported as a fatal `InvalidResource` error.
pub trait RenderTarget {
    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}
