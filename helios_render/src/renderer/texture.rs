//! Texture trait, pixel formats, and CPU-side pixel buffers

use std::any::Any;

use crate::error::Result;
use crate::render_bail;

/// Pixel format of a texture or pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8_UNORM,
    R8G8B8_UNORM,
    R8G8B8A8_UNORM,
    B8G8R8A8_UNORM,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::R8_UNORM => 1,
            TextureFormat::R8G8B8_UNORM => 3,
            TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::B8G8R8A8_UNORM => 4,
            TextureFormat::D24_UNORM_S8_UINT => 4,
        }
    }

    /// Returns true if this is a depth/stencil format
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT)
    }
}

// ===== TEXTURE INFO =====

/// Size and format description of a 2D texture.
///
/// Used both to describe decoded pixel data and to allocate bare textures
/// for render-to-texture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture2dInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
}

impl Texture2dInfo {
    /// Create a new texture description
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self { width, height, format }
    }

    /// Size of one row in bytes
    pub fn row_size(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Total size of the pixel data in bytes
    pub fn data_size(&self) -> usize {
        self.row_size() * self.height as usize
    }
}

// ===== TEXTURE DATA =====

/// A self-describing CPU-side pixel buffer.
///
/// Produced by texture loaders and by `Renderer::display_into_data`.
/// Rows are stored top-down.
#[derive(Debug, Clone)]
pub struct Texture2dData {
    info: Texture2dInfo,
    data: Vec<u8>,
}

impl Texture2dData {
    /// Create a pixel buffer from a description and raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not match the size implied by `info`.
    pub fn new(info: Texture2dInfo, data: Vec<u8>) -> Result<Self> {
        if data.len() != info.data_size() {
            render_bail!("helios::render",
                "Texture2dData: got {} bytes, expected {} for {}x{} {:?}",
                data.len(), info.data_size(), info.width, info.height, info.format);
        }
        Ok(Self { info, data })
    }

    /// Get the size and format description
    pub fn info(&self) -> &Texture2dInfo {
        &self.info
    }

    /// Get the raw pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the raw pixel bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Return a copy with the row order reversed.
    ///
    /// Graphics APIs read pixels bottom-up; this converts to the
    /// conventional top-down image layout (and back).
    pub fn flip_y(&self) -> Self {
        let row = self.info.row_size();
        let mut flipped = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(row).rev() {
            flipped.extend_from_slice(chunk);
        }
        Self {
            info: self.info,
            data: flipped,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// 2D texture resource trait
///
/// Implemented by backend-specific texture types (e.g., GlTexture2d).
/// The texture is destroyed when the last handle is dropped.
pub trait Texture2d {
    /// Get the size and format of this texture
    fn info(&self) -> &Texture2dInfo;

    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
