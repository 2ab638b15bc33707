use serde::{Deserialize, Serialize};

/// Texture reference consumed by the renderer.
///
/// `texture_id` is resolved through the
/// [`TextureStore`](crate::resources::texturestore::TextureStore); `0` means
/// the lookup failed and nothing is drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture_name: String,
    pub texture_id: u32,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(texture_name: impl Into<String>, texture_id: u32) -> Self {
        Self {
            texture_name: texture_name.into(),
            texture_id,
            flip_h: false,
        }
    }
}
