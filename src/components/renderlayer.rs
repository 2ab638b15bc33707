use serde::{Deserialize, Serialize};

/// Draw layer. Only [`RenderLayer::GameObject`] entities take part in
/// body-vs-body collision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderLayer {
    Background,
    #[default]
    GameObject,
    Ui,
}
