//! In-memory scene graph and the [`SceneHost`] that records into it.
//!
//! A [`DeckScene`] is what a design tool would show after assembly: pages
//! holding clipped slide frames, each frame holding placed nodes. The scene
//! serialises to JSON and is the input of the exporters.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::font::{FontBook, FontDescriptor};
use crate::host::{FrameId, FrameSpec, RenderHost};
use crate::primitive::Primitive;
use crate::{DeckError, DeckResult};

/// Unique identifier for a placed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new unique node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier.
    pub id: NodeId,
    /// The primitive as placed, with its resolved font.
    pub primitive: Primitive,
}

/// A slide frame on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Host-assigned identifier.
    pub id: FrameId,
    /// Frame name, e.g. `01 - HERO`.
    pub name: String,
    /// X offset on the page.
    pub x: f32,
    /// Y offset on the page.
    pub y: f32,
    /// Frame width.
    pub width: f32,
    /// Frame height.
    pub height: f32,
    /// Background fill as hex.
    pub background: String,
    /// Content outside the frame bounds is hidden.
    pub clips_content: bool,
    /// Nodes in paint order.
    pub nodes: Vec<Node>,
}

impl Frame {
    fn from_spec(id: FrameId, spec: &FrameSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            background: spec.background.clone(),
            clips_content: true,
            nodes: Vec::new(),
        }
    }

    /// Iterate over the primitives in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.nodes.iter().map(|n| &n.primitive)
    }
}

/// A named page of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page name, the deck title.
    pub name: String,
    /// Frames in creation order.
    pub frames: Vec<Frame>,
}

impl Page {
    /// Bounding box of all frames as `(x, y, width, height)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let first = self.frames.first()?;
        let (mut x0, mut y0) = (first.x, first.y);
        let (mut x1, mut y1) = (first.x + first.width, first.y + first.height);
        for f in &self.frames[1..] {
            x0 = x0.min(f.x);
            y0 = y0.min(f.y);
            x1 = x1.max(f.x + f.width);
            y1 = y1.max(f.y + f.height);
        }
        Some((x0, y0, x1 - x0, y1 - y0))
    }
}

/// Everything a [`SceneHost`] recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckScene {
    /// Pages in creation order.
    pub pages: Vec<Page>,
}

impl DeckScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently created page.
    #[must_use]
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.last()
    }

    /// All frames across pages.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.pages.iter().flat_map(|p| p.frames.iter())
    }

    /// Find a frame by name.
    #[must_use]
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames().find(|f| f.name == name)
    }

    /// Number of frames across pages.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames().count()
    }

    /// Number of placed nodes across frames.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.frames().map(|f| f.nodes.len()).sum()
    }

    /// Check if the scene has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self).map_err(DeckError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        serde_json::from_str(json).map_err(DeckError::Serialization)
    }

    fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.pages
            .iter_mut()
            .flat_map(|p| p.frames.iter_mut())
            .find(|f| f.id == id)
    }
}

/// A [`RenderHost`] that records everything into a [`DeckScene`].
///
/// Text can only be placed in a font that was loaded first, mirroring
/// design tools that refuse to edit characters of an unloaded font.
#[derive(Debug, Clone)]
pub struct SceneHost {
    scene: DeckScene,
    fonts: FontBook,
    loaded: BTreeSet<FontDescriptor>,
    next_frame: u64,
    fail_on_frame: Option<usize>,
    finished: bool,
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new(FontBook::standard())
    }
}

impl SceneHost {
    /// Create a host that can load the fonts in `fonts`.
    #[must_use]
    pub fn new(fonts: FontBook) -> Self {
        Self {
            scene: DeckScene::new(),
            fonts,
            loaded: BTreeSet::new(),
            next_frame: 0,
            fail_on_frame: None,
            finished: false,
        }
    }

    /// Make creation of the `index`-th frame (0-based) fail.
    #[must_use]
    pub fn fail_on_frame(mut self, index: usize) -> Self {
        self.fail_on_frame = Some(index);
        self
    }

    /// The recorded scene.
    #[must_use]
    pub fn scene(&self) -> &DeckScene {
        &self.scene
    }

    /// Consume the host, returning the recorded scene.
    #[must_use]
    pub fn into_scene(self) -> DeckScene {
        self.scene
    }

    /// Fonts loaded so far.
    pub fn loaded_fonts(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.loaded.iter()
    }

    /// Whether [`RenderHost::finish`] was called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[async_trait]
impl RenderHost for SceneHost {
    async fn create_page(&mut self, name: &str) -> DeckResult<()> {
        self.scene.pages.push(Page {
            name: name.to_string(),
            frames: Vec::new(),
        });
        tracing::debug!(page = name, "Created page");
        Ok(())
    }

    async fn create_frame(&mut self, spec: &FrameSpec) -> DeckResult<FrameId> {
        let index = self.scene.frame_count();
        if self.fail_on_frame == Some(index) {
            return Err(DeckError::Host(format!(
                "Injected failure creating frame {}",
                spec.name
            )));
        }

        let id = FrameId(self.next_frame);
        let page = self
            .scene
            .pages
            .last_mut()
            .ok_or_else(|| DeckError::Host("No page to create a frame on".to_string()))?;
        page.frames.push(Frame::from_spec(id, spec));
        self.next_frame += 1;

        tracing::debug!(%id, name = %spec.name, x = spec.x, "Created frame");
        Ok(id)
    }

    async fn load_font(&mut self, font: &FontDescriptor) -> DeckResult<()> {
        if !self.fonts.contains(font) {
            return Err(DeckError::FontUnavailable {
                family: font.family.clone(),
                style: font.style.clone(),
            });
        }
        self.loaded.insert(font.clone());
        Ok(())
    }

    async fn place(&mut self, frame: FrameId, primitive: &Primitive) -> DeckResult<()> {
        if let Primitive::Text(text) = primitive {
            if !self.loaded.contains(&text.font) {
                return Err(DeckError::FontUnavailable {
                    family: text.font.family.clone(),
                    style: text.font.style.clone(),
                });
            }
        }

        let target = self
            .scene
            .frame_mut(frame)
            .ok_or_else(|| DeckError::FrameNotFound(frame.to_string()))?;
        target.nodes.push(Node {
            id: NodeId::new(),
            primitive: primitive.clone(),
        });
        Ok(())
    }

    async fn finish(&mut self) -> DeckResult<()> {
        self.finished = true;
        if let Some((x, y, w, h)) = self.scene.current_page().and_then(Page::bounds) {
            tracing::debug!(x, y, width = w, height = h, "Page bounds");
        }
        Ok(())
    }
}
