use crate::catalog::FrameCatalog;
use crate::config::Playback;
use serde::{Deserialize, Serialize};

/// 2D point (pixels). Used for offsets, pivots, and vertex coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `width,height` are sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    /// Exclusive right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
    /// Exclusive bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

fn default_pivot() -> Point {
    Point::new(0.5, 0.5)
}

/// A sprite as described by the texture packer.
///
/// `frame_rect` is the packed region; when `rotated` is set it is stored rotated
/// 90° clockwise, so its width/height are swapped relative to the sprite.
/// `corner_offset` is the trim offset from the untrimmed image's top-left,
/// expressed in the unrotated frame. Vertices use a bottom-left origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceSprite {
    pub name: String,
    pub frame_rect: Rect,
    pub untrimmed_size: Size,
    #[serde(default)]
    pub corner_offset: Point,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
    #[serde(default = "default_pivot")]
    pub pivot: Point,
    #[serde(default)]
    pub vertices: Vec<Point>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

/// One page of the packer document: a single source image and its sprites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcePage {
    /// Image file name, relative to the document.
    pub name: String,
    pub size: Size,
    #[serde(default)]
    pub sprites: Vec<SourceSprite>,
}

/// Parsed texture-packer atlas description (pages -> sprites).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AtlasDocument {
    #[serde(default)]
    pub pages: Vec<SourcePage>,
}

impl AtlasDocument {
    /// Parses the typed JSON representation of a packer document.
    pub fn from_json_str(s: &str) -> crate::error::Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| crate::error::TpAtlasError::MalformedDocument(e.to_string()))
    }

    /// Page image names in page order.
    pub fn page_names(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.name.clone()).collect()
    }
}

/// Sprite geometry in upright, top-left-origin, untrimmed source-image space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalFrame {
    pub id: String,
    /// Always the untrimmed, upright size; never swapped for rotated sprites.
    pub rect: Rect,
    /// Kept for consumers that still sample from the packed (rotated) region.
    pub rotated: bool,
    pub trimmed: bool,
    pub pivot: Point,
    /// Top-left origin.
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
}

/// A page of canonical frames, ready for the layout stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    /// Dense, 0-based, equal to the position in `Atlas::pages`.
    pub index: usize,
    pub name: String,
    pub size: Size,
    pub frames: Vec<CanonicalFrame>,
}

/// A flipbook animation over catalog frame ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationDescriptor {
    pub id: String,
    /// Ordered member frame ids.
    pub frames: Vec<String>,
    pub playback: Playback,
    pub fps: u32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Implicit one-frame animation for a sprite; its frame label has no `"{id}/"` prefix.
    pub single_frame: bool,
}

impl AnimationDescriptor {
    /// The implicit animation generated for every sprite.
    pub fn single(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            frames: vec![id.clone()],
            id,
            playback: Playback::None,
            fps: 0,
            flip_horizontal: false,
            flip_vertical: false,
            single_frame: true,
        }
    }

    /// Externally visible label for one of this animation's members.
    pub fn frame_label(&self, member: &str) -> String {
        if self.single_frame {
            member.to_string()
        } else {
            format!("{}/{}", self.id, member)
        }
    }
}

/// Texture image layout the encoder should produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    Texture2D,
    Array2D,
}

/// Assembled atlas: pages, animations, and the frame catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Atlas {
    pub pages: Vec<Page>,
    /// Single-frame animations first (catalog order), then user animations.
    pub animations: Vec<AnimationDescriptor>,
    pub catalog: FrameCatalog,
    /// Page image base names, in page order.
    pub page_names: Vec<String>,
    /// Multi-page intent from the user config; consumed by the texture encoder.
    pub is_paged_atlas: bool,
}

/// Summary counts for an assembled atlas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AtlasStats {
    pub num_pages: usize,
    pub num_frames: usize,
    pub num_animations: usize,
    /// User-declared (multi-frame) animations only.
    pub num_flipbooks: usize,
    /// Total member frames across all animations.
    pub num_animation_frames: usize,
    pub num_rotated: usize,
    pub num_trimmed: usize,
    /// Sum of canonical frame areas (px²).
    pub frame_area: f64,
}

impl Atlas {
    pub fn texture_kind(&self) -> TextureKind {
        if self.pages.len() > 1 || self.is_paged_atlas {
            TextureKind::Array2D
        } else {
            TextureKind::Texture2D
        }
    }

    /// Number of array layers for `Array2D`, 0 for a plain 2D texture.
    pub fn page_count(&self) -> usize {
        match self.texture_kind() {
            TextureKind::Array2D => self.pages.len(),
            TextureKind::Texture2D => 0,
        }
    }

    /// Frames in catalog (frame index) order, paired with their page index.
    pub fn frames(&self) -> impl Iterator<Item = (usize, &CanonicalFrame)> {
        self.pages
            .iter()
            .flat_map(|p| p.frames.iter().map(move |f| (p.index, f)))
    }

    pub fn stats(&self) -> AtlasStats {
        let mut num_frames = 0;
        let mut num_rotated = 0;
        let mut num_trimmed = 0;
        let mut frame_area = 0f64;
        for (_, frame) in self.frames() {
            num_frames += 1;
            frame_area += frame.rect.area() as f64;
            if frame.rotated {
                num_rotated += 1;
            }
            if frame.trimmed {
                num_trimmed += 1;
            }
        }
        AtlasStats {
            num_pages: self.pages.len(),
            num_frames,
            num_animations: self.animations.len(),
            num_flipbooks: self.animations.iter().filter(|a| !a.single_frame).count(),
            num_animation_frames: self.animations.iter().map(|a| a.frames.len()).sum(),
            num_rotated,
            num_trimmed,
            frame_area,
        }
    }
}

impl AtlasStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Frames: {}, Animations: {} ({} flipbooks, {} frame refs), Rotated: {}, Trimmed: {}, Frame Area: {} px²",
            self.num_pages,
            self.num_frames,
            self.num_animations,
            self.num_flipbooks,
            self.num_animation_frames,
            self.num_rotated,
            self.num_trimmed,
            self.frame_area,
        )
    }
}
