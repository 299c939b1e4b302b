use crate::config::Playback;
use crate::error::Result;
use crate::iterator::{AnimIterator, FrameStep, MappedAnimIterator};
use crate::model::{Atlas, Point, Rect, TextureKind};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace, warn};

/// Geometry for one catalog frame, in frame index order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameGeometry {
    pub id: String,
    pub page: usize,
    pub rect: Rect,
    pub rotated: bool,
    pub pivot: Point,
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
}

/// An animation's slice of `TextureSet::frame_indices` (`start..end`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextureSetAnimation {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub playback: Playback,
    pub fps: u32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

/// Engine-ready texture set: geometry plus the flattened animation timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextureSet {
    pub texture_kind: TextureKind,
    pub page_count: usize,
    pub geometries: Vec<FrameGeometry>,
    pub animations: Vec<TextureSetAnimation>,
    /// One entry per emitted (animation, frame) pair.
    pub frame_indices: Vec<usize>,
    /// Labels parallel to `frame_indices`.
    pub frame_ids: Vec<String>,
    /// Animation members skipped because they did not resolve.
    pub skipped: usize,
}

impl TextureSet {
    /// Frame indices of animation `id`, if present.
    pub fn animation_frames(&self, id: &str) -> Option<&[usize]> {
        self.animations
            .iter()
            .find(|a| a.id == id)
            .map(|a| &self.frame_indices[a.start..a.end])
    }
}

#[instrument(skip_all)]
/// Emits the texture set for `atlas`, one record per (animation, frame) pair.
pub fn emit_texture_set(atlas: &Atlas) -> Result<TextureSet> {
    let mut iter = MappedAnimIterator::new(&atlas.animations, &atlas.catalog);
    emit_with(atlas, &mut iter)
}

/// Emits using a caller-provided iterator. The iterator is rewound first.
///
/// Unresolved members are logged and skipped rather than failing the pass.
pub fn emit_with<I: AnimIterator + ?Sized>(atlas: &Atlas, iter: &mut I) -> Result<TextureSet> {
    let geometries: Vec<FrameGeometry> = atlas
        .frames()
        .map(|(page, f)| FrameGeometry {
            id: f.id.clone(),
            page,
            rect: f.rect,
            rotated: f.rotated,
            pivot: f.pivot,
            vertices: f.vertices.clone(),
            indices: f.indices.clone(),
        })
        .collect();

    let mut animations = Vec::with_capacity(atlas.animations.len());
    let mut frame_indices = Vec::new();
    let mut frame_ids = Vec::new();
    let mut skipped = 0usize;

    iter.rewind();
    loop {
        let mut anim = match iter.next_animation() {
            Some(desc) => TextureSetAnimation {
                id: desc.id.clone(),
                start: frame_indices.len(),
                end: frame_indices.len(),
                playback: desc.playback,
                fps: desc.fps,
                flip_horizontal: desc.flip_horizontal,
                flip_vertical: desc.flip_vertical,
            },
            None => break,
        };
        loop {
            match iter.next_frame_index()? {
                FrameStep::Frame(index) => {
                    let label = iter.current_frame_label()?;
                    trace!(animation = %anim.id, index, %label, "frame");
                    frame_indices.push(index);
                    frame_ids.push(label);
                }
                FrameStep::Missing(id) => {
                    warn!(animation = %anim.id, frame = %id, "skipping unresolved frame reference");
                    skipped += 1;
                }
                FrameStep::End => break,
            }
        }
        anim.end = frame_indices.len();
        animations.push(anim);
    }

    Ok(TextureSet {
        texture_kind: atlas.texture_kind(),
        page_count: atlas.page_count(),
        geometries,
        animations,
        frame_indices,
        frame_ids,
        skipped,
    })
}
