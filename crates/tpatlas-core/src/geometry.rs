//! Undo packer-specific transforms (rotation, trimming, bottom-left vertex origin).

use crate::model::{CanonicalFrame, Point, Rect, SourceSprite};

/// Converts a packer sprite into canonical, upright, top-left-origin geometry.
///
/// Total: malformed geometry is passed through unvalidated.
pub fn canonicalize(sprite: &SourceSprite) -> CanonicalFrame {
    CanonicalFrame {
        id: sprite.name.clone(),
        rect: canonical_rect(sprite),
        rotated: sprite.rotated,
        trimmed: sprite.trimmed,
        pivot: sprite.pivot,
        vertices: sprite
            .vertices
            .iter()
            .map(|p| flip_y(*p, sprite.untrimmed_size.height))
            .collect(),
        indices: sprite.indices.clone(),
    }
}

/// Untrimmed sprite rectangle in source-image space.
///
/// Width/height are always the untrimmed, upright size, even when `frame_rect`
/// is stored rotated (and thus width/height swapped).
pub fn canonical_rect(sprite: &SourceSprite) -> Rect {
    let fr = &sprite.frame_rect;
    let off = sprite.corner_offset;
    let size = sprite.untrimmed_size;
    if sprite.rotated {
        // frame_rect is rotated 90° clockwise; the offset is in the unrotated frame
        let corner_x = fr.x + fr.width + off.y;
        let corner_y = fr.y - off.x;
        Rect::new(corner_x - size.height, corner_y, size.width, size.height)
    } else {
        Rect::new(fr.x - off.x, fr.y - off.y, size.width, size.height)
    }
}

/// Mirrors `y` within `height` (bottom-left <-> top-left origin). Self-inverse.
pub fn flip_y(p: Point, height: f32) -> Point {
    Point::new(p.x, height - p.y)
}
