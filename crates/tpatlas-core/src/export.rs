use crate::model::TextureKind;
use crate::textureset::TextureSet;
use serde_json::{Value, json};

/// Serialize a `TextureSet` as a camelCase JSON object.
/// Shape: `{ textureKind, pageCount, geometries: [..], animations: [..], frameIndices, frameIds }`.
pub fn to_json(set: &TextureSet) -> Value {
    let geometries: Vec<Value> = set
        .geometries
        .iter()
        .map(|g| {
            let rect = json!({"x": g.rect.x, "y": g.rect.y, "w": g.rect.width, "h": g.rect.height});
            let vertices: Vec<Value> = g.vertices.iter().map(|p| json!([p.x, p.y])).collect();
            json!({
                "id": g.id,
                "page": g.page,
                "rect": rect,
                "rotated": g.rotated,
                "pivot": {"x": g.pivot.x, "y": g.pivot.y},
                "vertices": vertices,
                "indices": g.indices,
            })
        })
        .collect();
    let animations: Vec<Value> = set
        .animations
        .iter()
        .map(|a| {
            json!({
                "id": a.id,
                "start": a.start,
                "end": a.end,
                "playback": a.playback,
                "fps": a.fps,
                "flipHorizontal": a.flip_horizontal,
                "flipVertical": a.flip_vertical,
            })
        })
        .collect();
    json!({
        "textureKind": match set.texture_kind {
            TextureKind::Texture2D => "2d",
            TextureKind::Array2D => "2d_array",
        },
        "pageCount": set.page_count,
        "geometries": geometries,
        "animations": animations,
        "frameIndices": set.frame_indices,
        "frameIds": set.frame_ids,
    })
}
