//! Core library for turning texture-packer atlas descriptions into texture sets.
//!
//! - Geometry: undo packer rotation/trimming into canonical, upright, top-left-origin frames
//! - Catalog: ordered frame ids; a frame's index is its catalog position
//! - Rename: `search=replace` rules applied to frame ids and animation references in one pass
//! - Animations: one single-frame animation per sprite, then user flipbooks
//! - Iterator: `next_animation` / `next_frame_index` / `current_frame_label` / `rewind`
//! - Pipeline: `assemble_atlas` composes the above; `emit_texture_set` drives the iterator
//!
//! Quick example:
//! ```ignore
//! use tpatlas_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let doc = AtlasDocument::from_json_str(&std::fs::read_to_string("hero.tpinfo.json")?)?;
//! let cfg = AtlasConfig::builder()
//!     .file("hero.tpinfo.json")
//!     .rename_patterns("hero/=")
//!     .flipbook("walk", ["walk_0", "walk_1"])
//!     .build();
//! let atlas = assemble_atlas(&doc, Some(&cfg))?;
//! let set = emit_texture_set(&atlas)?;
//! println!("{}", to_json(&set));
//! # Ok(()) }
//! ```

pub mod animation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod iterator;
pub mod model;
pub mod pipeline;
pub mod rename;
pub mod textureset;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use iterator::*;
pub use model::*;
pub use pipeline::*;
pub use textureset::*;

/// Convenience prelude for common types and functions.
/// Importing `tpatlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::catalog::FrameCatalog;
    pub use crate::config::{AnimationConfig, AtlasConfig, AtlasConfigBuilder, Playback};
    pub use crate::error::{ErrorKind, TpAtlasError};
    pub use crate::iterator::{AnimIterator, FrameStep, MappedAnimIterator};
    pub use crate::model::{
        AnimationDescriptor, Atlas, AtlasDocument, AtlasStats, CanonicalFrame, Page, Point, Rect,
        Size, SourcePage, SourceSprite, TextureKind,
    };
    pub use crate::rename::{RenamePatterns, Renamer};
    pub use crate::textureset::{FrameGeometry, TextureSet, TextureSetAnimation};
    pub use crate::{
        assemble_atlas, assemble_atlas_with, assemble_many, emit_texture_set, to_json, AtlasInput,
    };
}
