use crate::catalog::FrameCatalog;
use crate::error::{Result, TpAtlasError};
use crate::model::AnimationDescriptor;

/// Result of resolving the next member of the current animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStep {
    /// Position of the member in the frame catalog.
    Frame(usize),
    /// The member id is not in the catalog. Iteration may continue.
    Missing(String),
    /// The current animation has no more members.
    End,
}

/// Animation/frame traversal protocol consumed by texture-set emitters.
///
/// Call order: `next_animation`, then `next_frame_index` until `End`, then
/// `next_animation` again, until it returns `None`. `rewind` restarts.
pub trait AnimIterator {
    /// Advances to the next animation and resets the frame cursor.
    fn next_animation(&mut self) -> Option<&AnimationDescriptor>;
    /// Resolves the next member of the current animation.
    fn next_frame_index(&mut self) -> Result<FrameStep>;
    /// Label of the member last yielded by `next_frame_index`.
    fn current_frame_label(&self) -> Result<String>;
    fn rewind(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    /// `frame` is the number of members already yielded.
    InAnimation { anim: usize, frame: usize },
    Exhausted,
}

/// Cursor over `(animations, catalog)`. Single owner; forward-only until rewound.
#[derive(Debug, Clone)]
pub struct MappedAnimIterator<'a> {
    animations: &'a [AnimationDescriptor],
    catalog: &'a FrameCatalog,
    cursor: Cursor,
}

impl<'a> MappedAnimIterator<'a> {
    pub fn new(animations: &'a [AnimationDescriptor], catalog: &'a FrameCatalog) -> Self {
        Self {
            animations,
            catalog,
            cursor: Cursor::BeforeStart,
        }
    }

    /// Animation the cursor is currently in.
    pub fn current_animation(&self) -> Option<&'a AnimationDescriptor> {
        match self.cursor {
            Cursor::InAnimation { anim, .. } => self.animations.get(anim),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }
}

impl AnimIterator for MappedAnimIterator<'_> {
    fn next_animation(&mut self) -> Option<&AnimationDescriptor> {
        let next = match self.cursor {
            Cursor::BeforeStart => 0,
            Cursor::InAnimation { anim, .. } => anim + 1,
            Cursor::Exhausted => return None,
        };
        if next < self.animations.len() {
            self.cursor = Cursor::InAnimation {
                anim: next,
                frame: 0,
            };
            self.animations.get(next)
        } else {
            self.cursor = Cursor::Exhausted;
            None
        }
    }

    fn next_frame_index(&mut self) -> Result<FrameStep> {
        let (anim, frame) = match self.cursor {
            Cursor::InAnimation { anim, frame } => (anim, frame),
            Cursor::BeforeStart => {
                return Err(TpAtlasError::IteratorState(
                    "next_frame_index called before next_animation".into(),
                ));
            }
            Cursor::Exhausted => {
                return Err(TpAtlasError::IteratorState(
                    "next_frame_index called after the last animation".into(),
                ));
            }
        };
        let desc = &self.animations[anim];
        let Some(member) = desc.frames.get(frame) else {
            return Ok(FrameStep::End);
        };
        self.cursor = Cursor::InAnimation {
            anim,
            frame: frame + 1,
        };
        Ok(match self.catalog.index_of(member) {
            Some(index) => FrameStep::Frame(index),
            None => FrameStep::Missing(member.clone()),
        })
    }

    fn current_frame_label(&self) -> Result<String> {
        match self.cursor {
            Cursor::InAnimation { anim, frame } if frame > 0 => {
                let desc = &self.animations[anim];
                Ok(desc.frame_label(&desc.frames[frame - 1]))
            }
            _ => Err(TpAtlasError::IteratorState(
                "current_frame_label called before any frame was yielded".into(),
            )),
        }
    }

    fn rewind(&mut self) {
        self.cursor = Cursor::BeforeStart;
    }
}
