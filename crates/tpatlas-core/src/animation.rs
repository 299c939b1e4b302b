use crate::catalog::FrameCatalog;
use crate::config::AnimationConfig;
use crate::error::{Result, TpAtlasError};
use crate::model::AnimationDescriptor;

/// One single-frame animation per frame id, in catalog order.
pub fn single_frame_animations(catalog: &FrameCatalog) -> Vec<AnimationDescriptor> {
    catalog.ids().iter().map(AnimationDescriptor::single).collect()
}

/// Converts user declarations into flipbook descriptors, without validation.
pub fn flipbook_animations(user: &[AnimationConfig]) -> Vec<AnimationDescriptor> {
    user.iter()
        .map(|a| AnimationDescriptor {
            id: a.id.clone(),
            frames: a.images.clone(),
            playback: a.playback,
            fps: a.fps,
            flip_horizontal: a.flip_horizontal,
            flip_vertical: a.flip_vertical,
            single_frame: false,
        })
        .collect()
}

/// Fails on the first flipbook member missing from `catalog`.
///
/// `document` names the packer document in the error.
pub fn validate_references(
    flipbooks: &[AnimationDescriptor],
    catalog: &FrameCatalog,
    document: &str,
) -> Result<()> {
    for anim in flipbooks {
        if let Some(missing) = anim.frames.iter().find(|id| !catalog.contains(id)) {
            return Err(TpAtlasError::DanglingAnimationReference {
                animation: anim.id.clone(),
                image: missing.clone(),
                document: document.to_string(),
            });
        }
    }
    Ok(())
}

/// Builds the animation list: every frame as a single-frame animation, then the
/// validated flipbooks (already renamed) in declaration order.
pub fn assemble(
    catalog: &FrameCatalog,
    flipbooks: Option<Vec<AnimationDescriptor>>,
    document: &str,
) -> Result<Vec<AnimationDescriptor>> {
    let mut anims = single_frame_animations(catalog);
    if let Some(flipbooks) = flipbooks {
        validate_references(&flipbooks, catalog, document)?;
        anims.extend(flipbooks);
    }
    Ok(anims)
}
