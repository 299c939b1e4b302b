use crate::animation::{assemble, flipbook_animations};
use crate::catalog::{FrameCatalog, build_catalog};
use crate::config::AtlasConfig;
use crate::error::Result;
use crate::model::{Atlas, AtlasDocument, Page};
use crate::rename::{RenamePatterns, Renamer, rename_all, rename_animation_refs};
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One independent assembly job: a packer document plus its optional user config.
#[derive(Debug, Clone)]
pub struct AtlasInput {
    pub document: AtlasDocument,
    pub config: Option<AtlasConfig>,
}

#[instrument(skip_all)]
/// Assembles a packer document (and optional user config) into an `Atlas`.
///
/// Without a config ("info-only") every sprite becomes a single-frame
/// animation and nothing is renamed. With a config ("full") the config's
/// rename patterns are applied to the catalog and to every flipbook
/// reference in the same pass, then flipbooks are validated and appended.
///
/// Notes:
/// - Errors abort the whole call; no partial atlas is returned.
/// - The result depends only on the inputs; repeated calls are equal.
pub fn assemble_atlas(document: &AtlasDocument, config: Option<&AtlasConfig>) -> Result<Atlas> {
    let patterns = match config {
        Some(cfg) => RenamePatterns::parse(&cfg.rename_patterns)?,
        None => RenamePatterns::default(),
    };
    assemble_atlas_with(document, config, &patterns)
}

/// Same as `assemble_atlas`, with a caller-supplied renamer in place of the
/// config's rename patterns.
///
/// The renamer only applies in full mode; with `config == None` ids are kept
/// as the packer wrote them and `renamer` is never called.
pub fn assemble_atlas_with<R: Renamer + ?Sized>(
    document: &AtlasDocument,
    config: Option<&AtlasConfig>,
    renamer: &R,
) -> Result<Atlas> {
    if let Some(cfg) = config {
        cfg.validate()?;
    }

    let (catalog, mut pages) = build_catalog(document);
    debug!(
        pages = pages.len(),
        frames = catalog.len(),
        "built frame catalog"
    );

    let (catalog, flipbooks, document_name) = match config {
        None => (catalog, None, String::new()),
        Some(cfg) => {
            let renamed = FrameCatalog::new(rename_all(catalog.ids(), renamer)?);
            let flipbooks = rename_animation_refs(&flipbook_animations(&cfg.animations), renamer)?;
            apply_frame_ids(&mut pages, &renamed);
            (renamed, Some(flipbooks), document_label(cfg))
        }
    };

    for dup in catalog.duplicates() {
        warn!(id = dup, "duplicate frame id; lookups resolve to the first occurrence");
    }

    let animations = assemble(&catalog, flipbooks, &document_name)?;
    debug!(animations = animations.len(), "assembled animations");

    Ok(Atlas {
        page_names: document.page_names(),
        pages,
        animations,
        catalog,
        is_paged_atlas: config.is_some_and(|c| c.is_paged_atlas),
    })
}

/// Assembles independent inputs, in parallel with the `parallel` feature.
/// Results are returned in input order.
pub fn assemble_many(inputs: &[AtlasInput]) -> Vec<Result<Atlas>> {
    #[cfg(feature = "parallel")]
    {
        inputs
            .par_iter()
            .map(|i| assemble_atlas(&i.document, i.config.as_ref()))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        inputs
            .iter()
            .map(|i| assemble_atlas(&i.document, i.config.as_ref()))
            .collect()
    }
}

// Catalog positions follow page then sprite order, so frame n gets id n.
fn apply_frame_ids(pages: &mut [Page], catalog: &FrameCatalog) {
    let frames = pages.iter_mut().flat_map(|p| p.frames.iter_mut());
    for (frame, id) in frames.zip(catalog.ids()) {
        frame.id = id.clone();
    }
}

fn document_label(cfg: &AtlasConfig) -> String {
    if cfg.file.is_empty() {
        "<document>".into()
    } else {
        cfg.file.clone()
    }
}
