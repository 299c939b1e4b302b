//! Frame id renaming.
//!
//! The pattern language is a comma-separated list of `search=replace` rules,
//! applied in order, each replacing every occurrence of `search`:
//!
//! ```text
//! "_0=,hero/="   // "hero/idle_0" -> "idle"
//! ```
//!
//! Renaming is all-or-nothing: one failing id fails the whole pass, so the
//! catalog and the animation references never diverge.

use crate::error::{Result, TpAtlasError};
use crate::model::AnimationDescriptor;

/// Maps one frame id to its new name.
pub trait Renamer {
    fn rename(&self, id: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    search: String,
    replace: String,
}

/// Parsed `search=replace[,search=replace...]` rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePatterns {
    source: String,
    rules: Vec<Rule>,
}

impl RenamePatterns {
    /// Parses `patterns`. An empty (or whitespace-only) string yields no rules;
    /// empty entries between commas are skipped.
    pub fn parse(patterns: &str) -> Result<Self> {
        let mut rules = Vec::new();
        if !patterns.trim().is_empty() {
            // stray commas ("a=b,", "a=b,,c=d") are ignored
            for token in patterns.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let mut parts = token.split('=');
                let (search, replace) = match (parts.next(), parts.next(), parts.next()) {
                    (Some(s), Some(r), None) => (s.trim(), r.trim()),
                    _ => {
                        return Err(TpAtlasError::RenamePattern {
                            pattern: patterns.to_string(),
                            id: String::new(),
                            reason: format!("rule '{}' must have the form search=replace", token),
                        });
                    }
                };
                if search.is_empty() {
                    return Err(TpAtlasError::RenamePattern {
                        pattern: patterns.to_string(),
                        id: String::new(),
                        reason: format!("rule '{}' has an empty search string", token),
                    });
                }
                rules.push(Rule {
                    search: search.to_string(),
                    replace: replace.to_string(),
                });
            }
        }
        Ok(Self {
            source: patterns.to_string(),
            rules,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Renamer for RenamePatterns {
    fn rename(&self, id: &str) -> Result<String> {
        let mut out = id.to_string();
        for rule in &self.rules {
            out = out.replace(&rule.search, &rule.replace);
        }
        // an id that was already empty passes through unchanged
        if out.is_empty() && !id.is_empty() {
            return Err(TpAtlasError::RenamePattern {
                pattern: self.source.clone(),
                id: id.to_string(),
                reason: "renamed id is empty".into(),
            });
        }
        Ok(out)
    }
}

/// Renames every id, preserving order and count.
pub fn rename_all<R: Renamer + ?Sized>(ids: &[String], renamer: &R) -> Result<Vec<String>> {
    ids.iter().map(|id| renamer.rename(id)).collect()
}

/// Renames the member frame references of every animation with the same renamer.
///
/// Flipbook ids are left untouched; a single-frame animation takes its
/// renamed frame id as its id. Returns new descriptors.
pub fn rename_animation_refs<R: Renamer + ?Sized>(
    animations: &[AnimationDescriptor],
    renamer: &R,
) -> Result<Vec<AnimationDescriptor>> {
    animations
        .iter()
        .map(|anim| {
            let frames = rename_all(&anim.frames, renamer)?;
            let id = match (anim.single_frame, frames.first()) {
                (true, Some(first)) => first.clone(),
                _ => anim.id.clone(),
            };
            Ok(AnimationDescriptor {
                id,
                frames,
                ..anim.clone()
            })
        })
        .collect()
}
