use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Flipbook playback modes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    #[default]
    #[serde(alias = "PLAYBACK_NONE")]
    None,
    #[serde(alias = "PLAYBACK_ONCE_FORWARD")]
    OnceForward,
    #[serde(alias = "PLAYBACK_ONCE_BACKWARD")]
    OnceBackward,
    #[serde(alias = "PLAYBACK_ONCE_PINGPONG")]
    OncePingPong,
    #[serde(alias = "PLAYBACK_LOOP_FORWARD")]
    LoopForward,
    #[serde(alias = "PLAYBACK_LOOP_BACKWARD")]
    LoopBackward,
    #[serde(alias = "PLAYBACK_LOOP_PINGPONG")]
    LoopPingPong,
}

impl FromStr for Playback {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let key = lower.strip_prefix("playback_").unwrap_or(&lower);
        match key {
            "none" => Ok(Self::None),
            "once_forward" | "onceforward" => Ok(Self::OnceForward),
            "once_backward" | "oncebackward" => Ok(Self::OnceBackward),
            "once_pingpong" | "once_ping_pong" | "oncepingpong" => Ok(Self::OncePingPong),
            "loop_forward" | "loopforward" => Ok(Self::LoopForward),
            "loop_backward" | "loopbackward" => Ok(Self::LoopBackward),
            "loop_pingpong" | "loop_ping_pong" | "looppingpong" => Ok(Self::LoopPingPong),
            _ => Err(()),
        }
    }
}

/// A user-declared flipbook animation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    pub id: String,
    /// Ordered frame ids (post-rename names are resolved by the pipeline).
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub playback: Playback,
    #[serde(default)]
    pub fps: u32,
    #[serde(default, deserialize_with = "bool_or_int")]
    pub flip_horizontal: bool,
    #[serde(default, deserialize_with = "bool_or_int")]
    pub flip_vertical: bool,
}

/// User-authored atlas description: which packer document to read, how to
/// rename its frames, and which flipbooks to build from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AtlasConfig {
    /// Path of the packer document; also used to name it in error messages.
    #[serde(default)]
    pub file: String,
    /// Comma-separated `search=replace` rules, applied to every frame id.
    #[serde(default)]
    pub rename_patterns: String,
    #[serde(default)]
    pub animations: Vec<AnimationConfig>,
    /// Request a texture array even for a single page.
    #[serde(default, deserialize_with = "bool_or_int")]
    pub is_paged_atlas: bool,
}

impl AtlasConfig {
    /// Validates the configuration.
    ///
    /// Returns an error if an animation has an empty id, or two animations
    /// share an id.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::TpAtlasError;

        let mut seen: HashSet<&str> = HashSet::new();
        for (i, anim) in self.animations.iter().enumerate() {
            if anim.id.trim().is_empty() {
                return Err(TpAtlasError::InvalidConfig(format!(
                    "animation #{} has an empty id",
                    i
                )));
            }
            if !seen.insert(anim.id.as_str()) {
                return Err(TpAtlasError::InvalidConfig(format!(
                    "duplicate animation id '{}'",
                    anim.id
                )));
            }
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn file(mut self, v: impl Into<String>) -> Self {
        self.cfg.file = v.into();
        self
    }
    pub fn rename_patterns(mut self, v: impl Into<String>) -> Self {
        self.cfg.rename_patterns = v.into();
        self
    }
    pub fn paged(mut self, v: bool) -> Self {
        self.cfg.is_paged_atlas = v;
        self
    }
    pub fn animation(mut self, v: AnimationConfig) -> Self {
        self.cfg.animations.push(v);
        self
    }
    /// Shorthand for a flipbook with default playback settings.
    pub fn flipbook<I, S>(self, id: impl Into<String>, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.animation(AnimationConfig {
            id: id.into(),
            images: images.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
