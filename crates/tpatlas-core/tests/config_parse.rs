use tpatlas_core::config::{AtlasConfig, Playback};
use tpatlas_core::error::ErrorKind;
use tpatlas_core::model::AtlasDocument;

#[test]
fn config_accepts_integer_flags_and_constant_playback_names() {
    let json = r#"{
        "file": "hero.tpinfo",
        "rename_patterns": "hero/=",
        "is_paged_atlas": 1,
        "animations": [
            {"id": "walk", "images": ["walk_0", "walk_1"], "playback": "PLAYBACK_LOOP_PINGPONG",
             "fps": 24, "flip_horizontal": 1, "flip_vertical": 0},
            {"id": "jump", "images": ["jump_0"], "playback": "once_forward", "flip_vertical": true}
        ]
    }"#;
    let cfg: AtlasConfig = serde_json::from_str(json).expect("parse");
    assert!(cfg.is_paged_atlas);
    assert_eq!(cfg.animations.len(), 2);
    let walk = &cfg.animations[0];
    assert_eq!(walk.playback, Playback::LoopPingPong);
    assert_eq!(walk.fps, 24);
    assert!(walk.flip_horizontal);
    assert!(!walk.flip_vertical);
    let jump = &cfg.animations[1];
    assert_eq!(jump.playback, Playback::OnceForward);
    assert_eq!(jump.fps, 0);
    assert!(jump.flip_vertical);
    cfg.validate().expect("valid");
}

#[test]
fn config_defaults_are_info_like() {
    let cfg: AtlasConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(cfg, AtlasConfig::default());
    assert!(cfg.rename_patterns.is_empty());
    assert!(cfg.animations.is_empty());
}

#[test]
fn playback_from_str_variants() {
    assert_eq!("none".parse::<Playback>(), Ok(Playback::None));
    assert_eq!("PLAYBACK_ONCE_BACKWARD".parse::<Playback>(), Ok(Playback::OnceBackward));
    assert_eq!("looppingpong".parse::<Playback>(), Ok(Playback::LoopPingPong));
    assert_eq!("loop_forward".parse::<Playback>(), Ok(Playback::LoopForward));
    assert_eq!("sideways".parse::<Playback>(), Err(()));
}

#[test]
fn validate_rejects_empty_animation_id() {
    let cfg = AtlasConfig::builder().flipbook("  ", ["a"]).build();
    let err = cfg.validate().expect_err("empty id");
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn document_defaults_fill_optional_sprite_fields() {
    let json = r#"{"pages": [{"name": "p.png", "size": {"width": 32, "height": 32},
        "sprites": [{"name": "a", "frame_rect": {"x": 1, "y": 2, "width": 3, "height": 4},
                     "untrimmed_size": {"width": 3, "height": 4}}]}]}"#;
    let doc = AtlasDocument::from_json_str(json).expect("parse");
    let s = &doc.pages[0].sprites[0];
    assert!(!s.rotated);
    assert_eq!(s.pivot.x, 0.5);
    assert!(s.vertices.is_empty());
}

#[test]
fn malformed_document_reports_kind() {
    let err = AtlasDocument::from_json_str("{\"pages\": 3}").expect_err("bad");
    assert_eq!(err.kind(), ErrorKind::MalformedDocument);
}
