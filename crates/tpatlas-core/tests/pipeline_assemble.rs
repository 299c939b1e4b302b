use tpatlas_core::prelude::*;

fn sprite(name: &str, x: f32, y: f32, w: f32, h: f32) -> SourceSprite {
    SourceSprite {
        name: name.into(),
        frame_rect: Rect::new(x, y, w, h),
        untrimmed_size: Size::new(w, h),
        corner_offset: Point::default(),
        rotated: false,
        trimmed: false,
        pivot: Point::new(0.5, 0.5),
        vertices: vec![],
        indices: vec![],
    }
}

fn document() -> AtlasDocument {
    AtlasDocument {
        pages: vec![
            SourcePage {
                name: "hero-0.png".into(),
                size: Size::new(64.0, 64.0),
                sprites: vec![
                    sprite("hero/idle_0", 0.0, 0.0, 16.0, 16.0),
                    sprite("hero/idle_1", 16.0, 0.0, 16.0, 16.0),
                ],
            },
            SourcePage {
                name: "hero-1.png".into(),
                size: Size::new(32.0, 32.0),
                sprites: vec![sprite("hero/walk_0", 0.0, 0.0, 8.0, 8.0)],
            },
        ],
    }
}

#[test]
fn info_only_keeps_names_and_builds_single_frames() {
    let atlas = assemble_atlas(&document(), None).expect("assemble");
    assert_eq!(
        atlas.catalog.ids(),
        &["hero/idle_0", "hero/idle_1", "hero/walk_0"]
    );
    assert_eq!(atlas.animations.len(), 3);
    assert!(atlas.animations.iter().all(|a| a.single_frame));
    assert_eq!(atlas.page_names, vec!["hero-0.png", "hero-1.png"]);
    assert!(!atlas.is_paged_atlas);
}

#[test]
fn pages_are_indexed_densely_in_document_order() {
    let atlas = assemble_atlas(&document(), None).expect("assemble");
    for (pos, page) in atlas.pages.iter().enumerate() {
        assert_eq!(page.index, pos);
    }
    assert_eq!(atlas.pages[1].name, "hero-1.png");
    assert_eq!(atlas.pages[1].size, Size::new(32.0, 32.0));
    assert_eq!(atlas.pages[0].frames.len(), 2);
}

#[test]
fn full_mode_renames_catalog_pages_and_flipbooks_together() {
    let cfg = AtlasConfig::builder()
        .file("hero.tpinfo")
        .rename_patterns("hero/=")
        .flipbook("walk", ["hero/walk_0"])
        .build();
    let atlas = assemble_atlas(&document(), Some(&cfg)).expect("assemble");

    assert_eq!(atlas.catalog.ids(), &["idle_0", "idle_1", "walk_0"]);
    let frame_ids: Vec<&str> = atlas.frames().map(|(_, f)| f.id.as_str()).collect();
    assert_eq!(frame_ids, vec!["idle_0", "idle_1", "walk_0"]);

    let walk = atlas.animations.last().expect("walk");
    assert_eq!(walk.id, "walk");
    assert_eq!(walk.frames, vec!["walk_0"]);
    assert!(!walk.single_frame);
}

#[test]
fn flipbook_referencing_pre_rename_name_after_rename_fails() {
    let cfg = AtlasConfig::builder()
        .file("hero.tpinfo")
        .rename_patterns("hero/=")
        .flipbook("walk", ["walk_1"])
        .build();
    let err = assemble_atlas(&document(), Some(&cfg)).expect_err("dangling");
    assert_eq!(err.kind(), ErrorKind::DanglingAnimationReference);
    assert_eq!(err.document(), Some("hero.tpinfo"));
}

#[test]
fn rename_failure_aborts_assembly() {
    let cfg = AtlasConfig::builder()
        .rename_patterns("hero/idle_0=")
        .build();
    let err = assemble_atlas(&document(), Some(&cfg)).expect_err("rename");
    assert_eq!(err.kind(), ErrorKind::RenamePattern);
}

#[test]
fn invalid_config_aborts_assembly() {
    let cfg = AtlasConfig::builder()
        .flipbook("a", ["hero/idle_0"])
        .flipbook("a", ["hero/idle_1"])
        .build();
    let err = assemble_atlas(&document(), Some(&cfg)).expect_err("duplicate");
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn assembly_is_idempotent() {
    let cfg = AtlasConfig::builder()
        .rename_patterns("hero/=")
        .flipbook("idle", ["idle_0", "idle_1"])
        .build();
    let a = assemble_atlas(&document(), Some(&cfg)).expect("first");
    let b = assemble_atlas(&document(), Some(&cfg)).expect("second");
    assert_eq!(a, b);
}

#[test]
fn duplicate_ids_across_pages_are_accepted() {
    let mut doc = document();
    doc.pages[1].sprites.push(sprite("hero/idle_0", 8.0, 0.0, 8.0, 8.0));
    let atlas = assemble_atlas(&doc, None).expect("assemble");
    assert_eq!(atlas.catalog.len(), 4);
    assert_eq!(atlas.catalog.index_of("hero/idle_0"), Some(0));
    assert_eq!(atlas.catalog.duplicates(), vec!["hero/idle_0"]);
}

#[test]
fn texture_kind_follows_page_count_and_paged_flag() {
    let atlas = assemble_atlas(&document(), None).expect("assemble");
    assert_eq!(atlas.texture_kind(), TextureKind::Array2D);
    assert_eq!(atlas.page_count(), 2);

    let mut single = document();
    single.pages.truncate(1);
    let atlas = assemble_atlas(&single, None).expect("assemble");
    assert_eq!(atlas.texture_kind(), TextureKind::Texture2D);
    assert_eq!(atlas.page_count(), 0);

    let cfg = AtlasConfig::builder().paged(true).build();
    let atlas = assemble_atlas(&single, Some(&cfg)).expect("assemble");
    assert_eq!(atlas.texture_kind(), TextureKind::Array2D);
    assert_eq!(atlas.page_count(), 1);
}

#[test]
fn custom_renamer_applies_to_both_id_universes() {
    struct Strip;
    impl Renamer for Strip {
        fn rename(&self, id: &str) -> tpatlas_core::Result<String> {
            Ok(id.rsplit('/').next().unwrap_or(id).to_string())
        }
    }
    let cfg = AtlasConfig::builder()
        .flipbook("walk", ["hero/walk_0"])
        .build();
    let atlas = assemble_atlas_with(&document(), Some(&cfg), &Strip).expect("assemble");
    assert_eq!(atlas.catalog.ids(), &["idle_0", "idle_1", "walk_0"]);
    assert_eq!(atlas.animations[3].frames, vec!["walk_0"]);
}

#[test]
fn empty_frame_name_assembles_in_both_modes() {
    let mut doc = document();
    doc.pages[1].sprites.push(sprite("", 8.0, 0.0, 8.0, 8.0));
    let info = assemble_atlas(&doc, None).expect("info-only");
    let full = assemble_atlas(&doc, Some(&AtlasConfig::default())).expect("full");
    assert_eq!(info.catalog.ids(), full.catalog.ids());
    assert_eq!(full.catalog.len(), 4);
}

#[test]
fn renamer_is_not_called_without_config() {
    struct Refuse;
    impl Renamer for Refuse {
        fn rename(&self, id: &str) -> tpatlas_core::Result<String> {
            Err(TpAtlasError::RenamePattern {
                pattern: String::new(),
                id: id.to_string(),
                reason: "called".into(),
            })
        }
    }
    let atlas = assemble_atlas_with(&document(), None, &Refuse).expect("assemble");
    assert_eq!(atlas.catalog.get(0), Some("hero/idle_0"));
}

#[test]
fn assemble_many_keeps_input_order() {
    let bad = AtlasConfig::builder().flipbook("x", ["nope"]).build();
    let inputs = vec![
        AtlasInput {
            document: document(),
            config: None,
        },
        AtlasInput {
            document: document(),
            config: Some(bad),
        },
    ];
    let results = assemble_many(&inputs);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn stats_count_frames_and_animations() {
    let mut doc = document();
    doc.pages[0].sprites[0].rotated = true;
    doc.pages[0].sprites[1].trimmed = true;
    let cfg = AtlasConfig::builder()
        .rename_patterns("hero/=")
        .flipbook("idle", ["idle_0", "idle_1"])
        .build();
    let stats = assemble_atlas(&doc, Some(&cfg)).expect("assemble").stats();
    assert_eq!(stats.num_pages, 2);
    assert_eq!(stats.num_frames, 3);
    assert_eq!(stats.num_animations, 4);
    assert_eq!(stats.num_flipbooks, 1);
    assert_eq!(stats.num_animation_frames, 5);
    assert_eq!(stats.num_rotated, 1);
    assert_eq!(stats.num_trimmed, 1);
    assert!(stats.summary().contains("Frames: 3"));
}
