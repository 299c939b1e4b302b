use tpatlas_core::prelude::*;

fn sprite(name: &str, x: f32) -> SourceSprite {
    SourceSprite {
        name: name.into(),
        frame_rect: Rect::new(x, 0.0, 8.0, 8.0),
        untrimmed_size: Size::new(8.0, 8.0),
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
        pages: vec![SourcePage {
            name: "sheet.png".into(),
            size: Size::new(64.0, 8.0),
            sprites: vec![sprite("idle_0", 0.0), sprite("idle_1", 8.0), sprite("walk_0", 16.0)],
        }],
    }
}

#[test]
fn emits_one_record_per_animation_frame_pair() {
    let cfg = AtlasConfig::builder()
        .animation(AnimationConfig {
            id: "walk".into(),
            images: vec!["walk_0".into()],
            playback: Playback::LoopForward,
            fps: 8,
            ..Default::default()
        })
        .build();
    let atlas = assemble_atlas(&document(), Some(&cfg)).expect("assemble");
    let set = emit_texture_set(&atlas).expect("emit");

    assert_eq!(set.frame_indices, vec![0, 1, 2, 2]);
    assert_eq!(set.frame_ids, vec!["idle_0", "idle_1", "walk_0", "walk/walk_0"]);
    assert_eq!(set.animations.len(), 4);
    let walk = &set.animations[3];
    assert_eq!((walk.start, walk.end), (3, 4));
    assert_eq!(walk.playback, Playback::LoopForward);
    assert_eq!(walk.fps, 8);
    assert_eq!(set.animation_frames("walk"), Some(&[2usize][..]));
    assert_eq!(set.skipped, 0);

    assert_eq!(set.geometries.len(), 3);
    assert_eq!(set.geometries[1].id, "idle_1");
    assert_eq!(set.geometries[1].rect, Rect::new(8.0, 0.0, 8.0, 8.0));
    assert_eq!(set.geometries[2].page, 0);
    assert_eq!(set.texture_kind, TextureKind::Texture2D);
    assert_eq!(set.page_count, 0);
}

#[test]
fn emission_is_repeatable() {
    let cfg = AtlasConfig::builder()
        .flipbook("idle", ["idle_0", "idle_1", "idle_0"])
        .build();
    let atlas = assemble_atlas(&document(), Some(&cfg)).expect("assemble");
    let a = emit_texture_set(&atlas).expect("first");
    let b = emit_texture_set(&atlas).expect("second");
    assert_eq!(a, b);
    assert_eq!(a.animation_frames("idle"), Some(&[0usize, 1, 0][..]));
}

#[test]
fn unresolved_members_are_skipped_not_fatal() {
    let mut atlas = assemble_atlas(&document(), None).expect("assemble");
    // bypass assembly validation to exercise the iterator guard
    atlas.animations.push(AnimationDescriptor {
        frames: vec!["idle_0".into(), "ghost".into(), "walk_0".into()],
        single_frame: false,
        ..AnimationDescriptor::single("mixed")
    });
    let set = emit_texture_set(&atlas).expect("emit");
    assert_eq!(set.skipped, 1);
    assert_eq!(set.animation_frames("mixed"), Some(&[0usize, 2][..]));
    assert_eq!(set.frame_ids.last().map(String::as_str), Some("mixed/walk_0"));
}

#[test]
fn json_export_shape() {
    let cfg = AtlasConfig::builder()
        .flipbook("idle", ["idle_0", "idle_1"])
        .paged(true)
        .build();
    let atlas = assemble_atlas(&document(), Some(&cfg)).expect("assemble");
    let set = emit_texture_set(&atlas).expect("emit");
    let v = to_json(&set);
    let obj = v.as_object().expect("object");
    for key in ["textureKind", "pageCount", "geometries", "animations", "frameIndices", "frameIds"] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(v["textureKind"], "2d_array");
    assert_eq!(v["pageCount"], 1);
    assert_eq!(v["animations"][3]["id"], "idle");
    assert_eq!(v["animations"][3]["playback"], "none");
    assert_eq!(v["geometries"][0]["rect"]["w"], 8.0);
}

#[test]
fn atlas_round_trips_through_serde() {
    let cfg = AtlasConfig::builder().flipbook("idle", ["idle_0"]).build();
    let atlas = assemble_atlas(&document(), Some(&cfg)).expect("assemble");
    let text = serde_json::to_string(&atlas).expect("serialize");
    let back: Atlas = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, atlas);
    assert_eq!(back.catalog.index_of("walk_0"), Some(2));
}

#[test]
fn rotated_and_trimmed_geometry_reaches_the_texture_set() {
    let rotated = SourceSprite {
        name: "hero/spin".into(),
        frame_rect: Rect::new(5.0, 5.0, 20.0, 10.0),
        untrimmed_size: Size::new(10.0, 20.0),
        corner_offset: Point::new(2.0, 3.0),
        rotated: true,
        trimmed: true,
        pivot: Point::new(0.5, 0.5),
        vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 20.0)],
        indices: vec![0, 1, 2],
    };
    let trimmed = SourceSprite {
        name: "hero/idle".into(),
        frame_rect: Rect::new(40.0, 10.0, 12.0, 14.0),
        untrimmed_size: Size::new(16.0, 16.0),
        corner_offset: Point::new(1.0, 2.0),
        trimmed: true,
        ..sprite("unused", 0.0)
    };
    let doc = AtlasDocument {
        pages: vec![SourcePage {
            name: "hero.png".into(),
            size: Size::new(64.0, 64.0),
            sprites: vec![rotated, trimmed],
        }],
    };
    let cfg = AtlasConfig::builder()
        .rename_patterns("hero/=")
        .flipbook("loop", ["spin", "idle"])
        .build();
    let atlas = assemble_atlas(&doc, Some(&cfg)).expect("assemble");
    let set = emit_texture_set(&atlas).expect("emit");

    assert_eq!(set.geometries.len(), 2);
    let spin = &set.geometries[0];
    assert_eq!(spin.id, "spin");
    assert_eq!(spin.rect, Rect::new(8.0, 3.0, 10.0, 20.0));
    assert!(spin.rotated);
    assert_eq!(
        spin.vertices,
        vec![Point::new(0.0, 20.0), Point::new(10.0, 20.0), Point::new(10.0, 0.0)]
    );
    let idle = &set.geometries[1];
    assert_eq!(idle.id, "idle");
    assert_eq!(idle.rect, Rect::new(39.0, 8.0, 16.0, 16.0));
    assert!(!idle.rotated);

    assert_eq!(set.animation_frames("loop"), Some(&[0usize, 1][..]));
    assert_eq!(set.skipped, 0);
}
