//! Writes a sample packer document, its page images, and an atlas config
//! so `tpatlas build` / `tpatlas batch` can be tried end to end.
//!
//! cargo run -p tpatlas-cli --example gen_fixture -- out/fixture

use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

const PAGE_SIZE: u32 = 256;
const CELL: u32 = 32;

fn random_color_opaque(rng: &mut impl Rng) -> [u8; 4] {
    [rng.r#gen(), rng.r#gen(), rng.r#gen(), 255]
}

fn draw_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, c: [u8; 4]) {
    let (iw, ih) = img.dimensions();
    for yy in y.min(ih)..(y.saturating_add(h)).min(ih) {
        for xx in x.min(iw)..(x.saturating_add(w)).min(iw) {
            img.put_pixel(xx, yy, Rgba(c));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let out: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out/fixture"));
    fs::create_dir_all(&out)?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let mut pages = Vec::new();
    for (p, prefix) in ["hero", "slime"].iter().enumerate() {
        let mut img = RgbaImage::new(PAGE_SIZE, PAGE_SIZE);
        let mut sprites = Vec::new();
        for i in 0..6u32 {
            let x = (i % 4) * (CELL + 2);
            let y = (i / 4) * (CELL + 2);
            let w = rng.gen_range(12..=CELL);
            let h = rng.gen_range(12..=CELL);
            let rotated = i % 3 == 2;
            let (fw, fh) = if rotated { (h, w) } else { (w, h) };
            let c = random_color_opaque(&mut rng);
            draw_rect(&mut img, x, y, fw, fh, c);
            sprites.push(json!({
                "name": format!("{}/{}_{}", prefix, if i < 4 { "walk" } else { "idle" }, i % 4),
                "frame_rect": {"x": x, "y": y, "width": fw, "height": fh},
                "untrimmed_size": {"width": w + 4, "height": h + 4},
                "corner_offset": {"x": 2, "y": 2},
                "rotated": rotated,
                "trimmed": true,
                "vertices": ([[0, 0], [w, 0], [w, h], [0, h]]
                    .iter()
                    .map(|v| json!({"x": v[0], "y": v[1]}))
                    .collect::<Vec<_>>()),
                "indices": [0, 1, 2, 0, 2, 3],
            }));
        }
        let page_name = format!("{}-{}.png", prefix, p);
        img.save(out.join(&page_name))?;
        pages.push(json!({
            "name": page_name,
            "size": {"width": PAGE_SIZE, "height": PAGE_SIZE},
            "sprites": sprites,
        }));
    }

    let doc = json!({ "pages": pages });
    fs::write(out.join("fixture.json"), serde_json::to_string_pretty(&doc)?)?;

    let config = "\
file: fixture.json
rename_patterns: \"hero/=,slime/=slime_\"
is_paged_atlas: true
animations:
  - id: hero_walk
    images: [walk_0, walk_1, walk_2, walk_3]
    playback: loop_forward
    fps: 12
  - id: slime_idle
    images: [slime_idle_0, slime_idle_1]
    playback: PLAYBACK_LOOP_PINGPONG
    fps: 6
    flip_horizontal: 1
";
    fs::write(out.join("fixture.tpatlas"), config)?;
    println!("fixture written to {}", out.display());
    Ok(())
}
