use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use handlebars::Handlebars;
use serde::Serialize;
use tpatlas_core::prelude::*;
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "tpatlas",
    about = "Build texture sets from texture-packer atlas descriptions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble an atlas and write its texture set
    Build(BuildArgs),
    /// Assemble an atlas and print pages, animations, and stats
    Info(InfoArgs),
    /// Build every atlas config found under a directory
    Batch(BatchArgs),
}

#[derive(Parser, Debug, Clone)]
struct BuildArgs {
    /// Atlas config (.tpatlas/.yaml/.yml/.json) or packer document (.json)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Output base name (defaults to the input file stem)
    #[arg(short, long, help_heading = "Input/Output")]
    name: Option<String>,
    /// Metadata format: json | template
    #[arg(long, default_value = "json", value_parser = ["json", "template"], help_heading = "Export")]
    metadata: String,
    /// External template file (handlebars), used when --metadata template
    #[arg(long, help_heading = "Export")]
    template: Option<PathBuf>,
    /// Export atlas stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Verify page images exist and match the page sizes
    #[arg(long, default_value_t = false, help_heading = "Validation")]
    check_images: bool,
    /// Dry run: assemble and validate but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct InfoArgs {
    /// Atlas config or packer document
    input: PathBuf,
    /// Print the assembled atlas as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
struct BatchArgs {
    /// Directory to scan for atlas configs
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long)]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long)]
    exclude: Vec<String>,
    /// Dry run: assemble and validate but do not write files
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Info(args) => run_info(args),
        Commands::Batch(args) => run_batch(args, cli.progress && !cli.quiet),
    }
}

/// A loaded input: the packer document, and the user config when one was given.
struct LoadedInput {
    document: AtlasDocument,
    document_path: PathBuf,
    config: Option<AtlasConfig>,
}

fn run_build(cli: &BuildArgs) -> anyhow::Result<()> {
    let input = load_input(&cli.input)?;
    if cli.check_images {
        check_page_images(&input)?;
    }
    let atlas = assemble(&input, &cli.input)?;
    let set = emit_texture_set(&atlas).map_err(|e| build_error(e, &cli.input))?;
    if set.skipped > 0 {
        warn!(skipped = set.skipped, "frames skipped during emission");
    }
    let stats = atlas.stats();
    info!(
        pages = stats.num_pages,
        frames = stats.num_frames,
        animations = stats.num_animations,
        records = set.frame_indices.len(),
        "texture set assembled"
    );

    let name = cli.name.clone().unwrap_or_else(|| file_stem(&cli.input));
    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    }

    match cli.metadata.as_str() {
        "json" => {
            if !cli.dry_run {
                let json_path = cli.out_dir.join(format!("{}.textureset.json", name));
                let json = serde_json::to_string_pretty(&to_json(&set))?;
                fs::write(&json_path, json)
                    .with_context(|| format!("write {}", json_path.display()))?;
                info!(?json_path, "texture set written");
            }
        }
        "template" => {
            let tpl_owned_from_file: Option<String> = match &cli.template {
                Some(path) => Some(
                    fs::read_to_string(path)
                        .with_context(|| format!("read template {}", path.display()))?,
                ),
                None => None,
            };
            let tpl_ref: &str = match &tpl_owned_from_file {
                Some(s) => s.as_str(),
                None => include_str!("templates/textureset.hbs"),
            };
            let ctx = build_template_context(&name, &atlas, &set);

            let mut reg = Handlebars::new();
            reg.set_strict_mode(true);
            reg.register_escape_fn(handlebars::no_escape);
            reg.register_template_string("tpl", tpl_ref)?;
            let rendered = reg.render("tpl", &ctx)?;

            if !cli.dry_run {
                let out_path = cli.out_dir.join(format!("{}.textureset", name));
                fs::write(&out_path, rendered)
                    .with_context(|| format!("write {}", out_path.display()))?;
                info!(?out_path, "template written");
            }
        }
        other => anyhow::bail!("unknown metadata format: {}", other),
    }

    if let Some(stats_path) = &cli.export_stats {
        let value = serde_json::json!({
            "pages": stats.num_pages,
            "frames": stats.num_frames,
            "animations": stats.num_animations,
            "flipbooks": stats.num_flipbooks,
            "records": set.frame_indices.len(),
            "skipped": set.skipped,
            "texture_kind": atlas.texture_kind(),
            "page_count": atlas.page_count(),
        });
        if !cli.dry_run {
            fs::write(stats_path, serde_json::to_string_pretty(&value)?)
                .with_context(|| format!("write {}", stats_path.display()))?;
            info!(?stats_path, "stats exported");
        } else {
            println!("{}", stats.summary());
        }
    }
    Ok(())
}

fn run_info(args: &InfoArgs) -> anyhow::Result<()> {
    let input = load_input(&args.input)?;
    let atlas = assemble(&input, &args.input)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&atlas)?);
        return Ok(());
    }
    println!("{}", atlas.stats().summary());
    println!(
        "texture: {:?} (page_count={})",
        atlas.texture_kind(),
        atlas.page_count()
    );
    for page in &atlas.pages {
        println!(
            "page {} {} {}x{} frames={}",
            page.index,
            page.name,
            page.size.width,
            page.size.height,
            page.frames.len()
        );
    }
    for anim in atlas.animations.iter().filter(|a| !a.single_frame) {
        println!(
            "animation {} {:?} fps={} frames=[{}]",
            anim.id,
            anim.playback,
            anim.fps,
            anim.frames.join(", ")
        );
    }
    Ok(())
}

fn run_batch(args: &BatchArgs, show_progress: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    info!(count = paths.len(), "found atlas configs");

    let bar = if show_progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut loaded: Vec<(PathBuf, AtlasInput)> = Vec::with_capacity(paths.len());
    let mut failures = 0usize;
    for p in &paths {
        if let Some(b) = &bar {
            b.set_message(p.file_name().and_then(|s| s.to_str()).unwrap_or("").to_string());
        }
        match load_input(p) {
            Ok(input) => loaded.push((
                p.clone(),
                AtlasInput {
                    document: input.document,
                    config: input.config,
                },
            )),
            Err(e) => {
                error!(?p, error = %e, "skip input");
                failures += 1;
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    let inputs: Vec<AtlasInput> = loaded.iter().map(|(_, i)| i.clone()).collect();
    let results = assemble_many(&inputs);

    if !args.dry_run {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
    }
    for ((path, _), result) in loaded.iter().zip(results) {
        let set = match result.and_then(|atlas| emit_texture_set(&atlas)) {
            Ok(set) => set,
            Err(e) => {
                error!(?path, kind = %e.kind(), document = e.document().unwrap_or(""), "{}", e);
                failures += 1;
                continue;
            }
        };
        if !args.dry_run {
            let json_path = args
                .out_dir
                .join(format!("{}.textureset.json", file_stem(path)));
            fs::write(&json_path, serde_json::to_string_pretty(&to_json(&set))?)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, records = set.frame_indices.len(), "texture set written");
        }
    }
    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, paths.len());
    }
    Ok(())
}

fn assemble(input: &LoadedInput, path: &Path) -> anyhow::Result<Atlas> {
    assemble_atlas(&input.document, input.config.as_ref()).map_err(|e| build_error(e, path))
}

fn build_error(e: TpAtlasError, path: &Path) -> anyhow::Error {
    anyhow::anyhow!("{}: [{}] {}", path.display(), e.kind(), e)
}

/// Loads either an atlas config (then its referenced document) or a bare document.
fn load_input(path: &Path) -> anyhow::Result<LoadedInput> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let config: AtlasConfig = match ext.as_str() {
        "yaml" | "yml" | "tpatlas" => serde_yaml::from_str(&text)
            .with_context(|| format!("parse atlas config {}", path.display()))?,
        _ => {
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse {}", path.display()))?;
            if value.get("pages").is_some() {
                let document = AtlasDocument::from_json_str(&text)
                    .with_context(|| format!("parse document {}", path.display()))?;
                return Ok(LoadedInput {
                    document,
                    document_path: path.to_path_buf(),
                    config: None,
                });
            }
            serde_json::from_value(value)
                .with_context(|| format!("parse atlas config {}", path.display()))?
        }
    };

    if config.file.is_empty() {
        anyhow::bail!("{}: atlas config has no 'file' entry", path.display());
    }
    let document_path = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&config.file);
    let doc_text = fs::read_to_string(&document_path)
        .with_context(|| format!("read document {}", document_path.display()))?;
    let document = AtlasDocument::from_json_str(&doc_text)
        .with_context(|| format!("parse document {}", document_path.display()))?;
    Ok(LoadedInput {
        document,
        document_path,
        config: Some(config),
    })
}

fn check_page_images(input: &LoadedInput) -> anyhow::Result<()> {
    let base = input.document_path.parent().unwrap_or_else(|| Path::new("."));
    for page in &input.document.pages {
        let image_path = base.join(&page.name);
        let (w, h) = image::image_dimensions(&image_path)
            .with_context(|| format!("read page image {}", image_path.display()))?;
        if w as f32 != page.size.width || h as f32 != page.size.height {
            warn!(
                ?image_path,
                image = format!("{}x{}", w, h),
                page = format!("{}x{}", page.size.width, page.size.height),
                "page image size differs from document"
            );
        }
    }
    Ok(())
}

fn file_stem(p: &Path) -> String {
    p.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("atlas")
        .to_string()
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    // Build glob matchers
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_atlas_config(p)
        {
            list.push(p.to_path_buf());
        }
    }
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_atlas_config(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "tpatlas" | "yaml" | "yml")
    )
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Serialize)]
struct TemplatePage {
    index: usize,
    image: String,
    width: f32,
    height: f32,
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    name: &'a str,
    texture: String,
    pages: Vec<TemplatePage>,
    set: &'a TextureSet,
}

fn build_template_context<'a>(
    name: &'a str,
    atlas: &Atlas,
    set: &'a TextureSet,
) -> TemplateContext<'a> {
    let pages = atlas
        .pages
        .iter()
        .map(|p| TemplatePage {
            index: p.index,
            image: p.name.clone(),
            width: p.size.width,
            height: p.size.height,
        })
        .collect();
    TemplateContext {
        name,
        texture: format!("{}.texturec", name),
        pages,
        set,
    }
}
