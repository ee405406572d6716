//! Item bags CLI - inspect, load and store saved item bags.
//!
//! Provides both human-friendly and JSON output.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::debug;

use bags::bag::{Container, ContainerSize, Rectangle};
use bags::cli::{self, Cli, Commands};
use bags::config::{default_config_path, expand_home, load_config, BagTypeIndex};
use bags::error::{BagsError, Result};
use bags::logging::init_logging;
use bags::snapshot::{BagDb, BagSnapshot, LoadReport, ReservedTypeId, SaveFile, SkippedBag};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Types => cmd_types(cli),
        Commands::Inspect(args) => cmd_inspect(cli, args),
        Commands::Load(args) => cmd_load(cli, args),
        Commands::Import(args) => cmd_import(cli, args),
        Commands::Export(args) => cmd_export(cli, args),
        Commands::List => cmd_list(cli),
        Commands::Remove(args) => cmd_remove(cli, args),
        Commands::Version => {
            cmd_version(cli);
            Ok(())
        }
    }
}

// === Shared Setup ===

fn type_index(cli: &Cli) -> Result<BagTypeIndex> {
    let path = match &cli.config {
        Some(path) => expand_home(path)?,
        None => default_config_path()?,
    };
    debug!(path = %path.display(), "Using bag type config");
    let config = load_config(&path)?;
    Ok(BagTypeIndex::from_config(&config))
}

fn open_db(cli: &Cli) -> Result<BagDb> {
    match &cli.db {
        Some(path) => BagDb::open(expand_home(path)?),
        None => BagDb::open_default(),
    }
}

// === Output Structures ===

#[derive(Serialize)]
struct TypeRow {
    id: String,
    name: String,
    sizes: Vec<ContainerSize>,
}

#[derive(Serialize)]
struct SnapshotNode {
    instance_id: i32,
    type_id: String,
    kind: &'static str,
    size: ContainerSize,
    items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_icon: Option<Rectangle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nested: Vec<SnapshotNode>,
}

impl From<&BagSnapshot> for SnapshotNode {
    fn from(snapshot: &BagSnapshot) -> Self {
        Self {
            instance_id: snapshot.instance_id,
            type_id: snapshot.type_id.clone(),
            kind: snapshot.reserved_type().map_or("bounded", ReservedTypeId::name),
            size: snapshot.size,
            items: snapshot.contents.len(),
            custom_icon: snapshot.custom_icon(),
            nested: snapshot.nested_bags.iter().map(Self::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct LoadedRow {
    instance_id: i32,
    kind: &'static str,
    type_id: String,
    size: ContainerSize,
    items: usize,
}

/// `instance_id` is the saved top-level bag; `type_id` and `reason` describe
/// the bag that actually failed, which may be nested inside it.
#[derive(Serialize)]
struct SkippedRow {
    instance_id: i32,
    type_id: String,
    reason: String,
}

impl From<&SkippedBag> for SkippedRow {
    fn from(skipped: &SkippedBag) -> Self {
        Self {
            instance_id: skipped.instance_id,
            type_id: skipped.failure.type_id().to_string(),
            reason: skipped.failure.to_string(),
        }
    }
}

#[derive(Serialize)]
struct LoadOutput {
    loaded: Vec<LoadedRow>,
    skipped: Vec<SkippedRow>,
}

impl From<&LoadReport> for LoadOutput {
    fn from(report: &LoadReport) -> Self {
        Self {
            loaded: report
                .loaded
                .iter()
                .map(|loaded| LoadedRow {
                    instance_id: loaded.instance_id,
                    kind: loaded.bag.kind_name(),
                    type_id: loaded.bag.type_id().to_string(),
                    size: loaded.bag.size(),
                    items: loaded.bag.item_count(),
                })
                .collect(),
            skipped: report.skipped.iter().map(SkippedRow::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct ImportOutput {
    imported: Vec<i32>,
    skipped: Vec<SkippedRow>,
}

#[derive(Serialize)]
struct ExportOutput {
    path: PathBuf,
    bags: usize,
}

#[derive(Serialize)]
struct RemoveOutput {
    instance_id: i32,
    removed: bool,
}

#[derive(Serialize)]
struct VersionOutput {
    version: &'static str,
    git_sha: &'static str,
    git_dirty: &'static str,
    build_timestamp: &'static str,
    rustc: &'static str,
    target: &'static str,
}

// === Command Implementations ===

fn cmd_types(cli: &Cli) -> Result<()> {
    let index = type_index(cli)?;
    let rows: Vec<TypeRow> = index
        .sorted()
        .into_iter()
        .map(|bag_type| TypeRow {
            id: bag_type.id.clone(),
            name: bag_type.name.clone(),
            sizes: bag_type.sizes().collect(),
        })
        .collect();

    if cli.use_json() {
        output_json(cli, &rows)?;
    } else if rows.is_empty() {
        println!("{}", style("No bag types defined").yellow());
    } else {
        for row in &rows {
            let sizes: Vec<_> = row.sizes.iter().map(ContainerSize::as_str).collect();
            println!(
                "{}  {} [{}]",
                style(&row.id).green(),
                row.name,
                sizes.join(", ")
            );
        }
    }
    Ok(())
}

fn cmd_inspect(cli: &Cli, args: &cli::InspectArgs) -> Result<()> {
    let save = SaveFile::read_from(&args.save)?;
    let nodes: Vec<SnapshotNode> = save.bags.iter().map(SnapshotNode::from).collect();

    if cli.use_json() {
        output_json(cli, &nodes)?;
    } else if nodes.is_empty() {
        println!("{}", style("Save file contains no bags").yellow());
    } else {
        for node in &nodes {
            print_node(node, 0);
        }
    }
    Ok(())
}

fn print_node(node: &SnapshotNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let id = if node.instance_id < 0 {
        "-".to_string()
    } else {
        node.instance_id.to_string()
    };
    let icon = if node.custom_icon.is_some() {
        " (custom icon)"
    } else {
        ""
    };
    println!(
        "{indent}{} {} {} {} items={}{icon}",
        style(format!("#{id}")).bold(),
        style(node.kind).cyan(),
        node.type_id,
        node.size,
        node.items
    );
    for nested in &node.nested {
        print_node(nested, depth + 1);
    }
}

fn cmd_load(cli: &Cli, args: &cli::LoadArgs) -> Result<()> {
    let index = type_index(cli)?;
    let report = SaveFile::read_from(&args.save)?.restore(&index);
    let output = LoadOutput::from(&report);

    if cli.use_json() {
        output_json(cli, &output)?;
    } else {
        for row in &output.loaded {
            println!(
                "{} #{} {} {} items={}",
                style("loaded ").green(),
                row.instance_id,
                style(row.kind).cyan(),
                row.size,
                row.items
            );
        }
        for row in &output.skipped {
            println!("{} #{} {}", style("skipped").yellow(), row.instance_id, row.reason);
        }
        println!(
            "{} loaded, {} skipped",
            report.loaded_count(),
            report.skipped_count()
        );
    }

    match report.skipped.into_iter().next() {
        Some(skipped) if args.strict => Err(skipped.failure.into()),
        _ => Ok(()),
    }
}

fn cmd_import(cli: &Cli, args: &cli::ImportArgs) -> Result<()> {
    let save = SaveFile::read_from(&args.save)?;
    let mut db = open_db(cli)?;
    let mut output = ImportOutput {
        imported: Vec::new(),
        skipped: Vec::new(),
    };

    if args.skip_invalid {
        let report = save.restore(&type_index(cli)?);
        output.skipped = report.skipped.iter().map(SkippedRow::from).collect();
        output.imported = db.save_bags(&report.into_bags())?;
    } else {
        output.imported = db.import_snapshots(save.bags)?;
    }

    if cli.use_json() {
        output_json(cli, &output)?;
    } else {
        println!(
            "{} {} bag(s)",
            style("Imported").green(),
            output.imported.len()
        );
        for row in &output.skipped {
            println!("{} #{} {}", style("skipped").yellow(), row.instance_id, row.reason);
        }
    }
    Ok(())
}

fn cmd_export(cli: &Cli, args: &cli::ExportArgs) -> Result<()> {
    let db = open_db(cli)?;
    let save = SaveFile {
        saved_at: Some(chrono::Utc::now()),
        bags: db.snapshots()?,
        ..SaveFile::default()
    };
    save.write_to(&args.out)?;

    let output = ExportOutput {
        path: args.out.clone(),
        bags: save.bags.len(),
    };
    if cli.use_json() {
        output_json(cli, &output)?;
    } else {
        println!(
            "{} {} bag(s) to {}",
            style("Exported").green(),
            output.bags,
            output.path.display()
        );
    }
    Ok(())
}

fn cmd_list(cli: &Cli) -> Result<()> {
    let db = open_db(cli)?;
    let bags = db.list_bags()?;

    if cli.use_json() {
        output_json(cli, &bags)?;
    } else if bags.is_empty() {
        println!("{}", style("No bags stored").yellow());
    } else {
        for bag in &bags {
            let kind = ReservedTypeId::from_type_id(&bag.type_id)
                .map_or("bounded", ReservedTypeId::name);
            println!(
                "{} {} {} {} items={} nested={}",
                style(format!("#{}", bag.instance_id)).bold(),
                style(kind).cyan(),
                bag.type_id,
                bag.size,
                bag.item_count,
                bag.nested_count
            );
        }
    }
    Ok(())
}

fn cmd_remove(cli: &Cli, args: &cli::RemoveArgs) -> Result<()> {
    let mut db = open_db(cli)?;
    if !db.delete_bag(args.instance_id)? {
        return Err(BagsError::BagNotFound {
            instance_id: args.instance_id,
        });
    }

    if cli.use_json() {
        output_json(
            cli,
            &RemoveOutput {
                instance_id: args.instance_id,
                removed: true,
            },
        )?;
    } else {
        println!("{} bag #{}", style("Removed").green(), args.instance_id);
    }
    Ok(())
}

fn cmd_version(cli: &Cli) {
    let output = VersionOutput {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty(),
        build_timestamp: build_info::build_timestamp(),
        rustc: build_info::rustc_semver(),
        target: build_info::target(),
    };

    if cli.use_json() {
        if let Err(e) = output_json(cli, &output) {
            output_error(cli, &e);
        }
    } else {
        println!("bags {} ({})", output.version, output.git_sha);
        println!("built {} for {}", output.build_timestamp, output.target);
        println!("rustc {}", output.rustc);
    }
}

// === Output Helpers ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) -> Result<()> {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    }
    .map_err(|e| BagsError::Other(format!("Failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

fn output_error(cli: &Cli, error: &BagsError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{json:#}");
    } else {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
