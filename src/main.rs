use clap::{ArgAction, Parser};
use cladeview::layout::LaidOutTree;
use cladeview::metadata::{MetadataTable, Palette, DEFAULT_JOIN_COLUMN};
use cladeview::newick::to_newick;
use cladeview::parse_newick_file;
use cladeview::render::RenderStyle;
use cladeview::view::{RenderRequest, TreeView};
use log::{info, warn};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Column position used for coloring when none is given.
const DEFAULT_COLOR_COLUMN_INDEX: usize = 2;

#[derive(Parser)]
#[command(name = "cladeview")]
#[command(about = "Lay out a Newick tree as a cladogram colored by sample metadata.", long_about = None)]
struct Args {
    /// Load the tree in Newick format from this FILE.
    #[arg(short = 't', long = "tree", value_name = "FILE")]
    tree: PathBuf,

    /// Load sample metadata in CSV format from this FILE.
    #[arg(short = 'm', long = "metadata", value_name = "FILE")]
    metadata: PathBuf,

    /// Metadata column holding the sample identifiers.
    #[arg(short = 'i', long = "id-column", value_name = "COLUMN", default_value = DEFAULT_JOIN_COLUMN)]
    id_column: String,

    /// Color leaves by this metadata column [default: third column].
    #[arg(short = 'c', long = "color-by", value_name = "COLUMN")]
    color_by: Option<String>,

    /// Show markers for this category; may be repeated.
    #[arg(short = 's', long = "select", value_name = "VALUE")]
    select: Vec<String>,

    /// Without --select, show the first N categories in sorted order.
    #[arg(short = 'n', long = "default-selection", value_name = "N", default_value_t = 5)]
    default_selection: usize,

    /// Read render style (and optional palette) from this JSON FILE.
    #[arg(long = "style", value_name = "FILE")]
    style: Option<PathBuf>,

    /// Print the tree back as normalized Newick and exit.
    #[arg(long = "normalize")]
    normalize: bool,

    /// Print the sorted categories of the coloring column and exit.
    #[arg(short = 'l', long = "list-categories")]
    list_categories: bool,

    /// Write the render model as JSON to this FILE instead of stdout.
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Contents of a `--style` file.
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct StyleFile {
    style: RenderStyle,
    palette: Option<Palette>,
}

fn load_style(args: &Args) -> Result<StyleFile, Box<dyn Error>> {
    match &args.style {
        Some(path) => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(io::BufReader::new(file))?)
        }
        None => Ok(StyleFile::default()),
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let tree = parse_newick_file(&args.tree)?;
    if args.normalize {
        println!("{}", to_newick(&tree));
        return Ok(());
    }

    let table = MetadataTable::from_path(&args.metadata)?;
    let StyleFile { style, palette } = load_style(args)?;

    let column = match &args.color_by {
        Some(column) => column.clone(),
        None => table
            .columns()
            .get(DEFAULT_COLOR_COLUMN_INDEX)
            .cloned()
            .ok_or("metadata has fewer than three columns, use --color-by")?,
    };
    info!("Coloring by '{column}'");

    let mut view = TreeView::new(Arc::new(LaidOutTree::new(tree)), table)
        .with_join_column(&args.id_column)
        .with_style(style);
    if let Some(palette) = palette {
        view = view.with_palette(palette);
    }

    if args.list_categories {
        let mut stdout = io::stdout().lock();
        for category in view.categories(&column)? {
            writeln!(stdout, "{category}")?;
        }
        return Ok(());
    }

    let request = if args.select.is_empty() {
        match view.default_request(&column, args.default_selection) {
            Ok(request) => request,
            Err(e) => {
                warn!("{e}");
                RenderRequest::new(&column, Vec::<String>::new())
            }
        }
    } else {
        RenderRequest::new(&column, args.select.iter().cloned())
    };

    let model = view.render(&request);
    info!(
        "Render model has {} segments, {} markers and {} legend entries",
        model.segments.len(),
        model.markers.len(),
        model.legend.len()
    );

    match &args.out {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &model)?;
            writer.flush()?;
            info!("Saved to {path:?}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &model)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
