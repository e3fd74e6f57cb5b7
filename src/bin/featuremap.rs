//! A binary to lay out an annotation file into lanes and draw the result as
//! text.
//!
//! ```shell
//! cargo run --release --bin=featuremap --features=binaries -- annotations.tsv 50000
//! ```
//!
//! The annotation file is tab-delimited (and may be gzipped) with one feature
//! per line:
//!
//! ```text
//! category  strand  spans            label
//! gene      +       100-900          abcA
//! mRNA      -       100-300,450-900  abcA-201
//! ```
//!
//! Lines that are empty or start with `#` are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use featuremap::feature::Feature;
use featuremap::feature::Position;
use featuremap::feature::Span;
use featuremap::feature::Strand;
use featuremap::layout::Abutting;
use featuremap::layout::organizer;
use featuremap::transform::Pixel;
use featuremap::viewport::Glyph;
use featuremap::viewport::Options;
use featuremap::viewport::Viewport;
use flate2::read::GzDecoder;
use regex::Regex;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Records
////////////////////////////////////////////////////////////////////////////////////////

/// A comma-separated list of `start-end` spans.
static SPANS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-\d+(,\d+-\d+)*$").unwrap());

/// A single line of an annotation file.
#[derive(Debug, PartialEq)]
struct Record {
    /// The category key.
    category: String,

    /// The strand.
    strand: Strand,

    /// The spans, in file order.
    spans: Vec<Span>,

    /// The label shown for the feature.
    label: String,
}

impl Record {
    /// Attempts to turn the record into a feature labelled with the record's
    /// label.
    fn try_into_feature(self) -> Result<Feature<String>> {
        Feature::try_spliced(self.category, self.strand, self.spans, self.label)
            .context("building feature")
    }
}

impl FromStr for Record {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields = s.split('\t').collect::<Vec<_>>();

        let [category, strand, spans, label] = fields.as_slice() else {
            bail!("expected 4 tab-delimited fields, found {}", fields.len());
        };

        if !SPANS.is_match(spans) {
            bail!("invalid spans: {spans}");
        }

        let strand = strand.parse::<Strand>()?;
        let spans = spans
            .split(',')
            .map(|span| {
                span.parse::<Span>()
                    .with_context(|| format!("parsing span `{span}`"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category: category.to_string(),
            strand,
            spans,
            label: label.to_string(),
        })
    }
}

/// Reads every feature from an annotation file.
fn read_features(path: &Path) -> Result<Vec<Feature<String>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    let reader: Box<dyn BufRead> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Box::new(BufReader::new(GzDecoder::new(file))),
        _ => Box::new(BufReader::new(file)),
    };

    let mut features = Vec::new();

    for (i, result) in reader.lines().enumerate() {
        let line = result.context("reading annotation file")?;
        let line = line.trim_end();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let feature = line
            .parse::<Record>()
            .and_then(Record::try_into_feature)
            .with_context(|| format!("line {}", i + 1))?;

        features.push(feature);
    }

    Ok(features)
}

////////////////////////////////////////////////////////////////////////////////////////
// Painters
////////////////////////////////////////////////////////////////////////////////////////

/// A way of drawing a glyph as characters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Painter {
    /// Arrows pointing along the strand.
    #[default]
    Arrow,

    /// A bracketed bar.
    Block,

    /// Filled segments joined by a thin line.
    Exons,
}

impl FromStr for Painter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "arrow" => Ok(Painter::Arrow),
            "block" => Ok(Painter::Block),
            "exons" => Ok(Painter::Exons),
            _ => bail!("unknown painter: {s}"),
        }
    }
}

impl Painter {
    /// Paints `glyph` into a row of characters that starts at pixel
    /// `window_x`.
    fn paint(&self, glyph: &Glyph<'_, String>, row: &mut [char], window_x: Pixel) {
        let mut put = |x: Pixel, c: char| {
            if let Ok(column) = usize::try_from(x - window_x) {
                if let Some(cell) = row.get_mut(column) {
                    *cell = c;
                }
            }
        };

        let rect = glyph.rect;

        match self {
            Painter::Arrow => {
                let c = match glyph.strand {
                    Strand::Plus => '>',
                    Strand::Minus => '<',
                };

                for x in rect.x..=rect.right() {
                    put(x, c);
                }
            }
            Painter::Block => {
                for x in rect.x..=rect.right() {
                    put(x, '=');
                }

                put(rect.x, '[');
                put(rect.right(), ']');
            }
            Painter::Exons => {
                for x in rect.x..=rect.right() {
                    put(x, '-');
                }

                for segment in &glyph.segments {
                    for x in segment.x..=segment.right() {
                        put(x, '#');
                    }
                }
            }
        }
    }
}

/// Parses `category=painter` assignments.
fn parse_painters(assignments: &[String]) -> Result<HashMap<String, Painter>> {
    assignments
        .iter()
        .map(|assignment| {
            let Some((category, painter)) = assignment.split_once('=') else {
                bail!("expected `category=painter`, found `{assignment}`");
            };

            Ok((category.to_string(), painter.parse()?))
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Prints a table of lanes and the features within them.
fn print_lanes(viewport: &Viewport<String>) {
    let mut builder = Builder::default();
    builder.push_record(["Lane", "Category", "Features", "Labels"]);

    for (i, lane) in viewport.layout().lanes().iter().enumerate() {
        let labels = lane
            .resolve(viewport.features())
            .map(|(_, feature)| feature.payload().as_str())
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            i.to_string(),
            lane.category().to_string(),
            lane.len().to_string(),
            labels,
        ]);
    }

    println!("{}", builder.build().with(Style::rounded()));
}

/// Prints the visible window, one row of characters per lane.
fn print_drawing(viewport: &Viewport<String>, painters: &HashMap<String, Painter>) {
    let span = viewport.visible_span();
    println!(
        "positions {}-{} at {:.2}x",
        span.start(),
        span.end(),
        viewport.zoom_factor()
    );

    let columns = usize::try_from(viewport.base_width()).unwrap_or_default();
    let window_x = viewport.window_x();
    let name_width = viewport
        .layout()
        .lanes()
        .iter()
        .map(|lane| lane.category().len())
        .max()
        .unwrap_or_default();

    viewport.render(|lane| {
        let painter = painters.get(lane.category).copied().unwrap_or_default();
        let mut row = vec![' '; columns];

        for glyph in &lane.glyphs {
            painter.paint(glyph, &mut row, window_x);
        }

        println!(
            "{:>name_width$} |{}|",
            lane.category,
            row.into_iter().collect::<String>()
        );
    });
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// How glyphs that touch the same pixel column are packed.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum AbuttingArg {
    /// Touching glyphs go to separate lanes.
    Separate,

    /// Touching glyphs may share a lane.
    Share,
}

impl From<AbuttingArg> for Abutting {
    fn from(value: AbuttingArg) -> Self {
        match value {
            AbuttingArg::Separate => Abutting::Separate,
            AbuttingArg::Share => Abutting::Share,
        }
    }
}

/// Lays out an annotation file and draws it.
#[derive(Parser)]
struct Args {
    /// The annotation file (optionally gzipped).
    src: PathBuf,

    /// The length of the annotated sequence.
    length: u64,

    /// The width of the drawing in characters.
    #[arg(short, long, default_value_t = 100)]
    width: Pixel,

    /// The zoom multiplier.
    #[arg(short, long, default_value_t = 1.0)]
    zoom: f64,

    /// The sequence position to start the drawing at when zoomed in.
    #[arg(long)]
    from: Option<Position>,

    /// Whether to put every category in a single lane.
    #[arg(short, long, default_value_t = false)]
    force_one_lane: bool,

    /// The categories to show first, in order (comma-separated).
    #[arg(short, long, value_delimiter = ',')]
    category_order: Vec<String>,

    /// How touching glyphs are packed.
    #[arg(short, long, value_enum, default_value_t = AbuttingArg::Separate)]
    abutting: AbuttingArg,

    /// A `category=painter` assignment, where the painter is one of `arrow`,
    /// `block` or `exons`. May be repeated.
    #[arg(short, long)]
    painter: Vec<String>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn throw(args: &Args) -> Result<()> {
    let painters = parse_painters(&args.painter)?;
    let features = read_features(&args.src)?;
    info!("read {} features from {}", features.len(), args.src.display());

    let mut builder = organizer::Builder::default()
        .force_one_lane_per_category(args.force_one_lane)
        .abutting(args.abutting.into());

    if !args.category_order.is_empty() {
        builder = builder.display_order(args.category_order.iter().cloned());
    }

    let options = Options {
        lane_height: 1,
        lane_gap: 0,
        left_margin: 0,
        right_margin: 0,
        ..Default::default()
    };

    let mut viewport = Viewport::try_new(args.length, args.width, options, builder.build())
        .context("creating viewport")?;
    viewport.set_features(features);

    if args.zoom != 1.0 && !viewport.zoom(args.zoom, 0) {
        warn!("zoom of {} left the drawing unchanged", args.zoom);
    }

    if let Some(from) = args.from {
        viewport.pan_to(viewport.transform().to_pixel(from));
    }

    if !viewport.layout().unmatched().is_empty() {
        warn!(
            "{} features matched no category",
            viewport.layout().unmatched().len()
        );
    }

    print_lanes(&viewport);
    print_drawing(&viewport, &painters);

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    throw(&args)
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn valid() -> Result<()> {
        let record = "mRNA\t-\t100-300,450-900\tabcA-201".parse::<Record>()?;

        assert_eq!(record.category, "mRNA");
        assert_eq!(record.strand, Strand::Minus);
        assert_eq!(
            record.spans,
            vec![Span::try_new(100, 300)?, Span::try_new(450, 900)?]
        );
        assert_eq!(record.label, "abcA-201");

        let feature = record.try_into_feature()?;
        assert_eq!(feature.segments().len(), 2);
        assert_eq!(feature.payload(), "abcA-201");

        Ok(())
    }

    #[test]
    fn invalid() {
        let err = "gene\t+\t100-900".parse::<Record>().unwrap_err();
        assert_eq!(err.to_string(), "expected 4 tab-delimited fields, found 3");

        let err = "gene\t+\t100..900\tabcA".parse::<Record>().unwrap_err();
        assert_eq!(err.to_string(), "invalid spans: 100..900");

        assert!("gene\t?\t100-900\tabcA".parse::<Record>().is_err());
        assert!("gene\t+\t900-100\tabcA".parse::<Record>().is_err());

        let record = "mRNA\t+\t100-500,400-900\tabcA".parse::<Record>().unwrap();
        assert!(record.try_into_feature().is_err());
    }
}
