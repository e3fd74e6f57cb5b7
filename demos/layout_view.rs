use std::env;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;

use featuremap::feature::Feature;
use featuremap::feature::Span;
use featuremap::feature::Strand;
use featuremap::layout::Organizer;
use featuremap::transform::Transform;
use flate2::read::GzDecoder;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let src = env::args().nth(1).expect("missing src");

    let length = env::args()
        .nth(2)
        .expect("missing sequence length")
        .parse::<u64>()?;

    let width = env::args()
        .nth(3)
        .map(|s| {
            s.parse::<i64>()
                .unwrap_or_else(|_| panic!("could not parse width: {s}"))
        })
        .unwrap_or(1000);

    let reader = File::open(src).map(GzDecoder::new).map(BufReader::new)?;

    let mut features = Vec::new();

    for result in reader.lines() {
        let line = result?;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = line.split('\t').collect::<Vec<_>>();
        let [category, strand, spans, label] = fields.as_slice() else {
            panic!("malformed line: {line}");
        };

        let spans = spans
            .split(',')
            .map(|span| span.parse::<Span>())
            .collect::<Result<Vec<_>, _>>()?;

        features.push(Feature::try_spliced(
            *category,
            strand.parse::<Strand>()?,
            spans,
            label.to_string(),
        )?);
    }

    let transform = Transform::try_new(length, width, 0, 0, 1.0)?;
    let layout = Organizer::default().organize(&features, &transform);

    let mut builder = Builder::default();
    builder.push_record(["Lane", "--", "Feature", "--", "--", "-->", "Pixels", "-->"]);
    builder.push_record([
        "Index", "Category", "Label", "Strand", "Start", "End", "Start", "End",
    ]);

    for (i, lane) in layout.lanes().iter().enumerate() {
        for (_, feature) in lane.resolve(&features) {
            let (start, end) = transform.project_feature(feature);

            builder.push_record([
                i.to_string().as_str(),
                lane.category(),
                feature.payload().as_str(),
                &feature.strand().to_string(),
                &feature.start().to_string(),
                &feature.end().to_string(),
                &start.to_string(),
                &end.to_string(),
            ]);
        }
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);

    Ok(())
}
