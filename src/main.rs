use anyhow::{Context, Result};
use pose_geometry::{
    input::{read_records, Record},
    PoseAnalysis, Thresholds,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    /// File of pose records, one per line. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Keypoint score threshold for angles, symmetry and actions.
    #[structopt(short, long, default_value = "0.5")]
    confidence: f32,

    /// Eye score threshold for the head-turn check.
    #[structopt(long, default_value = "0.3")]
    head_turn_confidence: f32,

    /// Score above which a keypoint is reported as high confidence.
    #[structopt(long, default_value = "0.8")]
    high_confidence: f32,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    let thresholds = Thresholds::default()
        .with_confidence(opt.confidence)
        .with_head_turn_confidence(opt.head_turn_confidence)
        .with_high_confidence(opt.high_confidence)
        .validate()
        .context("invalid thresholds")?;
    debug!(?thresholds);

    let records = read_records(open_input(opt.input.as_ref())?)
        .context("failed reading pose records")?;
    info!(message = "read pose records", count = records.len());

    for (i, record) in records.iter().enumerate() {
        match record {
            Record::Detection(detection) => println!(
                "person #{} bbox=[{:.0}, {:.0}, {:.0}, {:.0}] score={:.2}",
                i,
                detection.bbox[0],
                detection.bbox[1],
                detection.bbox[2],
                detection.bbox[3],
                detection.score
            ),
            Record::Pose(_) => println!("person #{}", i),
        }
        print!("{}", PoseAnalysis::analyze(record.pose(), &thresholds));
    }

    Ok(())
}
