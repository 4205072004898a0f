use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use rpg_diagnosis::{init_tracing, read_bulk, render, score, Diagnosis, Error, OutputFormat};
use serde::Serialize;

/// CSV (id,gender,q1..q12) の全行を判定する
#[derive(Parser)]
#[command(name = "bulk", version)]
struct Args {
    path: PathBuf,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 未回答のある行も、未回答を既定値で補って判定する
    #[arg(long)]
    lenient: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    id: &'a str,
    #[serde(flatten)]
    diagnosis: &'a Diagnosis,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(reader) {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("skipping row: {}", e);
                continue;
            }
        };
        let diagnosis = if args.lenient {
            score(&row.store.answers(), row.gender)
        } else {
            match row.store.diagnose(row.gender) {
                Ok(diagnosis) => diagnosis,
                Err(e) => {
                    tracing::warn!(id = %row.id, "skipping row: {}", e);
                    continue;
                }
            }
        };
        match args.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string(&JsonLine {
                    id: &row.id,
                    diagnosis: &diagnosis,
                })?
            ),
            OutputFormat::Text => println!(
                "id = {}\n{}",
                row.id,
                render(&diagnosis, OutputFormat::Text)?
            ),
        }
    }
    Ok(())
}
