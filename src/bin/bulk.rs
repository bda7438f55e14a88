use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stresscheck::config::AppConfig;
use stresscheck::{
    read_bulk, telemetry, DiagnosisService, Error, Gender, ReferenceData, Stress, SumupScore,
};
use tracing::warn;

#[derive(Parser)]
#[command(about = "回答CSVを一括で採点し、集団分析の結果を表示する")]
struct Args {
    /// 1列目が回答者ID、以降のヘッダが設問IDのCSV
    path: PathBuf,
    /// 参照データのディレクトリ
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// male または female
    #[arg(long)]
    gender: Option<Gender>,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_dir = args.data_dir.unwrap_or(config.data_dir);
    let gender = args.gender.unwrap_or(config.gender);
    let service = DiagnosisService::new(Arc::new(ReferenceData::load(data_dir)?));

    let reader = BufReader::new(File::open(&args.path)?);
    let mut answers_list = Vec::new();
    for (line, row) in read_bulk(reader)?.enumerate() {
        match row {
            Ok((id, answers)) => {
                let score = SumupScore::from_answers(service.reference(), &answers);
                println!(
                    "id = {}, scores = {:?}, has_stress = {}",
                    id,
                    score.scores(),
                    score.has_stress()
                );
                answers_list.push(answers);
            }
            Err(e) => warn!(row = line + 1, error = %e, "row skipped"),
        }
    }

    let outcome = service.calculate_organization(&answers_list, gender);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
