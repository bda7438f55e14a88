use std::fs::File;
use std::io::{stdin, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stresscheck::config::AppConfig;
use stresscheck::{telemetry, AnswerSet, DiagnosisService, Error, Gender, ReferenceData, Section};

#[derive(Parser)]
#[command(about = "職業性ストレス簡易調査票（57 項目）に回答して結果を表示する")]
struct Args {
    /// 参照データのディレクトリ
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// male または female
    #[arg(long)]
    gender: Option<Gender>,
    /// 回答済みのJSON（設問ID ⇒ 回答番号）。指定しなければ対話形式で回答する。
    #[arg(long)]
    answers: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_dir = args.data_dir.unwrap_or(config.data_dir);
    let gender = args.gender.unwrap_or(config.gender);
    let service = DiagnosisService::new(Arc::new(ReferenceData::load(data_dir)?));

    let answers = match args.answers {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => ask(&service)?,
    };

    let result = service.calculate(&answers, gender)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    match result.high_stress {
        true => println!("あなたは高ストレス状態です。"),
        false => println!("あなたは高ストレスではありません。"),
    }
    Ok(())
}

fn ask(service: &DiagnosisService) -> Result<AnswerSet, Error> {
    let mut buffer = String::new();
    let mut answers = AnswerSet::new();
    let mut section: Option<Section> = None;

    for question in service.get_questions() {
        if section != Some(question.section) {
            section = Some(question.section);
            println!("{}", question.section.instruction());
        }
        println!("{}. {}", question.number, question.text);
        for (index, option) in question.options.iter().enumerate() {
            print!("  {} => {}", index + 1, option.label);
        }
        loop {
            println!();
            buffer.clear();
            if stdin().read_line(&mut buffer)? == 0 {
                return Ok(answers);
            }
            match parse_answer(buffer.trim()) {
                Ok(index) => {
                    answers.insert(question.id.as_str(), index);
                    break;
                }
                Err(_) => println!("回答は半角英数1〜4で入力してください。"),
            }
        }
        println!();
    }
    Ok(answers)
}

fn parse_answer(value: &str) -> Result<i64, Error> {
    let value = value.parse::<i64>().map_err(|_| Error::IllegalAnswer)?;
    if stresscheck::answer::is_valid_index(value) {
        Ok(value)
    } else {
        Err(Error::IllegalAnswer)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_answer() {
        for (value, expected) in [("1", 1), ("2", 2), ("3", 3), ("4", 4)] {
            assert_eq!(parse_answer(value).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_answer_rejects_out_of_range() {
        for value in ["0", "5", "-1", "x", "", "2.0", "１"] {
            assert!(
                matches!(parse_answer(value), Err(Error::IllegalAnswer)),
                "{:?}",
                value
            );
        }
    }
}
