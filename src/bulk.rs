use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::answer::AnswerSet;
use crate::Error;

/// 一括回答CSVを読み込む
///
/// 1列目が回答者ID、2列目以降のヘッダが設問ID。空欄は未回答として扱う。
pub fn read_bulk<R: Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<(String, AnswerSet), Error>>, Error> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    Ok(reader
        .into_records()
        .map(move |record| parse_row(&headers, &record?)))
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<(String, AnswerSet), Error> {
    let id = record.get(0).unwrap_or_default().to_string();
    let mut answers = AnswerSet::new();
    for (question, cell) in headers.iter().zip(record.iter()).skip(1) {
        if cell.is_empty() {
            continue;
        }
        let index = cell.parse::<i64>().map_err(|_| Error::IllegalAnswer)?;
        answers.insert(question, index);
    }
    Ok((id, answers))
}
