use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::answer::AnswerStore;
use crate::error::{Error, Result};
use crate::scorer::Gender;

/// 一括判定CSVの1行
///
/// 列は `id,gender,q1,…,q12`。空のセルは未回答として扱う。
#[derive(Debug, Clone)]
pub struct BulkRow {
    pub id: String,
    pub gender: Gender,
    pub store: AnswerStore,
}

/// ヘッダ付きCSVを1行ずつ読み込む。不正な行はその行だけエラーになる。
pub fn read_bulk<R: Read>(reader: R) -> impl Iterator<Item = Result<BulkRow>> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| -> Result<BulkRow> { parse_row(&record?) })
}

fn parse_row(record: &StringRecord) -> Result<BulkRow> {
    let id = record.get(0).unwrap_or_default().to_string();
    let gender = Gender::from(record.get(1).filter(|gender| !gender.is_empty()));
    let mut store = AnswerStore::default();
    for (index, cell) in record.iter().skip(2).enumerate() {
        if cell.is_empty() {
            continue;
        }
        let value = cell.parse::<u8>().map_err(|_| Error::MalformedAnswer {
            id: id.clone(),
            question: index + 1,
            value: cell.to_string(),
        })?;
        store.insert(u8::try_from(index + 1).unwrap_or(u8::MAX), value)?;
    }
    tracing::debug!(%id, ?gender, answered = store.answers().len(), "read bulk row");
    Ok(BulkRow { id, gender, store })
}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &str = "id,gender,q1,q2,q3,q4,q5,q6,q7,q8,q9,q10,q11,q12\n";

    fn rows(body: &str) -> Vec<Result<BulkRow>> {
        read_bulk(format!("{}{}", HEADER, body).as_bytes()).collect()
    }

    #[test]
    fn test_read_bulk() {
        let rows = rows(
            "a,female,5,5,5,5,5,5,1,5,1,5,5,5\n\
             b,,1,1,1,1,1,1,1,1,1,1,1,1\n",
        );
        assert_eq!(rows.len(), 2);

        let a = rows[0].as_ref().unwrap();
        assert_eq!(a.id, "a");
        assert_eq!(a.gender, Gender::Female);
        let result = a.store.diagnose(a.gender).unwrap();
        assert_eq!(result.factor_scores.healer, 15);
        assert_eq!(result.instinct_levels.healer, 4);

        let b = rows[1].as_ref().unwrap();
        assert_eq!(b.gender, Gender::Unspecified);
        assert!(b.store.is_fulfilled());
    }

    #[test]
    fn test_read_bulk_partial_row() {
        let rows = rows("c,male,,4,,,,,2,,,,,4\n");
        let c = rows[0].as_ref().unwrap();
        assert_eq!(c.gender, Gender::Unspecified);
        assert_eq!(c.store.answers().len(), 3);
        assert!(matches!(
            c.store.diagnose(c.gender),
            Err(Error::NotFulfilled)
        ));
    }

    #[test]
    fn test_read_bulk_bad_rows_do_not_stop_stream() {
        let rows = rows(
            "x,,5,5,5,5,5,5,1,5,1,5,5,9\n\
             y,,5,5,five,5,5,5,1,5,1,5,5,5\n\
             z,,5,5\n\
             ok,,3,3,3,3,3,3,3,3,3,3,3,3\n",
        );
        assert_eq!(rows.len(), 4);
        assert!(matches!(rows[0], Err(Error::IllegalAnswer(9))));
        assert!(matches!(
            rows[1],
            Err(Error::MalformedAnswer { question: 3, .. })
        ));
        assert!(matches!(rows[2], Err(Error::Csv(_))));
        assert!(rows[3].is_ok());
    }
}
