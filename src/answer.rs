use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scorer::{score, Diagnosis, Gender};

/// 設問の数
pub const QUESTION_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: u8,
    pub score: u8,
}

/// 回答を検証しながら溜めておく入れ物
///
/// 判定そのものは入力を検証しないので、ウィザードや一括読み込みはここを通して
/// 1〜5の回答と1〜12の設問番号だけを受け付ける。
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    values: [u8; QUESTION_COUNT],
}

/// 入力された1行を回答番号として読む。前後の空白は無視する。
///
/// UTF-8でない行や数字でない行は、読めなかった文字列ごと `UnreadableAnswer` になる。
/// 範囲の検証は [`AnswerStore::insert`] が行う。
pub fn parse_answer(line: &[u8]) -> Result<u8> {
    let text = std::str::from_utf8(line)
        .map_err(|_| Error::UnreadableAnswer(String::from_utf8_lossy(line).trim().to_string()))?
        .trim();
    text.parse::<u8>()
        .map_err(|_| Error::UnreadableAnswer(text.to_string()))
}

impl AnswerStore {
    /// 設問番号を指定して回答を格納する
    /// 1〜5の回答番号以外は認めない。
    pub fn insert(&mut self, question_id: u8, score: u8) -> Result<()> {
        if !(1..=QUESTION_COUNT as u8).contains(&question_id) {
            return Err(Error::IllegalQuestion(question_id));
        }
        if !(1..=5).contains(&score) {
            return Err(Error::IllegalAnswer(score));
        }
        self.values[usize::from(question_id - 1)] = score;
        Ok(())
    }

    pub fn is_fulfilled(&self) -> bool {
        self.values.iter().all(|&value| value != 0)
    }

    /// 回答済みの設問だけを返す
    pub fn answers(&self) -> Vec<Answer> {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(index, &value)| Answer {
                question_id: index as u8 + 1,
                score: value,
            })
            .collect()
    }

    /// 全設問が回答済みであれば判定する
    pub fn diagnose(&self, gender: Gender) -> Result<Diagnosis> {
        if !self.is_fulfilled() {
            return Err(Error::NotFulfilled);
        }
        Ok(score(&self.answers(), gender))
    }
}
