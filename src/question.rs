use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scorer::WIRING;

/// 5つの本能に対応する因子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Fencer,
    Healer,
    Schemer,
    Gunner,
    Shielder,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Fencer,
        Factor::Healer,
        Factor::Schemer,
        Factor::Gunner,
        Factor::Shielder,
    ];

    /// 診断結果に表示する本能名
    pub fn label(self) -> &'static str {
        match self {
            Factor::Fencer => "狩猟本能",
            Factor::Healer => "共感本能",
            Factor::Schemer => "飛躍本能",
            Factor::Gunner => "職人魂",
            Factor::Shielder => "警戒本能",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Factor::Fencer => "fencer",
            Factor::Healer => "healer",
            Factor::Schemer => "schemer",
            Factor::Gunner => "gunner",
            Factor::Shielder => "shielder",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 回答選択肢
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub score: u8,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u8,
    pub text: String,
    pub factor: Factor,
    /// 逆転項目。回答を 6 - score に置き換えて合算する。
    pub reverse: bool,
}

/// 本能診断12設問のマスタ表現
///
/// 集計の配線は [`WIRING`] に固定されており、マスタは表示用の文言だけを持つ。
/// 読み込み時に設問番号・因子・逆転フラグが配線と一致することを検証する。
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    pub title: String,
    pub choices: Vec<Choice>,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let bank: QuestionBank = serde_json::from_reader(reader)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading question bank");
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions.len() != WIRING.len() {
            return Err(Error::InvalidQuestionBank(format!(
                "expected {} questions, found {}",
                WIRING.len(),
                self.questions.len()
            )));
        }
        for &(id, factor, reverse) in WIRING.iter() {
            let mut matching = self.questions.iter().filter(|q| q.id == id);
            let question = matching.next().ok_or_else(|| {
                Error::InvalidQuestionBank(format!("question {} is missing", id))
            })?;
            if matching.next().is_some() {
                return Err(Error::InvalidQuestionBank(format!(
                    "question {} is duplicated",
                    id
                )));
            }
            if question.factor != factor || question.reverse != reverse {
                return Err(Error::InvalidQuestionBank(format!(
                    "question {} must be {}{}",
                    id,
                    factor,
                    if reverse { " (reversed)" } else { "" }
                )));
            }
        }
        let scores = self.choices.iter().map(|c| c.score).collect::<Vec<u8>>();
        if scores != [1, 2, 3, 4, 5] {
            return Err(Error::InvalidQuestionBank(format!(
                "choices must be scored 1-5, found {:?}",
                scores
            )));
        }
        Ok(())
    }

    /// 設問番号を指定して設問を取得する
    pub fn question(&self, id: u8) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// 12設問を全て取得する
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
