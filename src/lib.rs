use once_cell::sync::Lazy;

mod answer;
mod bulk;
mod error;
mod question;
mod report;
mod scorer;

pub use answer::{parse_answer, Answer, AnswerStore, QUESTION_COUNT};
pub use bulk::{read_bulk, BulkRow};
pub use error::{Error, Result};
pub use question::{Choice, Factor, Question, QuestionBank};
pub use report::{init_tracing, render, OutputFormat};
pub use scorer::{reverse, score, Diagnosis, FactorScores, Gender, InstinctLevels, WIRING};

/// 同梱の設問マスタ。初回参照時に一度だけ読み込む。
pub static QUESTIONS: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_reader(include_str!("../resources/rpg.json").as_bytes())
        .expect("bundled question bank is valid")
});
