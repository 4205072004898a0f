use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// 設問番号が1〜12ではない
    #[error("illegal question number: {0}")]
    IllegalQuestion(u8),

    /// 回答選択肢が違反
    #[error("illegal answer: {0} (expected 1-5)")]
    IllegalAnswer(u8),

    /// 数字として読めない回答
    #[error("unreadable answer: {0:?}")]
    UnreadableAnswer(String),

    /// 回答欠落
    #[error("not all questions are answered")]
    NotFulfilled,

    #[error("row {id}: cannot read answer {value:?} for question {question}")]
    MalformedAnswer {
        id: String,
        question: usize,
        value: String,
    },

    #[error("invalid question bank: {0}")]
    InvalidQuestionBank(String),

    #[error("input closed before all questions were answered")]
    UnexpectedEof,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
