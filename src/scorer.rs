use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::Serialize;

use crate::answer::Answer;
use crate::question::Factor;

/// 設問番号と因子の配線表 (設問番号, 因子, 逆転項目)
pub const WIRING: [(u8, Factor, bool); 12] = [
    (1, Factor::Fencer, false),
    (2, Factor::Healer, false),
    (3, Factor::Schemer, false),
    (4, Factor::Gunner, false),
    (5, Factor::Shielder, false),
    (6, Factor::Fencer, false),
    (7, Factor::Healer, true),
    (8, Factor::Schemer, false),
    (9, Factor::Gunner, true),
    (10, Factor::Shielder, false),
    (11, Factor::Schemer, false),
    (12, Factor::Healer, false),
];

/// 逆転項目が未回答のときに仮定する回答
const NEUTRAL_SCORE: i32 = 3;

/// 逆転項目の換算。1⇒5、2⇒4、3⇒3、4⇒2、5⇒1。
pub fn reverse(score: i32) -> i32 {
    6 - score
}

/// 共感本能の判定表を切り替える性別区分
///
/// `"female"` だけが女性用の判定表を選ぶ。それ以外の文字列や未指定は全て `Unspecified`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    #[default]
    Unspecified,
}

impl FromStr for Gender {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "female" => Gender::Female,
            _ => Gender::Unspecified,
        })
    }
}

impl From<Option<&str>> for Gender {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some("female") => Gender::Female,
            _ => Gender::Unspecified,
        }
    }
}

/// 因子ごとの素点合計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactorScores {
    pub fencer: i32,
    pub healer: i32,
    pub schemer: i32,
    pub gunner: i32,
    pub shielder: i32,
}

impl FactorScores {
    /// 回答を配線表に従って因子ごとに合算する。
    ///
    /// 同じ設問番号が複数あれば後の回答が優先される。未回答の設問は、
    /// 通常項目なら0点、逆転項目なら3点と回答したものとして扱う。
    /// 範囲外の回答や未知の設問番号は検証せずにそのまま使う（あるいは無視する）。
    pub fn from_answers(answers: &[Answer]) -> Self {
        let lookup = answers
            .iter()
            .map(|answer| (answer.question_id, i32::from(answer.score)))
            .collect::<HashMap<u8, i32>>();

        let mut scores = FactorScores::default();
        for &(id, factor, reversed) in WIRING.iter() {
            let contribution = match (lookup.get(&id).copied(), reversed) {
                (answer, true) => reverse(answer.unwrap_or(NEUTRAL_SCORE)),
                (Some(answer), false) => answer,
                (None, false) => 0,
            };
            *scores.get_mut(factor) += contribution;
        }
        scores
    }

    pub fn get(&self, factor: Factor) -> i32 {
        match factor {
            Factor::Fencer => self.fencer,
            Factor::Healer => self.healer,
            Factor::Schemer => self.schemer,
            Factor::Gunner => self.gunner,
            Factor::Shielder => self.shielder,
        }
    }

    fn get_mut(&mut self, factor: Factor) -> &mut i32 {
        match factor {
            Factor::Fencer => &mut self.fencer,
            Factor::Healer => &mut self.healer,
            Factor::Schemer => &mut self.schemer,
            Factor::Gunner => &mut self.gunner,
            Factor::Shielder => &mut self.shielder,
        }
    }
}

/// 本能レベル (1〜4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstinctLevels {
    #[serde(rename = "狩猟本能")]
    pub fencer: u8,
    #[serde(rename = "共感本能")]
    pub healer: u8,
    #[serde(rename = "飛躍本能")]
    pub schemer: u8,
    #[serde(rename = "職人魂")]
    pub gunner: u8,
    #[serde(rename = "警戒本能")]
    pub shielder: u8,
}

impl InstinctLevels {
    pub fn from_scores(scores: &FactorScores, gender: Gender) -> Self {
        InstinctLevels {
            fencer: default_level(scores.fencer),
            healer: healer_level(scores.healer, gender),
            schemer: schemer_level(scores.schemer),
            gunner: default_level(scores.gunner),
            shielder: default_level(scores.shielder),
        }
    }

    pub fn level(&self, factor: Factor) -> u8 {
        match factor {
            Factor::Fencer => self.fencer,
            Factor::Healer => self.healer,
            Factor::Schemer => self.schemer,
            Factor::Gunner => self.gunner,
            Factor::Shielder => self.shielder,
        }
    }

    pub fn levels(&self) -> [(Factor, u8); 5] {
        Factor::ALL.map(|factor| (factor, self.level(factor)))
    }
}

/// 狩猟本能・職人魂・警戒本能 (素点 2〜10)
fn default_level(sum: i32) -> u8 {
    match sum {
        9.. => 4,
        7..=8 => 3,
        5..=6 => 2,
        _ => 1,
    }
}

/// 飛躍本能 (素点 3〜15)
fn schemer_level(sum: i32) -> u8 {
    match sum {
        13.. => 4,
        11..=12 => 3,
        9..=10 => 2,
        _ => 1,
    }
}

/// 共感本能 (素点 3〜15)。女性は判定表が1点ずつ厳しい。
fn healer_level(sum: i32, gender: Gender) -> u8 {
    match gender {
        Gender::Female => match sum {
            15.. => 4,
            14 => 3,
            12..=13 => 2,
            _ => 1,
        },
        Gender::Unspecified => match sum {
            14.. => 4,
            12..=13 => 3,
            10..=11 => 2,
            _ => 1,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub factor_scores: FactorScores,
    pub instinct_levels: InstinctLevels,
}

/// 12設問の回答から本能レベルを判定する
pub fn score(answers: &[Answer], gender: Gender) -> Diagnosis {
    let factor_scores = FactorScores::from_answers(answers);
    let instinct_levels = InstinctLevels::from_scores(&factor_scores, gender);
    tracing::trace!(?factor_scores, ?instinct_levels, ?gender, "scored answers");
    Diagnosis {
        factor_scores,
        instinct_levels,
    }
}
