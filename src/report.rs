use clap::ValueEnum;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;
use crate::question::Factor;
use crate::scorer::Diagnosis;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 判定結果を出力形式に合わせて文字列にする
pub fn render(diagnosis: &Diagnosis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(diagnosis)?),
        OutputFormat::Text => Ok(diagnosis
            .instinct_levels
            .levels()
            .iter()
            .map(|&(factor, level)| {
                format!(
                    "{}: レベル{} (素点 {})",
                    factor.label(),
                    level,
                    diagnosis.factor_scores.get(factor)
                )
            })
            .collect::<Vec<String>>()
            .join("\n")),
    }
}

/// ログは標準エラーへ。-v の数で詳細度を上げ、指定がなければ RUST_LOG に従う。
///
/// 既にグローバルな subscriber があればそれを使い続ける。
pub fn init_tracing(verbose: u8) {
    let filter = match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    if fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scorer::{score, Gender};

    #[test]
    fn test_render_text() {
        let text = render(&score(&[], Gender::Unspecified), OutputFormat::Text).unwrap();
        let lines = text.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "狩猟本能: レベル1 (素点 0)");
        assert_eq!(lines[1], "共感本能: レベル1 (素点 3)");
        assert_eq!(lines[3], "職人魂: レベル1 (素点 3)");
    }

    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("info"));
        assert_eq!(verbosity_directive(2), Some("debug"));
        assert_eq!(verbosity_directive(7), Some("trace"));
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(0);
        init_tracing(2);
    }

    #[test]
    fn test_render_json() {
        let json = render(&score(&[], Gender::Female), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["factorScores"]["gunner"], 3);
        assert_eq!(value["instinctLevels"]["警戒本能"], 1);
    }
}
