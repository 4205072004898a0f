use std::io::{stdin, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rpg_diagnosis::{
    init_tracing, parse_answer, render, AnswerStore, Error, Gender, OutputFormat, QuestionBank,
    QUESTIONS,
};

#[derive(Parser)]
#[command(name = "rpg_diagnosis", version, about = "12問の質問に答えて本能タイプを診断する")]
struct Args {
    /// "female" のときだけ共感本能を女性用の判定表で判定する
    #[arg(long)]
    gender: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 同梱の設問マスタの代わりに使うJSONファイル
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let custom;
    let bank: &QuestionBank = match &args.questions {
        Some(path) => {
            custom = QuestionBank::from_path(path)?;
            &custom
        }
        None => &*QUESTIONS,
    };
    let gender = Gender::from(args.gender.as_deref());

    let mut input = stdin().lock();
    let mut buffer = Vec::new();
    let mut store = AnswerStore::default();

    println!("{}", bank.title);
    for question in bank.questions() {
        println!("Q{}. {}", question.id, question.text);
        for choice in &bank.choices {
            print!("  {} => {}", choice.score, choice.text);
        }
        loop {
            println!();
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                return Err(Error::UnexpectedEof);
            }
            match parse_answer(&buffer).and_then(|value| store.insert(question.id, value)) {
                Ok(()) => break,
                Err(e) => {
                    tracing::debug!(question = question.id, "rejected answer: {}", e);
                    println!("回答は半角数字1〜5で入力してください。");
                }
            }
        }
        println!();
    }

    let diagnosis = store.diagnose(gender)?;
    tracing::info!(?gender, "diagnosis finished");
    println!("{}", render(&diagnosis, args.format)?);
    Ok(())
}
