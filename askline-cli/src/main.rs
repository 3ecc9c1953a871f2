use std::fs;
use std::path::PathBuf;

use askline::prompt::{
    Answer, BooleanOptions, BooleanPrompt, NumberOptions, NumberPrompt, Question, QuestionPrompt,
    StringOptions, StringPrompt, parse_questions,
};
use askline::utils::{AsyncTerminal, Terminal, Verdict};
use clap::Parser;
use eyre::{Result, WrapErr};
use serde_json::{Map, Value};

/// Ask a series of questions on the terminal and print the answers as JSON.
#[derive(Debug, Parser)]
#[command(name = "askline", version)]
struct Cli {
    /// Prompt document (a JSON array of questions) to run instead of the demo
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Drive the prompts through the Tokio terminal
    #[arg(long = "async")]
    use_async: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("------------------------------------------------------------");
    println!("  askline  |  type `cancel` or `exit` to skip a question");
    println!("------------------------------------------------------------");

    let questions = match &cli.script {
        Some(path) => {
            let json = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read prompt document {}", path.display()))?;
            parse_questions(&json)?
        }
        None => demo_questions()?,
    };
    log::info!("asking {} question(s)", questions.len());

    let answers = if cli.use_async {
        tokio::runtime::Builder::new_current_thread()
            .build()?
            .block_on(ask_async(&questions))?
    } else {
        ask_blocking(&questions)?
    };

    println!("{}", serde_json::to_string_pretty(&Value::Object(answers))?);
    Ok(())
}

fn demo_questions() -> Result<Vec<Question>> {
    let name = StringPrompt::new(
        "Your name: ",
        StringOptions::new().validation(|s: &str| {
            if s.is_empty() {
                Verdict::from("Please type at least one character")
            } else {
                Verdict::Accepted
            }
        }),
    );

    let cups = NumberPrompt::new(
        "Cups of coffee today (0-10): ",
        NumberOptions::new()
            .range(0.0, 10.0)
            .validation(|n| n.fract() == 0.0),
    )?;

    let more = BooleanPrompt::new(
        "Another one? ",
        BooleanOptions::new()
            .accept(["sure", "always"])
            .reject(["nope"])
            .reject_msg("Answer yes or no (or sure/nope)"),
    );

    Ok(vec![
        Question { name: "name".to_string(), prompt: QuestionPrompt::String(name) },
        Question { name: "cups".to_string(), prompt: QuestionPrompt::Number(cups) },
        Question { name: "more".to_string(), prompt: QuestionPrompt::Boolean(more) },
    ])
}

fn record(answers: &mut Map<String, Value>, question: &Question, answer: Answer<Value>) -> Result<()> {
    if answer.is_cancelled() {
        log::debug!("question {} was cancelled", question.name);
    }
    answers.insert(question.name.clone(), serde_json::to_value(&answer)?);
    Ok(())
}

fn ask_blocking(questions: &[Question]) -> Result<Map<String, Value>> {
    let mut terminal = Terminal::stdio();
    let mut answers = Map::new();

    for question in questions {
        let answer = terminal.ask_question(question)?;
        record(&mut answers, question, answer)?;
    }
    Ok(answers)
}

async fn ask_async(questions: &[Question]) -> Result<Map<String, Value>> {
    let mut terminal = AsyncTerminal::stdio();
    let mut answers = Map::new();

    for question in questions {
        let answer = terminal.ask_question(question).await?;
        record(&mut answers, question, answer)?;
    }
    Ok(answers)
}
