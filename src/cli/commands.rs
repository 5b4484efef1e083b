//! Command implementations for the Chatterbox CLI.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::info;

use crate::analysis::normalizer::Normalizer;
use crate::analysis::resource::TokenizerResource;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::Corpus;
use crate::error::{ChatterboxError, Result};
use crate::responder::{evaluate_with_normalizer, initialize};
use crate::server;
use crate::session::{ChatSession, Speaker};

/// Execute a CLI command.
pub fn execute_command(args: ChatterboxArgs) -> Result<()> {
    match &args.command {
        Command::Ask(ask_args) => ask(ask_args, &args),
        Command::Chat(chat_args) => chat(chat_args, &args),
        Command::Evaluate(evaluate_args) => run_evaluation(evaluate_args, &args),
        Command::Serve(_) => serve(&args),
        Command::Setup => setup(&args),
        Command::Stats => show_stats(&args),
    }
}

/// Answer one question.
fn ask(args: &AskArgs, cli_args: &ChatterboxArgs) -> Result<()> {
    let config = cli_args.app_config()?;
    let responder = initialize(&config)?;

    let question = args.text();
    let answer = responder.get_response(&question);

    match cli_args.output_format {
        OutputFormat::Human => {
            println!("{answer}");
            Ok(())
        }
        OutputFormat::Json => output_result("Answer", &AnswerResult { question, answer }, cli_args),
    }
}

/// Interactive chat on stdin/stdout until end of input.
fn chat(args: &ChatArgs, cli_args: &ChatterboxArgs) -> Result<()> {
    let config = cli_args.app_config()?;
    let responder = initialize(&config)?;
    let mut session = ChatSession::new(config.session.capacity);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let interactive = cli_args.verbosity() > 0;

    if interactive {
        writeln!(stdout, "Chatterbox is ready. End input (Ctrl+D) to quit.")?;
    }
    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if let Some(reply) = session.exchange(&responder, &line) {
            writeln!(stdout, "{reply}")?;
        }
    }

    if args.transcript {
        writeln!(stdout)?;
        for turn in session.turns() {
            let speaker = match turn.speaker {
                Speaker::User => "you",
                Speaker::Bot => "bot",
            };
            writeln!(stdout, "[{}] {speaker}: {}", turn.at.format("%H:%M:%S"), turn.text)?;
        }
    }
    Ok(())
}

/// Hold-out evaluation.
fn run_evaluation(args: &EvaluateArgs, cli_args: &ChatterboxArgs) -> Result<()> {
    let mut config = cli_args.app_config()?;
    if let Some(test_size) = args.test_size {
        config.responder.test_size = test_size;
    }
    if let Some(seed) = args.seed {
        config.responder.seed = seed;
    }

    let normalizer = Normalizer::new(config.resource_dir.as_deref())?;
    let corpus = Corpus::from_csv_path(&config.corpus_path)?;
    let evaluation = evaluate_with_normalizer(&corpus, normalizer, &config.responder)?;

    output_result("Evaluation finished", &evaluation, cli_args)
}

/// Run the TCP service until Ctrl+C or SIGTERM.
fn serve(cli_args: &ChatterboxArgs) -> Result<()> {
    let config = cli_args.app_config()?;
    let responder = initialize(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = server::bind(&config.server).await?;
        server::serve_until(
            listener,
            responder,
            config.session.capacity,
            server::shutdown_signal(),
        )
        .await
    })?;

    info!("Server stopped");
    Ok(())
}

/// Install the tokenizer resource into the resource directory.
fn setup(cli_args: &ChatterboxArgs) -> Result<()> {
    let config = cli_args.app_config()?;
    let dir = config.resource_dir.ok_or_else(|| {
        ChatterboxError::config("no resource directory; pass --resource-dir or set CHATTERBOX_DATA")
    })?;

    let path = TokenizerResource::install(&dir)?;
    let resource = TokenizerResource::load(&path)?;

    output_result(
        "Tokenizer resource ready",
        &SetupResult {
            resource_path: path.display().to_string(),
            clitics: resource.clitics().len(),
        },
        cli_args,
    )
}

/// Train and report statistics.
fn show_stats(cli_args: &ChatterboxArgs) -> Result<()> {
    let config = cli_args.app_config()?;
    let start = Instant::now();
    let responder = initialize(&config)?;
    let training_ms = start.elapsed().as_millis() as u64;

    output_result(
        "Model statistics",
        &StatsResult {
            corpus: config.corpus_path.display().to_string(),
            model: responder.stats(),
            training_ms,
        },
        cli_args,
    )
}
