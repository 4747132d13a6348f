use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use palindrome_machine::trace::{
    PauseController, PauseDecision, PauseMode, StateLabel, StatusLineSink, TextFrameSink,
};
use palindrome_machine::{
    util, MachineConfig, MachineError, PalindromeMachine, RejectReason, RunReport,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TITLE: &str = "Turing Machine: produce smallest palindrome with given prefix";
const ALPHABET_HINT: &str = "Input alphabet: lowercase letters (a..z). Example: abc";

#[derive(Parser, Debug)]
#[command(
    name = "palindrome-machine",
    about = "Extend a word into its shortest palindrome on a traced tape machine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the tape machine, writing every step to a trace file.
    Run {
        /// Input prefix (lowercase letters). Prompted for when omitted.
        input: Option<String>,
        /// Run to completion without pausing.
        #[arg(long, conflicts_with = "step")]
        auto: bool,
        /// Pause after every step (Enter = next, `a` = switch to automatic).
        #[arg(long)]
        step: bool,
        /// File receiving the full tape frames.
        #[arg(long, default_value = "output.txt")]
        trace_file: PathBuf,
        /// Longest accepted input.
        #[arg(long, default_value_t = MachineConfig::DEFAULT_MAX_INPUT)]
        max_input: usize,
        /// Cells shown on each side of the regions in a frame.
        #[arg(long, default_value_t = MachineConfig::DEFAULT_WINDOW_MARGIN)]
        window_margin: usize,
        /// Suppress the per-step status line on stdout.
        #[arg(long)]
        quiet: bool,
        /// Additionally write the trace as JSON lines.
        #[cfg(feature = "visualize")]
        #[arg(long)]
        json_trace: Option<PathBuf>,
    },
    /// Print the shortest palindrome directly, without simulating the tape.
    Solve {
        /// Input prefix (lowercase letters).
        input: String,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            auto,
            step,
            trace_file,
            max_input,
            window_margin,
            quiet,
            #[cfg(feature = "visualize")]
            json_trace,
        } => {
            let config = MachineConfig::default()
                .with_max_input(max_input)
                .with_window_margin(window_margin);
            let options = RunOptions {
                input,
                mode: if auto {
                    Some(PauseMode::Automatic)
                } else if step {
                    Some(PauseMode::Stepping)
                } else {
                    None
                },
                trace_file,
                quiet,
                #[cfg(feature = "visualize")]
                json_trace,
            };
            run_machine(config, options)?
        }
        Commands::Solve { input } => run_solve(&input)?,
    }

    Ok(())
}

/// Diagnostics go to stderr via `RUST_LOG` (default `warn`); the machine
/// trace itself goes to the trace file.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

struct RunOptions {
    input: Option<String>,
    mode: Option<PauseMode>,
    trace_file: PathBuf,
    quiet: bool,
    #[cfg(feature = "visualize")]
    json_trace: Option<PathBuf>,
}

fn run_machine(config: MachineConfig, options: RunOptions) -> Result<()> {
    let file = File::create(&options.trace_file).with_context(|| {
        format!(
            "failed to open {} for writing",
            options.trace_file.display()
        )
    })?;
    let mut frames = TextFrameSink::new(BufWriter::new(file));
    let trace_name = options.trace_file.display().to_string();

    println!("{TITLE}");
    println!("All TM trace output will be written to '{trace_name}'.");
    println!("{ALPHABET_HINT}");
    writeln!(frames.get_mut(), "{TITLE}")?;
    writeln!(frames.get_mut(), "{ALPHABET_HINT}")?;

    let stdin = io::stdin();
    let input = match options.input {
        Some(input) => input,
        None => {
            prompt("Enter input prefix: ")?;
            match read_token(&mut stdin.lock())? {
                Some(token) => token,
                None => return Ok(()),
            }
        }
    };

    let mode = match options.mode {
        Some(mode) => mode,
        None => {
            prompt("Run interactively? (y = step-by-step, n = automatic): ")?;
            writeln!(
                frames.get_mut(),
                "[PROMPT] Run interactively? (y = step-by-step, n = automatic) [y]"
            )?;
            let answer = read_line(&mut stdin.lock())?.unwrap_or_default();
            if answer.trim_start().starts_with(['n', 'N']) {
                PauseMode::Automatic
            } else {
                PauseMode::Stepping
            }
        }
    };
    writeln!(
        frames.get_mut(),
        "[CHOICE] interactive_mode={}",
        u8::from(mode == PauseMode::Stepping)
    )?;

    let machine = PalindromeMachine::new(config.with_pause_mode(mode))
        .context("invalid machine configuration")?;

    let status = (!options.quiet).then(|| {
        StatusLineSink::new(io::stdout()).with_note(format!("see {trace_name} for full tape"))
    });
    #[cfg(feature = "visualize")]
    let json = match &options.json_trace {
        Some(path) => Some(palindrome_machine::trace::JsonLinesSink::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ))),
        None => None,
    };
    #[cfg(not(feature = "visualize"))]
    let json: Option<palindrome_machine::trace::NullSink> = None;

    let mut pause = StdinPause;
    let outcome = {
        let mut sinks = (&mut frames, (status, json));
        machine.run(&input, &mut sinks, &mut pause)
    };

    let out = frames.get_mut();
    match outcome {
        Ok(report) => print_report(out, &report)?,
        Err(MachineError::InputRejected(reason)) => {
            let message = match &reason {
                RejectReason::Empty => "Empty input -> empty palindrome".to_string(),
                RejectReason::TooLong { .. } => "Input too long".to_string(),
                other => format!("Input rejected: {other}"),
            };
            println!("{message}");
            writeln!(out, "{message}")?;
        }
        Err(err) => {
            writeln!(out, "Error: {err}")?;
            out.flush()?;
            return Err(err).context("machine aborted");
        }
    }
    out.flush()?;
    Ok(())
}

fn print_report(out: &mut impl Write, report: &RunReport) -> Result<()> {
    if report.already_palindrome {
        println!("\nInput is already a palindrome. Result: {}", report.palindrome);
        writeln!(out, "\nInput is already a palindrome. Result: {}", report.palindrome)?;
        return Ok(());
    }

    writeln!(
        out,
        "\nTM halted. Final tape content (from input start to copy end):"
    )?;
    writeln!(out, "{}", report.tape_span)?;
    writeln!(out, "Shortest palindrome: {}", report.palindrome)?;
    writeln!(
        out,
        "Total TM steps (simulated head actions + labeled actions): {}",
        report.steps
    )?;

    println!("\nTM halted. Shortest palindrome with prefix '{}':", report.input);
    println!("{}", report.palindrome);
    println!("Total TM steps: {}", report.steps);
    Ok(())
}

fn run_solve(input: &str) -> Result<()> {
    let machine = PalindromeMachine::new(MachineConfig::default())?;
    machine
        .check_input(input)
        .map_err(MachineError::InputRejected)
        .with_context(|| format!("cannot solve for '{input}'"))?;
    println!("{}", util::shortest_palindrome(input));
    Ok(())
}

/// Terminal pause: Enter keeps stepping, `a` switches to automatic.
///
/// End of input also switches to automatic so a closed stdin cannot stall
/// the run.
#[derive(Debug)]
struct StdinPause;

impl PauseController for StdinPause {
    fn decide(&mut self, _step: u64, _state: StateLabel) -> PauseDecision {
        if prompt("Press Enter for next action (type 'a' then Enter to run automatic): ").is_err() {
            return PauseDecision::SwitchToAutomatic;
        }
        match read_line(&mut io::stdin().lock()) {
            Ok(Some(line)) if line.starts_with(['a', 'A']) => PauseDecision::SwitchToAutomatic,
            Ok(Some(_)) => PauseDecision::Continue,
            Ok(None) | Err(_) => PauseDecision::SwitchToAutomatic,
        }
    }
}

fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// First whitespace-delimited token of the next non-empty line
fn read_token(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    while let Some(line) = read_line(reader)? {
        if let Some(token) = line.split_whitespace().next() {
            return Ok(Some(token.to_string()));
        }
    }
    Ok(None)
}
