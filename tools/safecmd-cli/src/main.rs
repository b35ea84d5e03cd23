use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use safecmd_core::{escape_args, Invocation, ProgramPolicy, Runner, RunnerConfig};
use safecmd_hal::{ExecOps, PopenOps};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "safecmd")]
#[command(about = "Build and run shell commands with every argument safely quoted")]
struct Cli {
    /// TOML config file (shell, program_policy)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Shell used to interpret command strings (overrides config and SAFECMD_SHELL)
    #[arg(long, global = true)]
    shell: Option<PathBuf>,

    /// Only accept program names made of ASCII alphanumerics and `. _ / + -`
    #[arg(long, global = true)]
    strict: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the arguments quoted and joined as shell words
    Quote {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the command string without running it
    Build {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a command; the exit code mirrors the command's
    Run {
        /// Log the command instead of running it
        #[arg(long)]
        dry_run: bool,
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a command and print its standard output
    Capture {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run every invocation in a JSON or TOML file, in order
    RunFile {
        file: PathBuf,

        /// Continue after a failed invocation
        #[arg(long)]
        keep_going: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    safecmd_core::logging::init(cli.verbose);

    let config = load_config(&cli)?;
    let hal = config.hal();
    let runner = Runner::new(&hal).with_policy(config.program_policy);
    let mut stdout = io::stdout().lock();
    let code = dispatch(&runner, cli.command, &mut stdout)?;
    Ok(exit_code(code))
}

fn load_config(cli: &Cli) -> Result<RunnerConfig> {
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    }
    .with_env_overrides();
    if let Some(shell) = &cli.shell {
        config.shell = shell.clone();
    }
    if cli.strict {
        config.program_policy = ProgramPolicy::Strict;
    }
    Ok(config)
}

/// Run one subcommand and return the process exit code it should produce.
fn dispatch<E, P>(runner: &Runner<'_, E, P>, command: Commands, out: &mut impl Write) -> Result<i32>
where
    E: ExecOps + ?Sized,
    P: PopenOps + ?Sized,
{
    match command {
        Commands::Quote { args } => {
            writeln!(out, "{}", escape_args(args.as_slice()))?;
        }
        Commands::Build { program, args } => {
            writeln!(out, "{}", runner.build(&program, args.as_slice())?)?;
        }
        Commands::Run {
            dry_run,
            program,
            args,
        } => {
            if dry_run {
                let command = runner.build(&program, args.as_slice())?;
                log::info!("DRY RUN: {}", command);
                writeln!(out, "{}", command)?;
                return Ok(0);
            }
            let outcome = runner.execute(&program, args.as_slice())?;
            return Ok(process_code(outcome.success(), outcome.code()));
        }
        Commands::Capture { program, args } => {
            let outcome = runner.capture(&program, args.as_slice())?;
            match outcome.output() {
                Some(output) => out.write_all(output.as_bytes())?,
                None => anyhow::bail!("could not capture output of {}", program),
            }
        }
        Commands::RunFile { file, keep_going } => {
            let invocations = Invocation::load_file(&file)?;
            return run_all(runner, &invocations, keep_going);
        }
    }
    Ok(0)
}

fn run_all<E, P>(runner: &Runner<'_, E, P>, invocations: &[Invocation], keep_going: bool) -> Result<i32>
where
    E: ExecOps + ?Sized,
    P: PopenOps + ?Sized,
{
    let mut failures = 0usize;
    for (i, inv) in invocations.iter().enumerate() {
        let outcome = runner
            .execute_invocation(inv)
            .with_context(|| format!("invocation #{} ({})", i + 1, inv.program))?;
        if outcome.success() {
            continue;
        }
        failures += 1;
        log::warn!(
            "invocation #{} ({}) failed with exit code {}",
            i + 1,
            inv.program,
            outcome.code()
        );
        if !keep_going {
            return Ok(process_code(false, outcome.code()));
        }
    }
    if failures > 0 {
        log::warn!("{} of {} invocations failed", failures, invocations.len());
        return Ok(1);
    }
    log::info!("✅ {} invocations succeeded", invocations.len());
    Ok(0)
}

/// A failed outcome must never exit 0.
fn process_code(success: bool, code: i32) -> i32 {
    if !success && code == 0 {
        return 1;
    }
    code
}

/// Clamp a normalized code into the `u8` a process can exit with; out-of-range codes become 1.
fn exit_status_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status_byte(code))
}
