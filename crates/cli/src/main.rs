use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use clap_complete::env::{CompleteEnv, EnvCompleter, Shells};
use konf_cli::command::{complete_set, Selection, SetCommand};
use konf_cli::config::{resolve_konf_dir, KonfSettings};
use konf_picker::TerminalPrompt;
use konf_store::{KonfLayout, OsFs, ScopeKey};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;

/// Environment variable that switches the binary into completion mode.
const COMPLETE_VAR: &str = "COMPLETE";

#[derive(Parser)]
#[command(name = "konf")]
#[command(about = "Switch kubeconfigs per shell session", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding the konf store (default: ~/.kube/konfs)
    #[arg(long, global = true, env = "KONF_DIR")]
    konf_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set kubeconfig to use in current shell
    #[command(long_about = "Sets kubeconfig to use or starts the picker dialogue.

Examples:
  konf set               run konf selection
  konf set <konf id>     set a specific konf
  konf set -             set to last used konf")]
    Set(SetArgs),

    /// Print a shell completion script
    #[command(long_about = "Prints the completion script for SHELL.

The script calls back into konf, so `konf set <TAB>` offers the konf ids of the store.

Examples:
  source <(konf completion bash)
  konf completion fish > ~/.config/fish/completions/konf.fish")]
    Completion(CompletionArgs),

    /// List konf ids for completing `konf set`
    #[command(name = "complete-set", hide = true)]
    CompleteSet(CompleteSetArgs),
}

#[derive(Args)]
struct SetArgs {
    /// Konf id (<context>_<cluster>), or '-' for the last used konf
    #[arg(value_name = "KONF_ID", add = ArgValueCompleter::new(complete_konf_id))]
    id: Option<String>,
}

#[derive(Args)]
struct CompletionArgs {
    #[arg(value_parser = ["bash", "elvish", "fish", "powershell", "zsh"])]
    shell: String,
}

#[derive(Args)]
struct CompleteSetArgs {
    /// Partial id typed so far. Accepted for the shell's sake and ignored: every id is
    /// printed and the shell does the prefix filtering.
    #[arg(default_value = "")]
    partial: String,
}

fn main() -> Result<()> {
    // answers completion requests from the registered script, then exits
    CompleteEnv::with_factory(Cli::command)
        .var(COMPLETE_VAR)
        .complete();

    let mut cli = Cli::parse();

    // completion output must stay clean even with RUST_LOG set
    if matches!(cli.command, Commands::CompleteSet(_)) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Set(args) => run_set(cli.konf_dir, args)?,
        Commands::Completion(args) => print_completion_script(&args.shell)?,
        Commands::CompleteSet(args) => run_complete_set(cli.konf_dir, args)?,
    }

    Ok(())
}

fn run_set(konf_dir: Option<PathBuf>, args: SetArgs) -> Result<()> {
    let konf_dir = resolve_konf_dir(konf_dir)?;
    let options = KonfSettings::load(&OsFs, &konf_dir)?.picker_options()?;
    let command = SetCommand::new(
        OsFs,
        KonfLayout::new(konf_dir),
        ScopeKey::from_parent_process(),
        options,
    );

    let mut stdout = io::stdout().lock();
    command.run(
        Selection::from_arg(args.id.as_deref()),
        &mut TerminalPrompt::stderr(),
        &mut stdout,
    )?;
    Ok(())
}

fn run_complete_set(konf_dir: Option<PathBuf>, args: CompleteSetArgs) -> Result<()> {
    let layout = KonfLayout::new(resolve_konf_dir(konf_dir)?);
    log::debug!("Completing konf id from {:?}", args.partial);

    let mut stdout = io::stdout().lock();
    for id in complete_set(&OsFs, &layout)? {
        writeln!(stdout, "{id}").context("Failed to write completions")?;
    }
    Ok(())
}

fn print_completion_script(shell: &str) -> Result<()> {
    let shells = Shells::builtins();
    let completer = shells
        .completer(shell)
        .with_context(|| format!("Unsupported shell {shell:?}"))?;
    let name = Cli::command().get_name().to_string();

    let mut stdout = io::stdout().lock();
    completer
        .write_registration(COMPLETE_VAR, &name, &name, &name, &mut stdout)
        .context("Failed to write completion script")?;
    Ok(())
}

/// Value completer for `konf set`: store ids starting with what was typed so far.
///
/// Runs inside the completion request, so only `KONF_DIR` and the default konf dir are
/// honoured. Errors yield no candidates rather than noise on the prompt.
fn complete_konf_id(current: &OsStr) -> Vec<CompletionCandidate> {
    let Some(current) = current.to_str() else {
        return Vec::new();
    };
    let Ok(konf_dir) = resolve_konf_dir(std::env::var_os("KONF_DIR").map(PathBuf::from)) else {
        return Vec::new();
    };

    complete_set(&OsFs, &KonfLayout::new(konf_dir))
        .unwrap_or_default()
        .into_iter()
        .filter(|id| id.starts_with(current))
        .map(CompletionCandidate::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dash_is_taken_as_konf_id() {
        let cli = Cli::try_parse_from(["konf", "set", "-"]).unwrap();
        match cli.command {
            Commands::Set(args) => assert_eq!(args.id.as_deref(), Some("-")),
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn completion_accepts_builtin_shells_only() {
        assert!(Cli::try_parse_from(["konf", "completion", "zsh"]).is_ok());
        assert!(Cli::try_parse_from(["konf", "completion", "tcsh"]).is_err());
    }
}
