use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for drillscene")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests, deny, doc and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Run cargo deny check
    Deny,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Exercise the headless CLI: mesh stats and a short scripted flight
    Smoke,
}

/// One cargo invocation with a banner naming it.
struct Step {
    name: &'static str,
    args: &'static [&'static str],
}

const FMT: Step = Step {
    name: "fmt --check",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Step = Step {
    name: "clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Step = Step {
    name: "test",
    args: &["test", "--workspace"],
};
const DENY: Step = Step {
    name: "deny (licenses bans sources)",
    args: &["deny", "check", "licenses", "bans", "sources"],
};
const DOC: Step = Step {
    name: "doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const BUILD: Step = Step {
    name: "build",
    args: &["build", "--workspace"],
};
const SMOKE_MESH: Step = Step {
    name: "drillscene-cli mesh",
    args: &["run", "-q", "-p", "drillscene-cli", "--", "mesh"],
};
const SMOKE_FLY: Step = Step {
    name: "drillscene-cli fly",
    args: &[
        "run", "-q", "-p", "drillscene-cli", "--", "fly", "--frames", "3", "--turn", "15",
        "--climb", "5", "--forward",
    ],
};

fn steps(command: Commands) -> &'static [Step] {
    match command {
        Commands::Check => &[FMT, CLIPPY, TEST, DENY, DOC, SMOKE_MESH, SMOKE_FLY],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Deny => &[DENY],
        Commands::Doc => &[DOC],
        Commands::Build => &[BUILD],
        Commands::Smoke => &[SMOKE_MESH, SMOKE_FLY],
    }
}

fn run(step: &Step) -> Result<()> {
    println!("==> cargo {}", step.name);
    let status = Command::new("cargo").args(step.args).status()?;
    if !status.success() {
        bail!("cargo {} failed ({status})", step.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for step in steps(cli.command) {
        run(step)?;
    }
    Ok(())
}
