use anyhow::Result;
use clap::{Parser, Subcommand};
use testcfg_cli::commands::run::RunCmd;

#[derive(Parser)]
#[command(name = "testcfg", author, about, long_about = None, args_conflicts_with_subcommands = true, version)]
pub struct TestcfgCli {
  #[clap(subcommand)]
  pub command: Option<TestcfgCliCommands>,

  #[clap(flatten)]
  pub run: RunCmd,
}

#[derive(Subcommand)]
pub enum TestcfgCliCommands {
  Run(RunCmd),
}

fn main() -> Result<()> {
  let args = TestcfgCli::parse();
  let command = args.command.unwrap_or(TestcfgCliCommands::Run(args.run));
  match command {
    TestcfgCliCommands::Run(cmd) => cmd.run(),
  }
}
