//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::application::usecases::view_pr::ViewOptions;
use crate::domain::target::PrSelector;

#[derive(Debug, Parser)]
#[command(name = "prview", version)]
#[command(about = "View a pull request's comments, review threads and commits as one timeline")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// PR number, #number or PR URL (default: open PR of the current branch)
    pr: Option<String>,

    /// Repository as OWNER/NAME (default: GH_REPO or the git remote)
    #[arg(long, short = 'R')]
    repo: Option<String>,

    /// Do not fetch CI check runs for commits
    #[arg(long)]
    no_checks: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and token resolution
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    View(ViewOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    /// PR 인자 형식은 네트워크 호출 전에 검증한다.
    pub fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            None => {
                PrSelector::parse(self.pr.as_deref()).map_err(|err| err.to_string())?;

                Ok(CliAction::View(ViewOptions {
                    pr: self.pr,
                    repo: self.repo,
                    no_checks: self.no_checks,
                }))
            }
        }
    }
}
