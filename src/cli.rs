use clap::Parser;

use crate::query::{AccountType, PageSize, RepoVisibility, SortKey};

#[derive(Parser, Debug)]
#[command(name = "repo_browse")]
#[command(version, about = "Browse a GitHub account's repositories page by page")]
pub struct Args {
    /// Account name to look up
    pub account: String,

    /// Whether the account is a user or an organization
    #[arg(short = 't', long, value_enum)]
    pub account_type: Option<AccountType>,

    /// Repository filter: all, owner, or member
    #[arg(short, long, value_enum)]
    pub visibility: Option<RepoVisibility>,

    /// Sort order (append -desc for descending, e.g. updated-desc)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortKey>,

    /// Repositories per page
    #[arg(short, long, value_enum)]
    pub per_page: Option<PageSize>,

    /// Custom API base URL (overrides config)
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Print the first page as JSON and exit
    #[arg(long)]
    pub json: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
