mod cli;
mod config;
mod controller;
mod github;
mod models;
mod output;
mod pager;
mod query;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use controller::SearchController;
use github::GithubApi;
use query::Query;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = cli::parse();
    let config = Config::load()?;

    // Resolve each field: CLI > config > built-in default
    let query = Query {
        account: args.account,
        account_type: args
            .account_type
            .or(config.defaults.account_type)
            .unwrap_or_default(),
        visibility: args
            .visibility
            .or(config.defaults.visibility)
            .unwrap_or_default(),
        sort: args.sort.or(config.defaults.sort).unwrap_or_default(),
        per_page: args
            .per_page
            .or(config.defaults.per_page)
            .unwrap_or_default(),
    };

    let api_url = args
        .url
        .or(config.github.url)
        .unwrap_or_else(|| github::DEFAULT_API_URL.to_string());

    let host = GithubApi::new(api_url, config.github.token);
    let mut controller = SearchController::new(host);

    controller.submit(query).await;

    if args.json {
        output::print_page_json(controller.results(), controller.page(), controller.pages());
        return Ok(());
    }

    output::print_page(controller.results(), controller.page(), controller.pages());
    pager::run(&mut controller).await
}
