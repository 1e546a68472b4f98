use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::controller::SearchController;
use crate::github::RepoHost;
use crate::output;

/// Interactive prev/next session over an already-submitted search. Reads
/// one command per line from stdin; EOF ends the session.
pub async fn run<H: RepoHost>(controller: &mut SearchController<H>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "n" | "next" => {
                controller.next_page().await;
                output::print_page(controller.results(), controller.page(), controller.pages());
            }
            "p" | "prev" => {
                controller.prev_page().await;
                output::print_page(controller.results(), controller.page(), controller.pages());
            }
            "q" | "quit" | "exit" => break,
            other => {
                println!("Unknown command '{}'. Use n, p, or q.", other);
            }
        }
    }

    Ok(())
}
