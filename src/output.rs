use tabled::{settings::Style, Table};

use crate::models::{PageEnvelope, RepositorySummary};

/// Stable marker for the empty state, both for the terminal and for tests.
pub const NO_DATA: &str = "No data";

/// Pure view of one page: the table, a `page of pages` indicator, and the
/// navigation hints — or the no-data marker when there are no rows. Rows
/// render in server order. The hints render whenever there are rows, even
/// on the first and last page; suppressing out-of-range navigation is the
/// controller's job, not the presenter's.
pub fn render_page(results: &[RepositorySummary], page: u32, pages: u32) -> String {
    if results.is_empty() {
        return NO_DATA.to_string();
    }

    let table = Table::new(results).with(Style::rounded()).to_string();
    format!("{}\n{} of {}\n[p]rev  [n]ext  [q]uit", table, page, pages)
}

pub fn print_page(results: &[RepositorySummary], page: u32, pages: u32) {
    println!("{}", render_page(results, page, pages));
}

pub fn print_page_json(results: &[RepositorySummary], page: u32, pages: u32) {
    let envelope = PageEnvelope {
        repositories: results.to_vec(),
        page,
        pages,
    };
    println!("{}", serde_json::to_string_pretty(&envelope).unwrap());
}
