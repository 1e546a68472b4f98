use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One repository row as returned by the listing endpoint. Held only for
/// the currently displayed page; replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct RepositorySummary {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Private")]
    #[tabled(display_with = "display_bool")]
    pub private: bool,
    #[tabled(rename = "Size (KB)")]
    pub size: u64,
}

fn display_bool(b: &bool) -> String {
    if *b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// Account profile, reduced to the one field the pager needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountProfile {
    pub public_repos: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageEnvelope {
    pub repositories: Vec<RepositorySummary>,
    pub page: u32,
    pub pages: u32,
}
