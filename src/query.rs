use clap::ValueEnum;
use serde::Deserialize;

/// Whether the queried account is a user or an organization.
/// Selects the API path prefix for both calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    User,
    Organization,
}

impl AccountType {
    pub fn path_prefix(&self) -> &'static str {
        match self {
            AccountType::User => "users",
            AccountType::Organization => "orgs",
        }
    }
}

/// Server-side repository filter (`type` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoVisibility {
    #[default]
    All,
    Owner,
    Member,
}

impl RepoVisibility {
    pub fn api_value(&self) -> &'static str {
        match self {
            RepoVisibility::All => "all",
            RepoVisibility::Owner => "owner",
            RepoVisibility::Member => "member",
        }
    }
}

/// Sort selection as exposed to the user: four fields, each ascending
/// (plain) or descending (`-desc`). Resolves to the API's (sort, direction)
/// parameter pair; the name sorts map to the `full_name` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    Created,
    Updated,
    Pushed,
    NameDesc,
    CreatedDesc,
    UpdatedDesc,
    PushedDesc,
}

impl SortKey {
    pub fn api_field(&self) -> &'static str {
        match self {
            SortKey::Name | SortKey::NameDesc => "full_name",
            SortKey::Created | SortKey::CreatedDesc => "created",
            SortKey::Updated | SortKey::UpdatedDesc => "updated",
            SortKey::Pushed | SortKey::PushedDesc => "pushed",
        }
    }

    pub fn api_direction(&self) -> &'static str {
        match self {
            SortKey::Name | SortKey::Created | SortKey::Updated | SortKey::Pushed => "asc",
            SortKey::NameDesc | SortKey::CreatedDesc | SortKey::UpdatedDesc | SortKey::PushedDesc => {
                "desc"
            }
        }
    }
}

/// Rows requested per page. Closed set; anything else is rejected at the
/// CLI/config boundary rather than silently passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(try_from = "u32")]
pub enum PageSize {
    #[default]
    #[value(name = "5")]
    Five,
    #[value(name = "20")]
    Twenty,
    #[value(name = "100")]
    Hundred,
}

impl PageSize {
    pub fn count(&self) -> u32 {
        match self {
            PageSize::Five => 5,
            PageSize::Twenty => 20,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PageSize::Five),
            20 => Ok(PageSize::Twenty),
            100 => Ok(PageSize::Hundred),
            other => Err(format!("page size must be one of 5, 20, 100 (got {})", other)),
        }
    }
}

/// One submitted search. Fixed for the duration of a search; a new
/// submission replaces it wholesale and restarts pagination at page 1.
#[derive(Debug, Clone)]
pub struct Query {
    pub account: String,
    pub account_type: AccountType,
    pub visibility: RepoVisibility,
    pub sort: SortKey,
    pub per_page: PageSize,
}
