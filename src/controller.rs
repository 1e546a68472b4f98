use tracing::{trace, warn};

use crate::github::RepoHost;
use crate::models::RepositorySummary;
use crate::query::Query;

/// Owns the submitted query, the pagination state, and the rows for the
/// current page. Every operation re-runs the full two-step fetch (profile,
/// then listing); nothing is cached between pages.
pub struct SearchController<H> {
    host: H,
    query: Option<Query>,
    page: u32,
    pages: u32,
    results: Vec<RepositorySummary>,
    generation: u64,
}

/// Result of one fetch, stamped with the generation it started under.
/// Outcomes from a superseded generation must not commit.
struct FetchOutcome {
    generation: u64,
    effect: FetchEffect,
}

enum FetchEffect {
    Loaded {
        results: Vec<RepositorySummary>,
        pages: u32,
    },
    NoRepositories,
    ProfileFailed,
    ListingFailed,
}

impl<H: RepoHost> SearchController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            query: None,
            page: 1,
            pages: 1,
            results: Vec::new(),
            generation: 0,
        }
    }

    pub fn results(&self) -> &[RepositorySummary] {
        &self.results
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Submits a new search: replaces the query, restarts at page 1, and
    /// runs the two-step fetch. API failures surface as the empty state.
    pub async fn submit(&mut self, query: Query) {
        self.query = Some(query);
        self.page = 1;
        self.refresh().await;
    }

    /// Moves back one page and refetches. No-op (no request) on page 1.
    pub async fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.refresh().await;
        }
    }

    /// Moves forward one page and refetches. No-op (no request) on the
    /// last page.
    pub async fn next_page(&mut self) {
        if self.page < self.pages {
            self.page += 1;
            self.refresh().await;
        }
    }

    async fn refresh(&mut self) {
        let Some(query) = self.query.clone() else {
            return;
        };
        self.generation += 1;
        let outcome = run_fetch(&self.host, &query, self.page, self.generation).await;
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            trace!(
                started = outcome.generation,
                current = self.generation,
                "dropping superseded fetch outcome"
            );
            return;
        }

        match outcome.effect {
            FetchEffect::Loaded { results, pages } => {
                self.results = results;
                self.pages = pages;
                // The total can shrink between fetches.
                self.page = self.page.min(self.pages);
            }
            FetchEffect::NoRepositories => {
                self.results.clear();
                self.page = 1;
                self.pages = 1;
            }
            FetchEffect::ProfileFailed => {
                self.results.clear();
            }
            FetchEffect::ListingFailed => {
                self.results.clear();
                self.page = 1;
                self.pages = 1;
            }
        }
    }
}

/// Profile first, listing only when the account has repositories. Errors
/// are logged per step and folded into the outcome; nothing propagates to
/// the caller.
async fn run_fetch<H: RepoHost>(
    host: &H,
    query: &Query,
    page: u32,
    generation: u64,
) -> FetchOutcome {
    let profile = match host.account_profile(query.account_type, &query.account).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!(account = %query.account, error = %err, "account profile fetch failed");
            return FetchOutcome {
                generation,
                effect: FetchEffect::ProfileFailed,
            };
        }
    };

    if profile.public_repos == 0 {
        return FetchOutcome {
            generation,
            effect: FetchEffect::NoRepositories,
        };
    }

    let results = match host.repositories(query, page).await {
        Ok(results) => results,
        Err(err) => {
            warn!(account = %query.account, page, error = %err, "repository listing fetch failed");
            return FetchOutcome {
                generation,
                effect: FetchEffect::ListingFailed,
            };
        }
    };

    FetchOutcome {
        generation,
        effect: FetchEffect::Loaded {
            pages: total_pages(profile.public_repos, query.per_page.count()),
            results,
        },
    }
}

fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = per_page as u64;
    let pages = (total + per_page - 1) / per_page;
    pages.max(1).min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::github::ApiError;
    use crate::models::AccountProfile;
    use crate::query::{AccountType, PageSize, RepoVisibility, SortKey};

    struct FakeHost {
        public_repos: u64,
        fail_profile: bool,
        fail_listing: bool,
        profile_calls: AtomicU32,
        listing_calls: AtomicU32,
        last_page: Mutex<Option<u32>>,
    }

    impl FakeHost {
        fn with_repos(public_repos: u64) -> Self {
            Self {
                public_repos,
                fail_profile: false,
                fail_listing: false,
                profile_calls: AtomicU32::new(0),
                listing_calls: AtomicU32::new(0),
                last_page: Mutex::new(None),
            }
        }

        fn failing_profile() -> Self {
            Self {
                fail_profile: true,
                ..Self::with_repos(0)
            }
        }

        fn failing_listing(public_repos: u64) -> Self {
            Self {
                fail_listing: true,
                ..Self::with_repos(public_repos)
            }
        }

        fn profile_calls(&self) -> u32 {
            self.profile_calls.load(Ordering::SeqCst)
        }

        fn listing_calls(&self) -> u32 {
            self.listing_calls.load(Ordering::SeqCst)
        }

        fn last_page(&self) -> Option<u32> {
            *self.last_page.lock().unwrap()
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[async_trait]
    impl RepoHost for FakeHost {
        async fn account_profile(
            &self,
            _account_type: AccountType,
            _account: &str,
        ) -> Result<AccountProfile, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_profile {
                return Err(server_error());
            }
            Ok(AccountProfile {
                public_repos: self.public_repos,
            })
        }

        async fn repositories(
            &self,
            query: &Query,
            page: u32,
        ) -> Result<Vec<RepositorySummary>, ApiError> {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_page.lock().unwrap() = Some(page);
            if self.fail_listing {
                return Err(server_error());
            }
            let rows = (0..query.per_page.count())
                .map(|i| RepositorySummary {
                    name: format!("repo-{}-{}", page, i),
                    private: false,
                    size: 42,
                })
                .collect();
            Ok(rows)
        }
    }

    fn sample_query() -> Query {
        Query {
            account: "octocat".to_string(),
            account_type: AccountType::User,
            visibility: RepoVisibility::All,
            sort: SortKey::Name,
            per_page: PageSize::Five,
        }
    }

    #[test]
    fn test_new_controller_starts_empty_on_page_one() {
        let controller = SearchController::new(FakeHost::with_repos(12));
        assert!(controller.results().is_empty());
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.pages(), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(0, 5), 1);
    }

    #[tokio::test]
    async fn test_submit_computes_page_count() {
        let mut controller = SearchController::new(FakeHost::with_repos(12));
        controller.submit(sample_query()).await;

        assert_eq!(controller.page(), 1);
        assert_eq!(controller.pages(), 3);
        assert_eq!(controller.results().len(), 5);
        assert_eq!(controller.host.last_page(), Some(1));
    }

    #[tokio::test]
    async fn test_profile_failure_clears_results_and_skips_listing() {
        let mut controller = SearchController::new(FakeHost::failing_profile());
        controller.submit(sample_query()).await;

        assert!(controller.results().is_empty());
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.host.profile_calls(), 1);
        assert_eq!(controller.host.listing_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_repositories_skips_listing() {
        let mut controller = SearchController::new(FakeHost::with_repos(0));
        controller.submit(sample_query()).await;

        assert!(controller.results().is_empty());
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.pages(), 1);
        assert_eq!(controller.host.listing_calls(), 0);
    }

    #[tokio::test]
    async fn test_listing_failure_resets_pagination() {
        let mut controller = SearchController::new(FakeHost::failing_listing(12));
        controller.submit(sample_query()).await;

        assert!(controller.results().is_empty());
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.pages(), 1);
    }

    #[tokio::test]
    async fn test_prev_on_first_page_is_a_noop() {
        let mut controller = SearchController::new(FakeHost::with_repos(12));
        controller.submit(sample_query()).await;
        assert_eq!(controller.host.profile_calls(), 1);

        controller.prev_page().await;

        assert_eq!(controller.page(), 1);
        assert_eq!(controller.host.profile_calls(), 1);
        assert_eq!(controller.host.listing_calls(), 1);
    }

    #[tokio::test]
    async fn test_next_on_last_page_is_a_noop() {
        let mut controller = SearchController::new(FakeHost::with_repos(5));
        controller.submit(sample_query()).await;
        assert_eq!(controller.pages(), 1);

        controller.next_page().await;

        assert_eq!(controller.page(), 1);
        assert_eq!(controller.host.profile_calls(), 1);
        assert_eq!(controller.host.listing_calls(), 1);
    }

    #[tokio::test]
    async fn test_next_refetches_with_the_new_page_number() {
        let mut controller = SearchController::new(FakeHost::with_repos(12));
        controller.submit(sample_query()).await;

        controller.next_page().await;

        assert_eq!(controller.page(), 2);
        assert_eq!(controller.host.last_page(), Some(2));
        assert_eq!(controller.host.listing_calls(), 2);
        assert!(controller.results()[0].name.starts_with("repo-2-"));
    }

    #[tokio::test]
    async fn test_submit_restarts_at_page_one() {
        let mut controller = SearchController::new(FakeHost::with_repos(12));
        controller.submit(sample_query()).await;
        controller.next_page().await;
        assert_eq!(controller.page(), 2);

        controller.submit(sample_query()).await;

        assert_eq!(controller.page(), 1);
        assert_eq!(controller.host.last_page(), Some(1));
    }

    #[tokio::test]
    async fn test_superseded_outcome_does_not_commit() {
        let mut controller = SearchController::new(FakeHost::with_repos(12));
        controller.submit(sample_query()).await;
        let before: Vec<_> = controller.results().to_vec();

        // An outcome from a generation older than the current one must be
        // dropped on the floor.
        let stale = FetchOutcome {
            generation: controller.generation - 1,
            effect: FetchEffect::Loaded {
                results: vec![RepositorySummary {
                    name: "stale".to_string(),
                    private: true,
                    size: 1,
                }],
                pages: 99,
            },
        };
        controller.apply(stale);

        assert_eq!(controller.results(), before.as_slice());
        assert_eq!(controller.pages(), 3);
    }
}
