use async_trait::async_trait;

use crate::error::Result;
use crate::types::WatchedPage;

/// Page size requested from the listing endpoint.
pub const PAGE_SIZE: u8 = 100;

#[async_trait]
pub trait SubscriptionClient: Send + Sync + std::fmt::Debug {
    /// List one page (1-indexed) of the repositories the account watches.
    async fn list_watched(&self, page: u32, per_page: u8) -> Result<WatchedPage>;

    /// Stop watching `organization/repository`.
    async fn delete_subscription(&self, organization: &str, repository: &str) -> Result<()>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::SubscriptionClient;
    use crate::error::{Result, UnwatchError};
    use crate::types::{Subscription, WatchedPage};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        List(u32),
        Delete(Subscription),
    }

    /// In-memory client serving fixed pages. Deletes remove the entry so a
    /// later listing reflects them.
    #[derive(Debug, Default)]
    pub struct MockClient {
        pages: Mutex<Vec<Vec<Subscription>>>,
        last_page_hint: Option<u32>,
        failing_page: Option<u32>,
        failing_delete: Option<Subscription>,
        stuck_cursor: Option<u32>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockClient {
        pub fn with_pages(pages: Vec<Vec<Subscription>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                ..Self::default()
            }
        }

        pub fn last_page_hint(mut self, last_page: u32) -> Self {
            self.last_page_hint = Some(last_page);
            self
        }

        /// Report `next_page` as this value on every page.
        pub fn stuck_cursor(mut self, next_page: u32) -> Self {
            self.stuck_cursor = Some(next_page);
            self
        }

        pub fn failing_page(mut self, page: u32) -> Self {
            self.failing_page = Some(page);
            self
        }

        pub fn failing_delete(mut self, sub: Subscription) -> Self {
            self.failing_delete = Some(sub);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn deletes(&self) -> Vec<Subscription> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Delete(sub) => Some(sub),
                    Call::List(_) => None,
                })
                .collect()
        }

        pub fn list_calls(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, Call::List(_)))
                .count()
        }
    }

    #[async_trait]
    impl SubscriptionClient for MockClient {
        async fn list_watched(&self, page: u32, _per_page: u8) -> Result<WatchedPage> {
            self.calls.lock().unwrap().push(Call::List(page));
            if self.failing_page == Some(page) {
                return Err(UnwatchError::Api("502 Bad Gateway".into()));
            }

            let pages = self.pages.lock().unwrap();
            let total = pages.len() as u32;
            let items = pages
                .get(page.saturating_sub(1) as usize)
                .cloned()
                .unwrap_or_default();

            Ok(WatchedPage {
                items,
                next_page: self
                    .stuck_cursor
                    .or_else(|| (page < total).then_some(page + 1)),
                last_page: self.last_page_hint.or(Some(total.max(1))),
            })
        }

        async fn delete_subscription(&self, organization: &str, repository: &str) -> Result<()> {
            let sub = Subscription::new(organization, repository);
            self.calls.lock().unwrap().push(Call::Delete(sub.clone()));
            if self.failing_delete.as_ref() == Some(&sub) {
                return Err(UnwatchError::Api("404 Not Found".into()));
            }

            for page in self.pages.lock().unwrap().iter_mut() {
                page.retain(|s| s != &sub);
            }
            Ok(())
        }
    }
}
