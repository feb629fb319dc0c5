use tracing::{debug, info, warn};

use crate::client::{SubscriptionClient, PAGE_SIZE};
use crate::error::{Result, UnwatchError};
use crate::types::Subscription;

/// Upper bound on the capacity reserved from the server's page estimate.
const MAX_PREALLOC: usize = 10_000;

/// Fetch every watched repository, sorted by organization then repository.
///
/// Any failing page aborts the whole fetch; rows from earlier pages are
/// dropped.
pub async fn fetch_subscriptions(client: &dyn SubscriptionClient) -> Result<Vec<Subscription>> {
    let mut subs: Option<Vec<Subscription>> = None;
    let mut page = 1;

    loop {
        let result = client
            .list_watched(page, PAGE_SIZE)
            .await
            .map_err(|source| UnwatchError::FetchPage {
                page,
                source: Box::new(source),
            })?;
        debug!(page, count = result.items.len(), next = ?result.next_page, "fetched page");

        let subs = subs.get_or_insert_with(|| {
            let hint = result.last_page.unwrap_or(1) as usize * PAGE_SIZE as usize;
            Vec::with_capacity(hint.min(MAX_PREALLOC))
        });
        subs.extend(result.items);

        match result.next_page {
            None | Some(0) => break,
            Some(next) if next <= page => {
                warn!(page, next, "pagination cursor did not advance, stopping");
                break;
            }
            Some(next) => page = next,
        }
    }

    let mut subs = subs.unwrap_or_default();
    subs.sort();
    info!(count = subs.len(), "loaded subscriptions");
    Ok(subs)
}
