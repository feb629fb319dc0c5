use tracing::{debug, info};

use crate::client::SubscriptionClient;
use crate::error::{Result, UnwatchError};
use crate::fetch::fetch_subscriptions;
use crate::types::Subscription;

/// Unwatch `selected` one at a time, then re-fetch the full listing.
///
/// Stops at the first failed delete. Earlier deletes have already taken
/// effect on the server and are not rolled back.
pub async fn unwatch_and_refresh(
    client: &dyn SubscriptionClient,
    selected: &[Subscription],
) -> Result<Vec<Subscription>> {
    for sub in selected {
        client
            .delete_subscription(&sub.organization, &sub.repository)
            .await
            .map_err(|source| UnwatchError::Delete {
                organization: sub.organization.clone(),
                repository: sub.repository.clone(),
                source: Box::new(source),
            })?;
        debug!(%sub, "unwatched");
    }
    info!(count = selected.len(), "unwatched subscriptions, refreshing");

    fetch_subscriptions(client).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockClient};

    fn sub(org: &str, repo: &str) -> Subscription {
        Subscription::new(org, repo)
    }

    fn listing() -> Vec<Vec<Subscription>> {
        vec![vec![
            sub("acme", "gadgets"),
            sub("acme", "widgets"),
            sub("beta", "one"),
            sub("zeta", "tools"),
        ]]
    }

    #[tokio::test]
    async fn deletes_in_selection_order_then_refreshes() {
        let client = MockClient::with_pages(listing());
        let selected = vec![sub("zeta", "tools"), sub("acme", "gadgets")];

        let subs = unwatch_and_refresh(&client, &selected).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![
                Call::Delete(sub("zeta", "tools")),
                Call::Delete(sub("acme", "gadgets")),
                Call::List(1),
            ]
        );
        assert_eq!(subs, vec![sub("acme", "widgets"), sub("beta", "one")]);
    }

    #[tokio::test]
    async fn empty_selection_only_refreshes() {
        let client = MockClient::with_pages(listing());

        let subs = unwatch_and_refresh(&client, &[]).await.unwrap();

        assert!(client.deletes().is_empty());
        assert_eq!(client.list_calls(), 1);
        assert_eq!(subs.len(), 4);
    }

    #[tokio::test]
    async fn stops_at_first_failed_delete() {
        let selected = vec![
            sub("acme", "gadgets"),
            sub("acme", "widgets"),
            sub("beta", "one"),
            sub("zeta", "tools"),
        ];
        let client = MockClient::with_pages(listing()).failing_delete(sub("beta", "one"));

        let err = unwatch_and_refresh(&client, &selected).await.unwrap_err();

        // k = 3: the two before it were issued, the failing one was attempted,
        // nothing after it and no refresh.
        assert_eq!(client.deletes(), selected[..3].to_vec());
        assert_eq!(client.list_calls(), 0);
        match err {
            UnwatchError::Delete {
                organization,
                repository,
                source,
            } => {
                assert_eq!(organization, "beta");
                assert_eq!(repository, "one");
                assert!(matches!(*source, UnwatchError::Api(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn error_message_names_the_failing_pair() {
        let client = MockClient::with_pages(listing()).failing_delete(sub("acme", "gadgets"));

        let err = unwatch_and_refresh(&client, &[sub("acme", "gadgets")])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "unwatching acme/gadgets: API error: 404 Not Found"
        );
    }

    #[tokio::test]
    async fn refresh_failure_is_reported() {
        let client = MockClient::with_pages(listing()).failing_page(1);

        let err = unwatch_and_refresh(&client, &[sub("acme", "gadgets")])
            .await
            .unwrap_err();

        assert_eq!(client.deletes(), vec![sub("acme", "gadgets")]);
        assert!(matches!(err, UnwatchError::FetchPage { page: 1, .. }));
    }
}
