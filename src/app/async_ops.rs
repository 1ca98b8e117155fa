//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.
//! Every request runs in its own task, so results can come back in any
//! order; each carries the [`Ticket`] it was issued with and the provider
//! decides whether it still applies.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::api::{ApiError, ShopApi};
use crate::models::{Banner, Category, GridLayout, Product};
use crate::provider::Ticket;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Fetch the category collection
    FetchCategories { ticket: Ticket },
    /// Fetch home banners
    FetchBanners { ticket: Ticket },
    /// Fetch the home grid layout
    FetchLayout { ticket: Ticket },
    /// Fetch recommendations; `slug` is `None` for the home screen
    FetchRecommendations {
        slug: Option<String>,
        limit: usize,
        ticket: Ticket,
    },
    /// Abort outstanding requests and stop the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// Category request settled
    Categories {
        ticket: Ticket,
        result: Result<Vec<Category>, ApiError>,
    },
    /// Banner request settled
    Banners {
        ticket: Ticket,
        result: Result<Vec<Banner>, ApiError>,
    },
    /// Layout request settled
    Layout {
        ticket: Ticket,
        result: Result<GridLayout, ApiError>,
    },
    /// Recommendation request settled
    Recommendations {
        slug: Option<String>,
        ticket: Ticket,
        result: Result<Vec<Product>, ApiError>,
    },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles.
///
/// Must be called from within a tokio runtime.
pub fn spawn_worker<A: ShopApi>(api: Arc<A>) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    tokio::spawn(async move {
        let mut tasks = JoinSet::new();

        while let Some(cmd) = cmd_rx.recv().await {
            // reap finished requests
            while tasks.try_join_next().is_some() {}

            let api = Arc::clone(&api);
            let tx = result_tx.clone();
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::FetchCategories { ticket } => {
                    tasks.spawn(async move {
                        let result = api.categories().await;
                        let _ = tx.send(AsyncResult::Categories { ticket, result }).await;
                    });
                }
                AsyncCommand::FetchBanners { ticket } => {
                    tasks.spawn(async move {
                        let result = api.banners().await;
                        let _ = tx.send(AsyncResult::Banners { ticket, result }).await;
                    });
                }
                AsyncCommand::FetchLayout { ticket } => {
                    tasks.spawn(async move {
                        let result = api.grid_layout().await;
                        let _ = tx.send(AsyncResult::Layout { ticket, result }).await;
                    });
                }
                AsyncCommand::FetchRecommendations {
                    slug,
                    limit,
                    ticket,
                } => {
                    tasks.spawn(async move {
                        let result = api.recommendations(slug.as_deref(), limit).await;
                        let _ = tx
                            .send(AsyncResult::Recommendations {
                                slug,
                                ticket,
                                result,
                            })
                            .await;
                    });
                }
            }
        }

        tracing::debug!(outstanding = tasks.len(), "worker shutting down");
        tasks.abort_all();
    });

    AsyncHandle { cmd_tx, result_rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CategoryProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers category requests; the first one is slow
    struct SlowFirst {
        calls: AtomicUsize,
    }

    impl ShopApi for SlowFirst {
        async fn categories(&self) -> Result<Vec<Category>, ApiError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(vec![Category::new("stale", "Stale")])
            } else {
                Ok(vec![Category::new("fresh", "Fresh")])
            }
        }

        async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
            Ok(Vec::new())
        }

        async fn grid_layout(&self) -> Result<GridLayout, ApiError> {
            Err(ApiError::Server("no layout".to_string()))
        }

        async fn recommendations(
            &self,
            category: Option<&str>,
            _limit: usize,
        ) -> Result<Vec<Product>, ApiError> {
            Ok(vec![Product {
                id: "p1".to_string(),
                name: format!("for {}", category.unwrap_or("home")),
                price: 1.0,
                currency: None,
                rating: None,
                image: None,
                category: category.map(str::to_string),
            }])
        }
    }

    #[tokio::test]
    async fn test_out_of_order_results_keep_newest() {
        let mut handle = spawn_worker(Arc::new(SlowFirst {
            calls: AtomicUsize::new(0),
        }));
        let mut provider = CategoryProvider::new("categories");

        let first = provider.fetch().unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::FetchCategories { ticket: first })
            .await
            .unwrap();
        // let the first request reach the api before superseding it
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = provider.invalidate().unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::FetchCategories { ticket: second })
            .await
            .unwrap();

        for _ in 0..2 {
            let Some(AsyncResult::Categories { ticket, result }) = handle.result_rx.recv().await
            else {
                panic!("expected a category result");
            };
            provider.settle(ticket, result.map(Into::into));
        }

        let value = provider.state().value().unwrap();
        assert_eq!(value[0].slug, "fresh");
    }

    #[tokio::test]
    async fn test_recommendations_carry_slug() {
        let mut handle = spawn_worker(Arc::new(SlowFirst {
            calls: AtomicUsize::new(0),
        }));
        let mut provider = crate::provider::ProductProvider::new("products");
        let ticket = provider.fetch().unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::FetchRecommendations {
                slug: Some("dogs".to_string()),
                limit: 5,
                ticket,
            })
            .await
            .unwrap();

        match handle.result_rx.recv().await {
            Some(AsyncResult::Recommendations { slug, result, .. }) => {
                assert_eq!(slug.as_deref(), Some("dogs"));
                assert_eq!(result.unwrap()[0].name, "for dogs");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shutdown_drops_pending_results() {
        let mut handle = spawn_worker(Arc::new(SlowFirst {
            calls: AtomicUsize::new(0),
        }));
        let mut provider = CategoryProvider::new("categories");
        let ticket = provider.fetch().unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::FetchCategories { ticket })
            .await
            .unwrap();
        handle.cmd_tx.send(AsyncCommand::Shutdown).await.unwrap();

        // the slow request was aborted, so the channel closes without a result
        let got = tokio::time::timeout(Duration::from_secs(2), handle.result_rx.recv()).await;
        assert!(matches!(got, Ok(None)));
    }
}
