//! End-to-end behavior of the category tabs through the public API

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pawshop::app::{AsyncCommand, AsyncResult, spawn_worker};
use pawshop::provider::CategoryProvider;
use pawshop::router::{SceneProps, SceneRenderer};
use pawshop::{
    ApiError, Banner, Category, GridLayout, Product, RouterView, ShopApi, TabRouter, Theme,
};
use ratatui::{Frame, Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

/// Records which route each render was asked to draw
#[derive(Default)]
struct Recorder {
    rendered: Vec<String>,
}

impl SceneRenderer for Recorder {
    fn render_scene(&mut self, frame: &mut Frame, area: Rect, scene: SceneProps<'_>) {
        self.rendered.push(scene.route.key.clone());
        frame.render_widget(
            ratatui::widgets::Paragraph::new(format!("scene:{}", scene.route.key)),
            area,
        );
    }
}

fn buffer_text(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(router: &TabRouter, recorder: &mut Recorder) -> String {
    let colors = Theme::default().colors();
    let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            router.render(frame, area, &colors, 0, recorder);
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

fn dogs_and_cats() -> Arc<[Category]> {
    Arc::from(vec![
        Category::new("dogs", "Dogs"),
        Category::new("cats", "Cats"),
    ])
}

#[test]
fn two_categories_become_two_tabs() {
    let mut provider = CategoryProvider::new("categories");
    let mut router = TabRouter::new();
    let mut recorder = Recorder::default();

    let ticket = provider.fetch().unwrap();
    router.update(&provider);
    assert_eq!(router.view(), &RouterView::Loading);

    provider.settle(ticket, Ok(dogs_and_cats()));
    router.update(&provider);

    let titles: Vec<_> = router.routes().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["DOGS", "CATS"]);
    assert_eq!(router.active_index(), 0);

    let screen = draw(&router, &mut recorder);
    assert!(screen.contains("DOGS"));
    assert!(screen.contains("scene:dogs"));

    assert!(router.select(1));
    let screen = draw(&router, &mut recorder);
    assert!(screen.contains("scene:cats"));
    assert_eq!(recorder.rendered, ["dogs", "cats"]);

    // tab changes never reach the provider
    assert!(!provider.in_flight());
}

#[test]
fn network_error_then_retry_shows_single_tab() {
    let mut provider = CategoryProvider::new("categories");
    let mut router = TabRouter::new();
    let mut recorder = Recorder::default();

    let ticket = provider.fetch().unwrap();
    provider.settle(ticket, Err(ApiError::Network("connection refused".into())));
    router.update(&provider);

    let RouterView::Error { message } = router.view().clone() else {
        panic!("expected the error view, got {:?}", router.view());
    };
    assert!(!message.is_empty());
    let screen = draw(&router, &mut recorder);
    assert!(screen.contains("Retry"));
    assert!(recorder.rendered.is_empty());

    let retry = router.retry(&mut provider).unwrap();
    // a second press while the retry is outstanding does nothing
    assert!(router.retry(&mut provider).is_none());

    provider.settle(retry, Ok(Arc::from(vec![Category::new("birds", "Birds")])));
    router.update(&provider);

    assert_eq!(router.routes().len(), 1);
    assert_eq!(router.routes()[0].title, "BIRDS");
    assert!(draw(&router, &mut recorder).contains("scene:birds"));
}

#[test]
fn same_collection_does_not_rebuild_routes() {
    let mut provider = CategoryProvider::new("categories");
    let mut router = TabRouter::new();

    let ticket = provider.fetch().unwrap();
    provider.settle(ticket, Ok(dogs_and_cats()));
    router.update(&provider);
    router.update(&provider);
    router.update(&provider);
    assert_eq!(router.recompute_count(), 1);

    // an equal but freshly fetched collection is a new value
    let ticket = provider.refetch().unwrap();
    provider.settle(ticket, Ok(dogs_and_cats()));
    router.update(&provider);
    assert_eq!(router.recompute_count(), 2);
}

/// Fails categories once, then answers
struct Flaky {
    calls: AtomicUsize,
}

impl ShopApi for Flaky {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ApiError::Network("offline".to_string()))
        } else {
            Ok(vec![Category::new("fish", "Fish")])
        }
    }

    async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        Ok(Vec::new())
    }

    async fn grid_layout(&self) -> Result<GridLayout, ApiError> {
        Ok(GridLayout::default())
    }

    async fn recommendations(
        &self,
        _category: Option<&str>,
        _limit: usize,
    ) -> Result<Vec<Product>, ApiError> {
        Ok(Vec::new())
    }
}

async fn round_trip(
    handle: &mut pawshop::app::AsyncHandle,
    provider: &mut CategoryProvider,
    ticket: pawshop::provider::Ticket,
) {
    handle
        .cmd_tx
        .send(AsyncCommand::FetchCategories { ticket })
        .await
        .unwrap();
    let Some(AsyncResult::Categories { ticket, result }) = handle.result_rx.recv().await else {
        panic!("expected a category result");
    };
    assert!(provider.settle(ticket, result.map(Arc::from)));
}

#[test]
fn retry_through_the_worker() {
    tokio_test::block_on(async {
        let mut handle = spawn_worker(Arc::new(Flaky {
            calls: AtomicUsize::new(0),
        }));
        let mut provider = CategoryProvider::new("categories");
        let mut router = TabRouter::new();

        let first = provider.fetch().unwrap();
        round_trip(&mut handle, &mut provider, first).await;
        router.update(&provider);
        assert!(matches!(router.view(), RouterView::Error { .. }));

        let retry = router.retry(&mut provider).unwrap();
        assert!(retry.seq() > first.seq());
        round_trip(&mut handle, &mut provider, retry).await;
        router.update(&provider);

        assert_eq!(router.routes().len(), 1);
        assert_eq!(router.routes()[0].key, "fish");
        handle.cmd_tx.send(AsyncCommand::Shutdown).await.unwrap();
    });
}
