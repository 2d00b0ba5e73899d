use std::sync::Arc;

use dashboard::{reducer, Action, AppState, DashboardConfig, DashboardView, User, ViewMsg};
use dashboard_core::testing::{drain, RenderHarness};
use dashboard_core::{FormBuilder, Store};
use tokio::sync::mpsc;

/// The store is returned so its state outlives the view's subscription
fn view_for(
    state: AppState,
) -> (
    DashboardView,
    mpsc::UnboundedReceiver<ViewMsg>,
    Store<AppState, Action>,
) {
    let (action_tx, _action_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = mpsc::unbounded_channel();
    let store = Store::new(state, reducer);
    let view = DashboardView::new(
        DashboardConfig::default(),
        store.handle(action_tx),
        &FormBuilder::new(),
        view_tx,
    );
    (view, view_rx, store)
}

async fn settle(view: &mut DashboardView, rx: &mut mpsc::UnboundedReceiver<ViewMsg>) {
    for _ in 0..4 {
        tokio::task::yield_now().await;
        for msg in drain(rx) {
            view.apply(msg);
        }
    }
}

fn render(view: &mut DashboardView) -> String {
    let mut render = RenderHarness::new(100, 30);
    render.render_to_string_plain(|frame| view.render(frame, frame.area()))
}

#[tokio::test]
async fn test_render_signed_in() {
    let ada = User {
        id: 1,
        name: "Ada".into(),
        email: "ada@example.com".into(),
    };
    let (mut view, mut rx, _store) = view_for(AppState::signed_in(ada));
    settle(&mut view, &mut rx).await;
    view.initialize().unwrap();

    let output = render(&mut view);

    assert!(output.contains("Signed in as Ada <ada@example.com> #1"));
    assert!(output.contains("Enter your name"));
    assert!(output.contains("Images (5)"));
    assert!(output.contains("img2.png  Description 2"));
    assert!(output.contains("Featured"));
    assert!(output.contains("Loading..."));
}

#[tokio::test]
async fn test_render_signed_out() {
    let (mut view, mut rx, _store) = view_for(AppState::default());
    settle(&mut view, &mut rx).await;

    let output = render(&mut view);

    assert!(output.contains("Signed out"));
}

#[tokio::test]
async fn test_render_subscribed_strip() {
    let (mut view, _rx, _store) = view_for(AppState::default());

    view.apply(ViewMsg::SubscribedImagesDidLoad);
    view.add_random_image().unwrap();
    let output = render(&mut view);

    assert!(output.contains("Subscribed (6)"));
    assert!(!output.contains("Loading..."));
}

#[tokio::test]
async fn test_render_gallery_caption() {
    let (mut view, _rx, _store) = view_for(AppState::default());
    let second = Arc::clone(&view.images()[1]);

    view.open_image_modal(&second).unwrap();
    let output = render(&mut view);

    assert!(output.contains("Look this image 2 of 5 => Description 2"));
}
