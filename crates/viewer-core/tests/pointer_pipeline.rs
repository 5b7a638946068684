//! Integration tests for the pure pointer and session rules.
//!
//! These tests chain the public `viewer_core` functions the way the viewer
//! controller does for every pointer event and state notification.

use viewer_core::{
    auto_scroll_delta, scale_to_remote, session_id_from_query, view_relative_position, Keysym,
    Point, PointerState, ScaleFactor, SessionState, Size, ThumbnailStore, TitleContext,
    ViewportMetrics,
};

fn viewport(scroll_x: f64, scroll_y: f64) -> ViewportMetrics {
    ViewportMetrics {
        width: 800.0,
        height: 600.0,
        scroll_x,
        scroll_y,
    }
}

// ── Pointer pipeline ──────────────────────────────────────────────────────────

#[test]
fn test_positions_strictly_inside_viewport_never_scroll() {
    let vp = viewport(120.0, 40.0);
    for x in [1.0, 200.0, 799.0] {
        for y in [1.0, 300.0, 599.0] {
            let local = Point::new(x + vp.scroll_x, y + vp.scroll_y);
            let rel = view_relative_position(local, Point::default(), &vp);
            assert_eq!(auto_scroll_delta(rel, &vp), Point::default(), "at ({x}, {y})");
        }
    }
}

#[test]
fn test_overshoot_on_each_axis_scrolls_independently() {
    // Arrange
    let vp = viewport(0.0, 100.0);
    let offset = Point::new(20.0, 0.0);

    // Act: x lands at 830 (30 past), y at 50 - 100 = -50.
    let rel = view_relative_position(Point::new(810.0, 50.0), offset, &vp);
    let delta = auto_scroll_delta(rel, &vp);

    // Assert
    assert_eq!(delta, Point::new(30.0, -50.0));
}

#[test]
fn test_fit_scale_then_pointer_maps_back_to_remote_pixels() {
    // Arrange: a 1600x1200 display fitted into an 800x600 window → 0.5.
    let scale = ScaleFactor::fit_to_window(Size::new(800.0, 600.0), 1600, 1200).unwrap();
    let on_screen = PointerState {
        right: true,
        ..PointerState::at(400.0, 300.0)
    };

    // Act
    let remote = scale_to_remote(on_screen, scale);

    // Assert: the centre of the window is the centre of the remote display.
    assert_eq!((remote.x, remote.y), (800.0, 600.0));
    assert!(remote.right);
}

#[test]
fn test_identity_scale_forwards_position_exactly() {
    let state = PointerState::at(123.456, 78.9);
    assert_eq!(scale_to_remote(state, ScaleFactor::IDENTITY), state);
}

// ── Session rules ─────────────────────────────────────────────────────────────

#[test]
fn test_state_sequence_drives_title() {
    // Arrange
    let mut title = TitleContext::new(Some("Lab1".to_string()));

    // Act / Assert
    title.apply_prefix(SessionState::from_code(1).title_prefix());
    assert_eq!(title.title().as_deref(), Some("[Connecting...] Lab1"));

    title.apply_prefix(SessionState::from_code(3).title_prefix());
    assert_eq!(title.title().as_deref(), Some("Lab1"));

    title.apply_prefix(SessionState::from_code(5).title_prefix());
    assert_eq!(title.title().as_deref(), Some("[Disconnected] Lab1"));
}

#[test]
fn test_thumbnail_store_keyed_by_query_session_id() {
    // Arrange
    let id = session_id_from_query("?id=desk%2F1");
    let mut store = ThumbnailStore::from_persisted(Some(r#"{"other":"data:x"}"#));

    // Act
    store.upsert(id, "data:y");
    let reloaded = ThumbnailStore::from_persisted(Some(&store.to_json().unwrap()));

    // Assert
    assert_eq!(reloaded.get("desk/1"), Some("data:y"));
    assert_eq!(reloaded.get("other"), Some("data:x"));
}

#[test]
fn test_composed_characters_map_to_keysyms() {
    let keysyms: Vec<Keysym> = "A€".chars().map(Keysym::from_char).collect();
    assert_eq!(keysyms, vec![Keysym(0x41), Keysym(0x0100_20AC)]);
    assert_eq!(Keysym::from_code_point(0xD800), Keysym::QUESTION);
}
