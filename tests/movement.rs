//! Pointer movement and native input tests against a recording input device.

mod common;

use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use common::{native, FakeInput};
use deskpilot::{
    AutomationError, Clipboard, ClipboardActionProvider, KeyCode, Keyboard, LineHelper, Mouse,
    MovementApi, MovementType, NativeAdapter, Point,
};

// ============================================================================
// MovementApi
// ============================================================================

#[tokio::test]
async fn straight_to_walks_a_horizontal_line() {
    let input = Arc::new(FakeInput::default());
    let movement = MovementApi::new(native(&input));

    movement
        .straight_to(Point::new(10.0, 0.0))
        .execute()
        .await
        .unwrap();

    let placements = input.placements();
    assert_eq!(placements.len(), 10);
    assert_eq!(*placements.last().unwrap(), Point::new(10.0, 0.0));
    assert!(placements.windows(2).all(|w| w[0].x <= w[1].x));
    assert!(placements.iter().all(|p| p.y == 0.0));
    assert_eq!(*input.position.lock().unwrap(), Point::new(10.0, 0.0));
}

#[tokio::test]
async fn action_can_be_reused_from_another_start() {
    let input = Arc::new(FakeInput::at(0.0, 0.0));
    let movement = MovementApi::new(native(&input));
    let action = movement.straight_to(Point::new(20.0, 20.0));

    action.execute().await.unwrap();
    *input.position.lock().unwrap() = Point::new(20.0, 50.0);
    input.placements.lock().unwrap().clear();
    action.execute().await.unwrap();

    let placements = input.placements();
    assert_eq!(placements.len(), 30);
    assert_eq!(*placements.last().unwrap(), Point::new(20.0, 20.0));
    assert!(placements.iter().all(|p| p.x == 20.0));
}

#[tokio::test]
async fn directional_moves_resolve_at_execution_time() {
    let input = Arc::new(FakeInput::at(100.0, 100.0));
    let movement = MovementApi::new(native(&input));
    let down = movement.down(50.0);

    *input.position.lock().unwrap() = Point::new(10.0, 10.0);
    down.execute().await.unwrap();
    assert_eq!(*input.position.lock().unwrap(), Point::new(10.0, 60.0));

    movement.up(20.0).execute().await.unwrap();
    movement.left(5.0).execute().await.unwrap();
    movement.right(15.0).execute().await.unwrap();
    assert_eq!(*input.position.lock().unwrap(), Point::new(20.0, 40.0));
}

#[tokio::test]
async fn path_does_not_move_the_pointer() {
    let input = Arc::new(FakeInput::at(5.0, 5.0));
    let movement = MovementApi::new(native(&input));

    let path = movement.right(4.0).path().await.unwrap();

    assert_eq!(
        path,
        vec![
            Point::new(6.0, 5.0),
            Point::new(7.0, 5.0),
            Point::new(8.0, 5.0),
            Point::new(9.0, 5.0),
        ]
    );
    assert!(input.placements().is_empty());
}

#[tokio::test]
async fn zero_length_move_places_destination_once() {
    let input = Arc::new(FakeInput::at(3.0, 4.0));
    let movement = MovementApi::new(native(&input));

    movement
        .straight_to(Point::new(3.0, 4.0))
        .execute()
        .await
        .unwrap();

    assert_eq!(input.placements(), vec![Point::new(3.0, 4.0)]);
}

#[tokio::test]
async fn coarser_sampling_and_easing_keep_the_endpoint() {
    let input = Arc::new(FakeInput::default());
    let movement = MovementApi::new(native(&input))
        .with_line_helper(LineHelper::new().with_pixels_per_step(10.0))
        .with_movement_type(MovementType::EaseInOut);

    movement
        .straight_to(Point::new(100.0, 0.0))
        .execute()
        .await
        .unwrap();

    let placements = input.placements();
    assert_eq!(placements.len(), 10);
    assert_eq!(*placements.last().unwrap(), Point::new(100.0, 0.0));
    assert!(placements.windows(2).all(|w| w[0].x <= w[1].x));
}

#[tokio::test(start_paused = true)]
async fn step_delay_spaces_placements() {
    let input = Arc::new(FakeInput::default());
    let movement = MovementApi::new(native(&input)).with_step_delay(Duration::from_millis(10));
    let started = Instant::now();

    movement.right(5.0).execute().await.unwrap();

    assert_eq!(input.placements().len(), 5);
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[tokio::test]
async fn placement_failure_stops_the_move() {
    let input = Arc::new(FakeInput {
        fail_after: Some(3),
        ..FakeInput::default()
    });
    let movement = MovementApi::new(native(&input));

    let err = movement.right(10.0).execute().await.unwrap_err();

    assert!(matches!(err, AutomationError::Io { .. }));
    assert!(err.to_string().contains("pointer stuck"));
    assert_eq!(input.placements().len(), 3);
}

// ============================================================================
// Mouse
// ============================================================================

#[tokio::test(start_paused = true)]
async fn mouse_follows_movement_action() {
    let input = Arc::new(FakeInput::default());
    let native = native(&input);
    let movement = MovementApi::new(Arc::clone(&native));
    let mouse = Mouse::new(native);

    mouse
        .move_to(&movement.straight_to(Point::new(0.0, 8.0)))
        .await
        .unwrap();

    assert_eq!(input.placements().len(), 8);
    assert_eq!(mouse.position().await.unwrap(), Point::new(0.0, 8.0));
}

#[tokio::test(start_paused = true)]
async fn drag_releases_button_even_when_move_fails() {
    let input = Arc::new(FakeInput {
        fail_after: Some(1),
        ..FakeInput::default()
    });
    let mouse = Mouse::new(native(&input));

    let err = mouse
        .drag(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("pointer stuck"));
    assert_eq!(input.events(), vec!["press Left", "release Left"]);
}

#[tokio::test]
async fn clicks_and_scrolls_reach_the_device() {
    let input = Arc::new(FakeInput::default());
    let mouse = Mouse::new(native(&input));

    mouse.right_click().await.unwrap();
    mouse.scroll_up(3).await.unwrap();
    mouse.scroll_right(2).await.unwrap();

    assert_eq!(
        input.events(),
        vec!["press Right", "release Right", "scroll 0 -3", "scroll 2 0"]
    );
}

// ============================================================================
// Keyboard
// ============================================================================

#[tokio::test]
async fn key_combinations_release_in_reverse() {
    let input = Arc::new(FakeInput::default());
    let keyboard = Keyboard::new(native(&input));

    keyboard
        .tap(&[KeyCode::Control, KeyCode::Shift, KeyCode::Char('s')])
        .await
        .unwrap();

    assert_eq!(
        input.events(),
        vec![
            "down Control",
            "down Shift",
            "down Char('s')",
            "up Char('s')",
            "up Shift",
            "up Control",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn type_delay_types_character_by_character() {
    let input = Arc::new(FakeInput::default());
    let mut keyboard = Keyboard::new(native(&input));

    keyboard.type_text("hey").await.unwrap();
    keyboard.config.type_delay_ms = 25;
    let started = Instant::now();
    keyboard.type_text("ok").await.unwrap();

    assert_eq!(input.events(), vec!["type hey", "type o", "type k"]);
    assert!(started.elapsed() >= Duration::from_millis(25));
}

// ============================================================================
// Clipboard
// ============================================================================

#[derive(Default)]
struct MemoryClipboard {
    content: Mutex<String>,
}

#[async_trait]
impl ClipboardActionProvider for MemoryClipboard {
    async fn copy(&self, text: &str) -> anyhow::Result<()> {
        *self.content.lock().unwrap() = text.to_string();
        Ok(())
    }

    async fn paste(&self) -> anyhow::Result<String> {
        let content = self.content.lock().unwrap().clone();
        if content.is_empty() {
            return Err(anyhow!("clipboard is empty"));
        }
        Ok(content)
    }
}

#[tokio::test]
async fn clipboard_without_provider_is_unavailable() {
    let input = Arc::new(FakeInput::default());
    let clipboard = Clipboard::new(native(&input));

    let err = clipboard.copy("hello").await.unwrap_err();

    assert!(matches!(err, AutomationError::Unavailable(_)));
}

#[tokio::test]
async fn clipboard_round_trips_through_provider() {
    let input = Arc::new(FakeInput::default());
    let adapter = NativeAdapter::new(input.clone(), input)
        .with_clipboard(Arc::new(MemoryClipboard::default()));
    let clipboard = Clipboard::new(Arc::new(adapter));

    assert!(clipboard.paste().await.is_err());
    clipboard.copy("hello").await.unwrap();
    assert_eq!(clipboard.paste().await.unwrap(), "hello");
}
