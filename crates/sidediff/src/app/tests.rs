use super::*;

const OLD: &str = "a\nb\nc\nd\ne\nf\ng\nh\n";
const NEW: &str = "a\nB\nc\nd\ne\nf\nG\nh\n";

fn make_app(old: &str, new: &str) -> App {
    App::new(
        Input::from_text("old.txt", old),
        Input::from_text("new.txt", new),
        DiffEngine::new(),
    )
}

#[test]
fn test_max_scroll() {
    assert_eq!(max_scroll(100, 20), 80);
    assert_eq!(max_scroll(20, 20), 0);
    assert_eq!(max_scroll(5, 20), 0);
}

#[test]
fn test_new_builds_panes() {
    let app = make_app(OLD, NEW);
    // Eight lines plus the empty line after the final newline
    assert_eq!(app.row_count(), 9);
    assert_eq!(app.cache().misses(), 1);
}

#[test]
fn test_refresh_reuses_cached_panes() {
    let mut app = make_app(OLD, NEW);
    app.refresh();
    app.refresh();
    assert_eq!(app.cache().hits(), 2);
    assert_eq!(app.cache().misses(), 1);

    app.new.text.push_str("i\n");
    app.refresh();
    assert_eq!(app.cache().misses(), 2);
    assert_eq!(app.row_count(), 10);
}

#[test]
fn test_scroll_clamps_to_content() {
    let mut app = make_app(OLD, NEW);
    for _ in 0..20 {
        app.scroll_down();
    }
    app.clamp_scroll(app.row_count(), 5);
    assert_eq!(app.scroll_offset, 4);

    for _ in 0..20 {
        app.scroll_up();
    }
    assert_eq!(app.scroll_offset, 0);
}

#[test]
fn test_scroll_step() {
    let mut app = make_app(OLD, NEW);
    app.scroll_step = 3;
    app.scroll_down();
    assert_eq!(app.scroll_offset, 3);
    app.scroll_up();
    assert_eq!(app.scroll_offset, 0);
}

#[test]
fn test_half_page_and_jumps() {
    let mut app = make_app(OLD, NEW);
    app.scroll_half_page_down(4);
    assert_eq!(app.scroll_offset, 2);
    app.scroll_half_page_up(4);
    assert_eq!(app.scroll_offset, 0);
    // A one-row viewport still moves
    app.scroll_half_page_down(1);
    assert_eq!(app.scroll_offset, 1);

    app.goto_end(5);
    assert_eq!(app.scroll_offset, 4);
    app.goto_start();
    assert_eq!(app.scroll_offset, 0);
}

#[test]
fn test_horizontal_scroll() {
    let mut app = make_app(OLD, NEW);
    app.scroll_right();
    app.scroll_right();
    assert_eq!(app.horizontal_scroll, 2 * HORIZONTAL_STEP);
    app.clamp_horizontal_scroll(10, 8);
    assert_eq!(app.horizontal_scroll, 2);
    app.scroll_left();
    assert_eq!(app.horizontal_scroll, 0);

    app.scroll_right();
    app.scroll_to_line_start();
    assert_eq!(app.horizontal_scroll, 0);
}

#[test]
fn test_horizontal_scroll_stops_at_terminal_limit() {
    let mut app = make_app(OLD, NEW);
    app.horizontal_scroll = 200_000;
    app.clamp_horizontal_scroll(300_000, 80);
    assert_eq!(app.horizontal_scroll, u16::MAX as usize);
}

#[test]
fn test_change_navigation() {
    let mut app = make_app(OLD, NEW);
    let starts = app.panes().map(SideBySide::change_starts).unwrap_or_default();
    assert_eq!(starts, vec![1, 6]);

    assert!(app.next_change());
    assert_eq!(app.current_change, Some(1));
    assert_eq!(app.scroll_offset, 0);
    assert_eq!(app.change_position(), Some((1, 2)));

    assert!(app.next_change());
    assert_eq!(app.current_change, Some(6));
    assert_eq!(app.scroll_offset, 6 - CHANGE_CONTEXT_ROWS);
    assert_eq!(app.change_position(), Some((2, 2)));

    assert!(!app.next_change());
    assert_eq!(app.status_message.as_deref(), Some("No more changes"));
    assert_eq!(app.current_change, Some(6));

    assert!(app.prev_change());
    assert_eq!(app.current_change, Some(1));
    assert!(!app.prev_change());
}

#[test]
fn test_next_change_starts_from_viewport() {
    let mut app = make_app(OLD, NEW);
    app.scroll_offset = 3;
    assert!(app.next_change());
    assert_eq!(app.current_change, Some(6));
}

#[test]
fn test_identical_texts_have_no_changes() {
    let mut app = make_app(OLD, OLD);
    assert!(!app.next_change());
    assert!(!app.prev_change());
    assert_eq!(app.change_position(), None);
}

#[test]
fn test_reload_failure_sets_status() {
    let mut app = make_app(OLD, NEW);
    app.old = Input::from_text("/nonexistent/sidediff/old.txt", OLD);
    app.reload();
    let message = app.status_message.clone().unwrap_or_default();
    assert!(message.contains("Failed to read"), "{message}");
    assert_eq!(app.row_count(), 9);
}

#[test]
fn test_reload_picks_up_changes() {
    let dir = std::env::temp_dir().join(format!("sidediff-reload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let old_path = dir.join("old.txt");
    let new_path = dir.join("new.txt");
    std::fs::write(&old_path, OLD).expect("write old");
    std::fs::write(&new_path, NEW).expect("write new");

    let mut app = App::new(
        Input::load(&old_path).expect("load old"),
        Input::load(&new_path).expect("load new"),
        DiffEngine::new(),
    );
    app.reload();
    assert_eq!(app.status_message.as_deref(), Some("No changes on disk"));

    app.next_change();
    std::fs::write(&new_path, OLD).expect("rewrite new");
    app.reload();
    assert_eq!(app.status_message.as_deref(), Some("Reloaded"));
    assert_eq!(app.current_change, None);
    assert!(app.panes().is_some_and(SideBySide::is_identical));

    let _ = std::fs::remove_dir_all(&dir);
}
