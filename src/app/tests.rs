use std::time::{Duration, Instant};

use tempfile::TempDir;

use crate::app::{AppState, InputMode};
use crate::codec;
use crate::table::Table;

fn state_from_csv(input: &str) -> AppState<'static> {
    let decoded = codec::decode(input).unwrap();
    let mut table = Table::new();
    table.load_rows(decoded.rows);
    AppState::new(table)
}

fn run_command(app_state: &mut AppState, command: &str) {
    app_state.start_command_mode();
    app_state.input_buffer = command.to_string();
    app_state.execute_command();
}

/// Polls the decode worker until it reports back, failing the test if it
/// never does.
fn wait_for_load(app_state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app_state.pending_load.is_some() {
        app_state.poll_load();
        assert!(
            Instant::now() < deadline,
            "decode worker never reported back"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn open_command_loads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("people.csv");
    std::fs::write(&path, "name,age\nAlice,30\nBob,25\n").unwrap();

    let mut app_state = AppState::new(Table::new());
    run_command(&mut app_state, &format!("e {}", path.display()));
    assert!(app_state.pending_load.is_some());
    wait_for_load(&mut app_state);

    assert_eq!(app_state.table.row_count(), 2);
    assert_eq!(app_state.table.columns(), ["name", "age"]);
    assert_eq!(app_state.table.cell(0, "name"), Some("Alice"));
    assert_eq!(app_state.table.cell(1, "age"), Some("25"));
    assert_eq!(app_state.table.file_name(), Some("people.csv"));
    assert!(!app_state.table.is_modified());
    assert_eq!(app_state.column_widths.len(), 2);
}

#[test]
fn edit_then_write_round_trips() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.csv");

    let mut app_state = state_from_csv("name,age\nAlice,30\nBob,25\n");
    app_state.table.set_cell(0, "age", "31".to_string());
    assert!(app_state.table.is_modified());

    run_command(&mut app_state, &format!("w {}", out.display()));

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "name,age\nAlice,31\nBob,25\n");
    assert!(!app_state.table.is_modified());
}

#[test]
fn failed_open_leaves_table_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let mut app_state = state_from_csv("name,age\nAlice,30\nBob,25\n");
    let before = app_state.notification_messages.len();

    run_command(&mut app_state, &format!("open {}", path.display()));
    wait_for_load(&mut app_state);

    assert_eq!(app_state.table.row_count(), 2);
    assert_eq!(app_state.table.cell(0, "age"), Some("30"));

    let added = &app_state.notification_messages[before..];
    assert_eq!(added.len(), 1);
    assert!(added[0].starts_with("Open failed"));
}

#[test]
fn overlapping_opens_are_refused() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    std::fs::write(&first, "a,b\n1,2\n").unwrap();
    std::fs::write(&second, "c\n3\n").unwrap();

    let mut app_state = AppState::new(Table::new());
    app_state.request_load(first);
    app_state.request_load(second);

    assert!(app_state
        .notification_messages
        .iter()
        .any(|m| m.starts_with("Still loading")));

    wait_for_load(&mut app_state);

    assert_eq!(app_state.table.columns(), ["a", "b"]);
    assert_eq!(app_state.table.file_name(), Some("first.csv"));
}

#[test]
fn fresh_table_built_from_commands_writes_out() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("new.csv");

    let mut app_state = AppState::new(Table::new());
    run_command(&mut app_state, "ar");
    run_command(&mut app_state, "ac x");
    app_state.table.set_cell(0, "x", "1".to_string());
    run_command(&mut app_state, &format!("w {}", out.display()));

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "x\n1\n");
}

#[test]
fn quit_warns_when_modified() {
    let mut app_state = state_from_csv("a\n1\n");
    app_state.table.set_cell(0, "a", "2".to_string());

    run_command(&mut app_state, "q");
    assert!(!app_state.should_quit);
    assert!(app_state
        .notification_messages
        .last()
        .unwrap()
        .contains("unsaved changes"));

    run_command(&mut app_state, "q!");
    assert!(app_state.should_quit);
}

#[test]
fn quit_exits_cleanly_when_unmodified() {
    let mut app_state = state_from_csv("a\n1\n");
    run_command(&mut app_state, "q");
    assert!(app_state.should_quit);
}

#[test]
fn write_and_quit_stays_open_on_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing-dir").join("out.csv");

    let mut app_state = state_from_csv("a\n1\n");
    app_state.table.set_cell(0, "a", "2".to_string());
    app_state.table.set_file_name(missing.display().to_string());

    run_command(&mut app_state, "wq");

    assert!(!app_state.should_quit);
    assert!(app_state
        .notification_messages
        .last()
        .unwrap()
        .starts_with("Write failed"));
}

#[test]
fn delete_row_command_uses_display_numbers() {
    let mut app_state = state_from_csv("name\nAlice\nBob\nCarol\n");

    run_command(&mut app_state, "dr 2");
    assert_eq!(app_state.table.row_count(), 2);
    assert_eq!(app_state.table.cell(0, "name"), Some("Alice"));
    assert_eq!(app_state.table.cell(1, "name"), Some("Carol"));

    run_command(&mut app_state, "dr 9");
    assert!(app_state
        .notification_messages
        .last()
        .unwrap()
        .starts_with("Invalid row number"));
    assert_eq!(app_state.table.row_count(), 2);
}

#[test]
fn delete_row_range_is_inclusive() {
    let mut app_state = state_from_csv("n\n1\n2\n3\n4\n");

    run_command(&mut app_state, "dr 2 3");

    assert_eq!(app_state.table.row_count(), 2);
    assert_eq!(app_state.table.cell(0, "n"), Some("1"));
    assert_eq!(app_state.table.cell(1, "n"), Some("4"));
}

#[test]
fn added_row_starts_empty_and_is_selected() {
    let mut app_state = state_from_csv("a,b\n1,2\n");

    app_state.add_row_and_select();

    assert_eq!(app_state.table.row_count(), 2);
    assert_eq!(app_state.selected_cell.0, 1);
    assert_eq!(app_state.table.cell(1, "a"), None);
    assert!(app_state.table.is_modified());
}

#[test]
fn deleting_the_first_row_rekeys_the_header() {
    let mut app_state = state_from_csv("a\n1\n2\n");

    run_command(&mut app_state, "ac b");
    assert_eq!(app_state.table.columns(), ["a", "b"]);

    run_command(&mut app_state, "dr 1");
    assert_eq!(app_state.table.columns(), ["a"]);
    assert_eq!(app_state.column_widths.len(), 1);
}

#[test]
fn duplicate_column_is_refused() {
    let mut app_state = state_from_csv("a\n1\n");

    run_command(&mut app_state, "ac b");
    run_command(&mut app_state, "ac b");

    assert!(app_state
        .notification_messages
        .last()
        .unwrap()
        .contains("already exists"));
    assert_eq!(app_state.table.columns(), ["a", "b"]);
}

#[test]
fn editing_flow_updates_the_cell() {
    let mut app_state = state_from_csv("name,age\nAlice,30\n");

    app_state.start_editing();
    assert!(matches!(app_state.input_mode, InputMode::Editing));
    assert_eq!(app_state.text_area.lines().join("\n"), "Alice");

    app_state.text_area.insert_str(" Smith");
    app_state.confirm_edit();

    assert!(matches!(app_state.input_mode, InputMode::Normal));
    assert_eq!(app_state.table.cell(0, "name"), Some("Alice Smith"));
    assert!(app_state.table.is_modified());
}

#[test]
fn clipboard_cycle_copies_cuts_and_pastes() {
    let mut app_state = state_from_csv("a,b\n1,2\n");

    app_state.copy_cell();
    app_state.move_cursor(0, 1);
    app_state.paste_cell();
    assert_eq!(app_state.table.cell(0, "b"), Some("1"));

    app_state.cut_cell();
    assert_eq!(app_state.table.cell(0, "b"), Some(""));
    assert_eq!(app_state.clipboard.as_deref(), Some("1"));
}

#[test]
fn json_export_command_writes_rows() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("rows.json");

    let mut app_state = state_from_csv("name,age\nAlice,30\n");
    run_command(&mut app_state, &format!("ej {}", out.display()));

    let json = std::fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"name\": \"Alice\""));
    assert!(json.contains("\"age\": \"30\""));
}

#[test]
fn unknown_command_notifies() {
    let mut app_state = state_from_csv("a\n1\n");

    run_command(&mut app_state, "frobnicate");

    assert!(app_state
        .notification_messages
        .last()
        .unwrap()
        .starts_with("Unknown command"));
}

#[test]
fn jump_commands_move_selection() {
    let mut app_state = state_from_csv("a,b,c\n1,2,3\n4,5,6\n7,8,9\n");

    app_state.jump_to_last_row();
    assert_eq!(app_state.selected_cell.0, 2);

    app_state.jump_to_last_column();
    assert_eq!(app_state.selected_cell.1, 2);

    app_state.jump_to_first_row();
    assert_eq!(app_state.selected_cell.0, 0);

    app_state.jump_to_first_column();
    assert_eq!(app_state.selected_cell.1, 0);
}

#[test]
fn jump_on_empty_table_notifies() {
    let mut app_state = AppState::new(Table::new());

    app_state.jump_to_first_row();
    app_state.jump_to_last_row();
    app_state.jump_to_first_column();
    app_state.jump_to_last_column();

    assert_eq!(app_state.selected_cell, (0, 0));
    assert_eq!(
        app_state.notification_messages,
        vec![
            "Table is empty",
            "Table is empty",
            "No columns to jump to",
            "No columns to jump to",
        ]
    );
}

#[test]
fn move_cursor_clamps_at_edges() {
    let mut app_state = state_from_csv("a,b\n1,2\n");

    app_state.move_cursor(-1, -1);
    assert_eq!(app_state.selected_cell, (0, 0));

    app_state.move_cursor(5, 5);
    assert_eq!(app_state.selected_cell, (0, 1));
}

#[test]
fn notifications_keep_only_the_most_recent() {
    let mut app_state = AppState::new(Table::new());

    for i in 0..8 {
        app_state.add_notification(format!("message {i}"));
    }

    assert_eq!(app_state.notification_messages.len(), 5);
    assert_eq!(app_state.notification_messages[0], "message 3");
    assert_eq!(app_state.notification_messages[4], "message 7");
}

#[test]
fn column_width_command_sets_and_clamps() {
    let mut app_state = state_from_csv("a,b\n1,2\n");

    run_command(&mut app_state, "cw 30");
    assert_eq!(app_state.column_widths[0], 30);

    run_command(&mut app_state, "cw 200");
    assert_eq!(app_state.column_widths[0], 50);

    run_command(&mut app_state, "cw min all");
    assert_eq!(app_state.column_widths, vec![5, 5]);
}
