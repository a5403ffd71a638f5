use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::app::AppState;
use crate::app::InputMode;
use crate::ui::handlers::handle_key_event;
use crate::utils::{display_width, truncate_to_width};

pub fn run_app(mut app_state: AppState) -> Result<()> {
    // Setup terminal
    let mut terminal = setup_terminal()?;

    // Main event loop
    while !app_state.should_quit {
        app_state.poll_load();

        terminal.draw(|f| ui(f, &mut app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app_state, key);
                }
            }
        }
    }

    // Restore terminal
    restore_terminal(&mut terminal)?;

    Ok(())
}

/// Setup the terminal for the application
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Update the visible area of the grid based on the available space
fn update_visible_area(app_state: &mut AppState, area: Rect) {
    // Calculate visible rows based on available height (subtract header and borders)
    app_state.visible_rows = (area.height as usize).saturating_sub(3);

    // Ensure the selected column is visible
    app_state.ensure_column_visible(app_state.selected_cell.1);

    // Calculate available width for columns (subtract row numbers and borders)
    let available_width = (area.width as usize).saturating_sub(app_state.row_number_width + 2);

    // Calculate how many columns can fit in the available width
    let mut visible_cols = 0;
    let mut width_used = 0;

    // Iterate through columns starting from the leftmost visible column
    for col_idx in app_state.start_col.. {
        let col_width = app_state.get_column_width(col_idx);

        if col_idx == app_state.start_col {
            // Always include the first column even if it's wider than available space
            width_used += col_width;
            visible_cols += 1;

            if width_used >= available_width {
                break;
            }
        } else if width_used + col_width <= available_width {
            // Add columns that fit completely
            width_used += col_width;
            visible_cols += 1;
        } else if width_used < available_width {
            // Spreadsheet-like behavior: include one partially visible column
            visible_cols += 1;
            break;
        } else {
            // No more space available
            break;
        }
    }

    // Ensure at least one column is visible
    app_state.visible_cols = visible_cols.max(1);
}

pub(crate) fn ui(f: &mut Frame, app_state: &mut AppState) {
    // Create the main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Grid
            Constraint::Length(app_state.info_panel_height as u16), // Info panel
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    draw_title_bar(f, app_state, chunks[0]);

    update_visible_area(app_state, chunks[1]);
    draw_grid(f, app_state, chunks[1]);

    draw_info_panel(f, app_state, chunks[2]);
    draw_status_bar(f, app_state, chunks[3]);

    // If in help mode, draw the help popup over everything else
    if let InputMode::Help = app_state.input_mode {
        draw_help_popup(f, app_state, f.size());
    }
}

fn draw_grid(f: &mut Frame, app_state: &AppState, area: Rect) {
    // Set grid style based on current mode
    let (table_block, header_style, cell_style) =
        if matches!(app_state.input_mode, InputMode::Editing) {
            // In editing mode, dim the data display area
            (
                Block::default().borders(Borders::ALL),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray), // Dimmed cell content
            )
        } else {
            // Otherwise, add color to the border of the data display area to
            // indicate current focus
            (
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightCyan)),
                Style::default().bg(Color::DarkGray).fg(Color::Gray),
                Style::default(),
            )
        };

    if app_state.table.row_count() == 0 {
        let hint = "No data loaded.\n\n\
            Open a CSV file with :e <file>\n\
            Add an empty row with :ar\n\
            Press ? or :help for all commands";

        let placeholder = Paragraph::new(hint)
            .block(table_block)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(ratatui::widgets::Wrap { trim: false });

        f.render_widget(placeholder, area);
        return;
    }

    // Calculate visible row and column ranges
    let columns = app_state.table.columns();
    let start_row = app_state.start_row;
    let end_row = (start_row + app_state.visible_rows).min(app_state.table.row_count());
    let start_col = app_state.start_col;
    let end_col = (start_col + app_state.visible_cols).min(columns.len());

    let mut constraints = Vec::with_capacity(app_state.visible_cols + 1);
    constraints.push(Constraint::Length(app_state.row_number_width as u16));

    for col in start_col..end_col {
        constraints.push(Constraint::Length(app_state.get_column_width(col) as u16));
    }

    // Create header row from the column names
    let mut header_cells = Vec::with_capacity(app_state.visible_cols + 1);
    header_cells.push(Cell::from("").style(header_style));

    for col in start_col..end_col {
        let name = truncate_to_width(&columns[col], app_state.get_column_width(col));
        header_cells.push(Cell::from(name).style(header_style));
    }

    let header = Row::new(header_cells).height(1);

    // Create data rows
    let rows = (start_row..end_row).map(|row| {
        let mut cells = Vec::with_capacity(app_state.visible_cols + 1);

        // Add row number (1-based for display)
        cells.push(Cell::from((row + 1).to_string()).style(header_style));

        // Add cells for this row
        for col in start_col..end_col {
            let col_width = app_state.get_column_width(col);

            let content = if app_state.selected_cell == (row, col)
                && matches!(app_state.input_mode, InputMode::Editing)
            {
                // Show the in-progress edit inside the cell
                let current_content = app_state.text_area.lines().join("\n");

                if display_width(&current_content) > col_width.saturating_sub(2) {
                    let mut result = String::with_capacity(col_width);
                    let mut cumulative_width = 0;

                    // Process characters from the end to show the most recent input
                    for c in current_content.chars().rev().take(col_width * 2) {
                        let char_width = if c.is_ascii() { 1 } else { 2 };
                        if cumulative_width + char_width <= col_width.saturating_sub(2) {
                            cumulative_width += char_width;
                            result.push(c);
                        } else {
                            break;
                        }
                    }

                    // Reverse the characters to get the correct order
                    result.chars().rev().collect::<String>()
                } else {
                    current_content
                }
            } else {
                let content = app_state.get_cell_content(row, col);
                truncate_to_width(&content, col_width)
            };

            // Determine cell style
            let style = if app_state.selected_cell == (row, col) {
                Style::default().bg(Color::White).fg(Color::Black)
            } else {
                Style::default()
            };

            cells.push(Cell::from(content).style(style));
        }

        Row::new(cells)
    });

    // Create table with header and rows
    let table = Table::new(
        // Combine header and data rows
        std::iter::once(header).chain(rows),
    )
    .block(table_block)
    .style(cell_style)
    .widths(&constraints);

    f.render_widget(table, area);
}

// Parse command input and identify keywords and parameters for highlighting
fn parse_command(input: &str) -> Vec<Span> {
    if input.is_empty() {
        return vec![Span::raw("")];
    }

    let known_commands = [
        "w", "wq", "q", "q!", "x", "y", "d", "put", "pu", "ar", "dr", "ej", "help",
    ];

    let commands_with_params = ["w", "e", "o", "open", "cw", "ej", "dr", "ac"];

    let special_keywords = ["fit", "min", "all"];

    // Check if input is a simple command without parameters
    if known_commands.contains(&input) {
        return vec![Span::styled(input, Style::default().fg(Color::Yellow))];
    }

    // Extract command and parameters
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return vec![Span::raw(input)];
    }

    let cmd = parts[0];

    // Check if it's a known command with parameters
    if commands_with_params.contains(&cmd) {
        let mut spans = Vec::new();

        // Add the command part with yellow color
        spans.push(Span::styled(cmd, Style::default().fg(Color::Yellow)));

        // Add parameters if they exist
        if parts.len() > 1 {
            spans.push(Span::raw(" "));

            for i in 1..parts.len() {
                // Determine style based on whether it's a special keyword
                let style = if special_keywords.contains(&parts[i]) {
                    Style::default().fg(Color::Yellow) // Keywords are yellow
                } else {
                    Style::default().fg(Color::LightCyan) // Parameters are cyan
                };

                spans.push(Span::styled(parts[i], style));

                // Add space between parameters
                if i < parts.len() - 1 {
                    spans.push(Span::raw(" "));
                }
            }
        }

        return spans;
    }

    // For unknown commands, return as is
    vec![Span::raw(input)]
}

/// Label for the selected cell, column name plus 1-based row number.
fn cell_label(app_state: &AppState) -> String {
    let (row, _) = app_state.selected_cell;
    match app_state.selected_column_name() {
        Some(name) => format!("{}:{}", name, row + 1),
        None => format!("row {}", row + 1),
    }
}

fn draw_info_panel(f: &mut Frame, app_state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Cell content/editing area
            Constraint::Percentage(50), // Notifications
        ])
        .split(area);

    let (row, col) = app_state.selected_cell;
    let cell_ref = cell_label(app_state);

    // Handle the top panel based on the input mode
    match app_state.input_mode {
        InputMode::Editing => {
            let title = format!(" Editing Cell {} ", cell_ref);

            let edit_block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightCyan))
                .title(title);

            // Calculate inner area with padding
            let inner_area = edit_block.inner(chunks[0]);
            let padded_area = Rect {
                x: inner_area.x + 1, // Add 1 character padding on the left
                y: inner_area.y,
                width: inner_area.width.saturating_sub(2), // Subtract 2 for left and right padding
                height: inner_area.height,
            };

            f.render_widget(edit_block, chunks[0]);
            f.render_widget(app_state.text_area.widget(), padded_area);
        }
        _ => {
            // Get cell content
            let content = app_state.get_cell_content(row, col);

            let title = format!(" Cell {} Content ", cell_ref);
            let cell_block = Block::default().borders(Borders::ALL).title(title);

            // Create paragraph with cell content
            let cell_paragraph = Paragraph::new(content)
                .block(cell_block)
                .wrap(ratatui::widgets::Wrap { trim: false });

            f.render_widget(cell_paragraph, chunks[0]);
        }
    }

    // Create notification block
    let notification_block = if matches!(app_state.input_mode, InputMode::Editing) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " Notifications ",
                Style::default().fg(Color::DarkGray),
            ))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .title(" Notifications ")
    };

    // Calculate how many notifications can be shown
    let notification_height = notification_block.inner(chunks[1]).height as usize;

    // Prepare notifications text
    let notifications_text = if app_state.notification_messages.is_empty() {
        String::new()
    } else if app_state.notification_messages.len() <= notification_height {
        app_state.notification_messages.join("\n")
    } else {
        // Show only the most recent notifications that fit
        let start_idx = app_state.notification_messages.len() - notification_height;
        app_state.notification_messages[start_idx..].join("\n")
    };

    let notification_paragraph = Paragraph::new(notifications_text)
        .block(notification_block)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .style(if matches!(app_state.input_mode, InputMode::Editing) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });

    f.render_widget(notification_paragraph, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    match app_state.input_mode {
        InputMode::Normal => {
            let status = "Input :help for operating instructions | hjkl=move Enter=edit o=add-row D=delete-row y=copy d=cut p=paste :=command ";

            let status_widget = Paragraph::new(status)
                .style(Style::default())
                .alignment(ratatui::layout::Alignment::Left);

            f.render_widget(status_widget, area);
        }

        InputMode::Editing => {
            let status_widget = Paragraph::new("Press Enter to confirm, Esc to cancel")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(ratatui::layout::Alignment::Left);

            f.render_widget(status_widget, area);
        }

        InputMode::Command => {
            // Create a styled text with different colors for command and parameters
            let mut spans = vec![Span::styled(":", Style::default())];
            let command_spans = parse_command(&app_state.input_buffer);
            spans.extend(command_spans);

            let text = Line::from(spans);
            let status_widget = Paragraph::new(text)
                .style(Style::default())
                .alignment(ratatui::layout::Alignment::Left);

            f.render_widget(status_widget, area);
        }

        InputMode::Help => {
            // No status bar in help mode
        }
    }
}

fn draw_help_popup(f: &mut Frame, app_state: &mut AppState, area: Rect) {
    // Clear the background
    f.render_widget(Clear, area);

    // Calculate popup dimensions
    let line_count = app_state.help_text.lines().count() as u16;
    let content_height = line_count + 2; // +2 for borders

    let max_line_width = app_state
        .help_text
        .lines()
        .map(|line| line.len() as u16)
        .max()
        .unwrap_or(40);

    let content_width = max_line_width + 4; // +4 for borders and padding

    // Ensure popup fits within screen
    let popup_width = content_width.min(area.width.saturating_sub(4));
    let popup_height = content_height.min(area.height.saturating_sub(4));

    // Center the popup on screen
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Calculate scrolling parameters
    let visible_lines = popup_height.saturating_sub(2) as usize; // Subtract 2 for top and bottom borders
    app_state.help_visible_lines = visible_lines;

    let line_count = app_state.help_text.lines().count();
    let max_scroll = line_count.saturating_sub(visible_lines);

    app_state.help_scroll = app_state.help_scroll.min(max_scroll);

    let mut title = " [ESC/Enter to close] ".to_string();

    if max_scroll > 0 {
        let scroll_indicator = if app_state.help_scroll == 0 {
            " [↓ or j to scroll] "
        } else if app_state.help_scroll >= max_scroll {
            " [↑ or k to scroll] "
        } else {
            " [↑↓ or j/k to scroll] "
        };
        title.push_str(scroll_indicator);
    }

    let help_block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan))
        .style(Style::default().bg(Color::Blue).fg(Color::White));

    // Create paragraph with help text
    let help_paragraph = Paragraph::new(app_state.help_text.clone())
        .block(help_block)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((app_state.help_scroll as u16, 0));

    f.render_widget(help_paragraph, popup_area);
}

fn draw_title_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    let is_editing = matches!(app_state.input_mode, InputMode::Editing);

    let file_name = app_state.table.file_name().unwrap_or("[No File]");

    let mut title_content = format!(" {} ", file_name);

    if app_state.table.is_modified() {
        title_content.push_str("[+] ");
    }

    if let Some(pending) = &app_state.pending_load {
        let loading_name = pending
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file");
        title_content.push_str(&format!("(loading {}) ", loading_name));
    }

    let summary = format!(
        " {} rows, {} cols ",
        app_state.table.row_count(),
        app_state.table.column_count()
    );

    let title_style = if is_editing {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    };

    // Two-column layout: file name on the left, table summary on the right
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(summary.len() as u16),
        ])
        .split(area);

    let title_widget = Paragraph::new(title_content).style(title_style);
    f.render_widget(title_widget, chunks[0]);

    let summary_widget = Paragraph::new(summary)
        .style(title_style)
        .alignment(ratatui::layout::Alignment::Right);
    f.render_widget(summary_widget, chunks[1]);
}
