use ratatui_textarea::TextArea;

use crate::app::PendingLoad;
use crate::table::Table;
use crate::utils::display_width;

pub enum InputMode {
    Normal,
    Editing,
    Command,
    Help,
}

pub struct AppState<'a> {
    pub table: Table,
    pub selected_cell: (usize, usize), // (row, col), 0-based
    pub start_row: usize,
    pub start_col: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub text_area: TextArea<'a>,
    pub should_quit: bool,
    pub column_widths: Vec<usize>, // Parallel to table.columns()
    pub clipboard: Option<String>, // Store copied/cut cell content
    pub g_pressed: bool,           // Track if 'g' was pressed for 'gg' command
    pub row_number_width: usize,   // Width for displaying row numbers
    pub info_panel_height: usize,
    pub notification_messages: Vec<String>,
    pub max_notifications: usize,
    pub help_text: String,
    pub help_scroll: usize,
    pub help_visible_lines: usize,
    pub pending_load: Option<PendingLoad>,
}

impl AppState<'_> {
    pub fn new(table: Table) -> Self {
        let default_width = 15;
        let column_widths = vec![default_width; table.column_count()];

        let row_count = table.row_count();
        let row_number_width = if row_count < 10 {
            1
        } else {
            row_count.to_string().len()
        };
        // Ensure a minimum width of 4 for row numbers
        let row_number_width = row_number_width.max(4);

        Self {
            table,
            selected_cell: (0, 0),
            start_row: 0,
            start_col: 0,
            visible_rows: 30, // Default values, will be adjusted based on window size
            visible_cols: 15, // Default values, will be adjusted based on window size
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            text_area: TextArea::default(),
            should_quit: false,
            column_widths,
            clipboard: None,
            g_pressed: false,
            row_number_width,
            info_panel_height: 10,
            notification_messages: Vec::new(),
            max_notifications: 5,
            help_text: String::new(),
            help_scroll: 0,
            help_visible_lines: 20,
            pending_load: None,
        }
    }

    pub fn add_notification(&mut self, message: String) {
        self.notification_messages.push(message);

        if self.notification_messages.len() > self.max_notifications {
            self.notification_messages.remove(0);
        }
    }

    /// Updates the row number width based on the current row count
    pub fn update_row_number_width(&mut self) {
        let width = self.table.row_count().to_string().len();
        // Ensure a minimum width of 4 for row numbers
        self.row_number_width = width.max(4);
    }

    pub fn adjust_info_panel_height(&mut self, delta: isize) {
        let new_height = (self.info_panel_height as isize + delta).clamp(6, 16) as usize;
        if new_height != self.info_panel_height {
            self.info_panel_height = new_height;
            self.add_notification(format!("Info panel height: {}", self.info_panel_height));
        }
    }

    /// Content of the selected cell, or empty when the table has no cell
    /// there (absent key or no rows).
    pub fn get_cell_content(&self, row: usize, col: usize) -> String {
        let columns = self.table.columns();
        let Some(column) = columns.get(col) else {
            return String::new();
        };

        self.table.cell(row, column).unwrap_or_default().to_string()
    }

    /// Keeps the selection inside the table after a mutation. An empty
    /// table keeps the selection parked at the origin.
    pub fn clamp_selection(&mut self) {
        let max_row = self.table.row_count().saturating_sub(1);
        let max_col = self.table.column_count().saturating_sub(1);
        self.selected_cell.0 = self.selected_cell.0.min(max_row);
        self.selected_cell.1 = self.selected_cell.1.min(max_col);
    }

    /// Grows or shrinks the width list to match the current column set.
    pub fn sync_column_widths(&mut self) {
        let count = self.table.column_count();
        match self.column_widths.len().cmp(&count) {
            std::cmp::Ordering::Greater => {
                self.column_widths.truncate(count);
            }
            std::cmp::Ordering::Less => {
                let additional = count - self.column_widths.len();
                self.column_widths.extend(vec![15; additional]);
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    pub fn get_column_width(&self, col: usize) -> usize {
        if col < self.column_widths.len() {
            self.column_widths[col]
        } else {
            15 // Default width
        }
    }

    pub fn auto_adjust_column_width(&mut self, col: Option<usize>) {
        let default_min_width = 5;

        match col {
            // Adjust specific column
            Some(column) => {
                if column < self.column_widths.len() {
                    let width = self.calculate_column_width(column);
                    self.column_widths[column] = width.max(default_min_width);

                    self.ensure_column_visible(column);

                    let columns = self.table.columns();
                    self.add_notification(format!(
                        "Column {} width adjusted",
                        columns.get(column).map_or("?", String::as_str)
                    ));
                }
            }
            // Adjust all columns
            None => {
                for col_idx in 0..self.column_widths.len() {
                    let width = self.calculate_column_width(col_idx);
                    self.column_widths[col_idx] = width.max(default_min_width);
                }

                let column = self.selected_cell.1;
                self.ensure_column_visible(column);

                self.add_notification("All column widths adjusted".to_string());
            }
        }
    }

    fn calculate_column_width(&self, col: usize) -> usize {
        let columns = self.table.columns();
        let Some(column) = columns.get(col) else {
            return 15;
        };

        // Start with the header width
        let mut max_width = 3.max(display_width(column));

        for row in 0..self.table.row_count() {
            let Some(content) = self.table.cell(row, column) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            max_width = max_width.max(display_width(content));
        }
        max_width
    }

    pub fn cancel_input(&mut self) {
        // If in help mode, just close the help window
        if let InputMode::Help = self.input_mode {
            self.input_mode = InputMode::Normal;
            return;
        }

        // Otherwise, cancel the current input
        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();
        self.text_area = TextArea::default();
    }

    pub fn add_char_to_input(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn delete_char_from_input(&mut self) {
        self.input_buffer.pop();
    }

    pub fn start_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer = String::new();
    }
}
