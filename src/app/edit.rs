use crate::app::AppState;
use crate::app::InputMode;

impl AppState<'_> {
    /// Name of the column the selection sits on, if any.
    pub fn selected_column_name(&self) -> Option<String> {
        self.table.columns().get(self.selected_cell.1).cloned()
    }

    pub fn start_editing(&mut self) {
        if self.table.is_empty() {
            self.add_notification("Table is empty. Add a row with :ar".to_string());
            return;
        }
        if self.table.column_count() == 0 {
            self.add_notification("No columns yet. Add one with :ac <name>".to_string());
            return;
        }

        self.input_mode = InputMode::Editing;
        let content = self.get_cell_content(self.selected_cell.0, self.selected_cell.1);
        self.input_buffer = content.clone();

        // Set up TextArea for editing
        self.text_area = ratatui_textarea::TextArea::default();
        self.text_area.insert_str(&content);
    }

    pub fn confirm_edit(&mut self) {
        if let InputMode::Editing = self.input_mode {
            // Get content from TextArea
            let content = self.text_area.lines().join("\n");
            let row = self.selected_cell.0;

            if let Some(column) = self.selected_column_name() {
                self.table.set_cell(row, &column, content);
            }

            self.input_mode = InputMode::Normal;
            self.input_buffer = String::new();
            self.text_area = ratatui_textarea::TextArea::default();
        }
    }

    pub fn copy_cell(&mut self) {
        if self.selected_column_name().is_none() {
            self.add_notification("No cell selected".to_string());
            return;
        }

        let content = self.get_cell_content(self.selected_cell.0, self.selected_cell.1);
        self.clipboard = Some(content);
        self.add_notification("Cell content copied".to_string());
    }

    pub fn cut_cell(&mut self) {
        let Some(column) = self.selected_column_name() else {
            self.add_notification("No cell selected".to_string());
            return;
        };

        let row = self.selected_cell.0;
        let content = self.get_cell_content(row, self.selected_cell.1);
        self.clipboard = Some(content);

        self.table.set_cell(row, &column, String::new());
        self.add_notification("Cell content cut".to_string());
    }

    pub fn paste_cell(&mut self) {
        let Some(column) = self.selected_column_name() else {
            self.add_notification("No cell selected".to_string());
            return;
        };

        if let Some(content) = self.clipboard.clone() {
            self.table.set_cell(self.selected_cell.0, &column, content);
            self.add_notification("Content pasted".to_string());
        } else {
            self.add_notification("Clipboard is empty".to_string());
        }
    }

    /// Appends an empty row and moves the selection onto it.
    pub fn add_row_and_select(&mut self) {
        self.table.add_row();

        self.selected_cell.0 = self.table.row_count() - 1;
        self.clamp_selection();
        self.sync_column_widths();
        self.update_row_number_width();
        self.handle_scrolling();

        self.add_notification(format!("Added row {}", self.table.row_count()));
    }

    pub fn delete_current_row(&mut self) {
        if self.table.is_empty() {
            self.add_notification("Table is empty".to_string());
            return;
        }

        self.delete_row_display(self.selected_cell.0 + 1);
    }

    /// Deletes a row by its 1-based display number.
    pub fn delete_row_display(&mut self, row: usize) {
        if row < 1 || row > self.table.row_count() {
            self.add_notification(format!("Invalid row number: {row}"));
            return;
        }

        self.table.delete_row(row - 1);

        // Deleting row 1 can change which keys form the header
        self.clamp_selection();
        self.sync_column_widths();
        self.update_row_number_width();
        self.handle_scrolling();

        self.add_notification(format!("Deleted row {row}"));
    }

    /// Deletes an inclusive range of rows by 1-based display numbers.
    pub fn delete_rows_display(&mut self, start: usize, end: usize) {
        if start == end {
            self.delete_row_display(start);
            return;
        }

        if start < 1 || start > end || start > self.table.row_count() {
            self.add_notification("Invalid row range".to_string());
            return;
        }

        let effective_end = end.min(self.table.row_count());
        for _ in start..=effective_end {
            self.table.delete_row(start - 1);
        }

        self.clamp_selection();
        self.sync_column_widths();
        self.update_row_number_width();
        self.handle_scrolling();

        self.add_notification(format!("Deleted rows {start} to {effective_end}"));
    }

    /// Creates a new column by putting an empty value for `name` on row 1,
    /// which is where the header keys come from.
    pub fn add_column(&mut self, name: &str) {
        if self.table.is_empty() {
            self.add_notification("Table is empty. Add a row first with :ar".to_string());
            return;
        }

        if self.table.columns().iter().any(|column| column == name) {
            self.add_notification(format!("Column '{name}' already exists"));
            return;
        }

        self.table.set_cell(0, name, String::new());
        self.sync_column_widths();

        self.add_notification(format!("Added column '{name}'"));
    }
}
