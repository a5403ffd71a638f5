use crate::app::AppState;

impl AppState<'_> {
    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        if self.table.is_empty() || self.table.column_count() == 0 {
            return;
        }

        let max_row = self.table.row_count() - 1;
        let max_col = self.table.column_count() - 1;

        let new_row = ((self.selected_cell.0 as isize + delta_row).max(0) as usize).min(max_row);
        let new_col = ((self.selected_cell.1 as isize + delta_col).max(0) as usize).min(max_col);

        self.selected_cell = (new_row, new_col);

        self.handle_scrolling();
    }

    pub fn handle_scrolling(&mut self) {
        if self.selected_cell.0 < self.start_row {
            self.start_row = self.selected_cell.0;
        } else if self.selected_cell.0 >= self.start_row + self.visible_rows {
            self.start_row = self.selected_cell.0 - self.visible_rows + 1;
        }

        self.ensure_column_visible(self.selected_cell.1);
    }

    pub fn jump_to_first_row(&mut self) {
        if self.table.is_empty() {
            self.add_notification("Table is empty".to_string());
            return;
        }

        let current_col = self.selected_cell.1;
        self.selected_cell = (0, current_col);
        self.handle_scrolling();
        self.add_notification("Jumped to first row".to_string());
    }

    pub fn jump_to_last_row(&mut self) {
        if self.table.is_empty() {
            self.add_notification("Table is empty".to_string());
            return;
        }

        let current_col = self.selected_cell.1;
        self.selected_cell = (self.table.row_count() - 1, current_col);
        self.handle_scrolling();
        self.add_notification("Jumped to last row".to_string());
    }

    pub fn jump_to_first_column(&mut self) {
        if self.table.column_count() == 0 {
            self.add_notification("No columns to jump to".to_string());
            return;
        }

        let current_row = self.selected_cell.0;
        self.selected_cell = (current_row, 0);
        self.handle_scrolling();
        self.add_notification("Jumped to first column".to_string());
    }

    pub fn jump_to_last_column(&mut self) {
        if self.table.column_count() == 0 {
            self.add_notification("No columns to jump to".to_string());
            return;
        }

        let current_row = self.selected_cell.0;
        self.selected_cell = (current_row, self.table.column_count() - 1);
        self.handle_scrolling();
        self.add_notification("Jumped to last column".to_string());
    }

    pub fn ensure_column_visible(&mut self, column: usize) {
        // If column is to the left of visible area, adjust start_col
        if column < self.start_col {
            self.start_col = column;
            return;
        }

        let last_visible_col = self.start_col + self.visible_cols - 1;

        // If column is to the right of visible area, adjust start_col to make it visible
        if column > last_visible_col {
            self.start_col = column + 1 - self.visible_cols;
            return;
        }

        // If the column is already visible but at the right edge, try to add a margin
        let max_col = self.table.column_count().saturating_sub(1);

        // Only apply margin logic if not at the last column
        if column < max_col && column == last_visible_col && self.visible_cols > 1 {
            // Adjust start column to show more columns to the left
            // This creates a margin on the right
            self.start_col = (column + 2).saturating_sub(self.visible_cols);
        }
    }
}
