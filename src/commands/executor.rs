use std::path::PathBuf;

use tracing::debug;

use crate::app::AppState;
use crate::json_export::{default_json_path, export_rows_json};

impl AppState<'_> {
    pub fn execute_command(&mut self) {
        let command = self.input_buffer.trim().to_string();
        self.input_mode = crate::app::InputMode::Normal;
        self.input_buffer = String::new();

        if command.is_empty() {
            return;
        }

        debug!("command: {}", command);

        match command.as_str() {
            "w" => {
                self.save(None);
            }
            "wq" | "x" => self.save_and_exit(),
            "q" => {
                if self.table.is_modified() {
                    self.add_notification(
                        "Table has unsaved changes. Use :q! to force quit or :wq to save and quit."
                            .to_string(),
                    );
                } else {
                    self.should_quit = true;
                }
            }
            "q!" => self.exit_without_saving(),
            "y" => self.copy_cell(),
            "d" => self.cut_cell(),
            "put" | "pu" => self.paste_cell(),
            "ar" => self.add_row_and_select(),
            "dr" => self.delete_current_row(),
            "ej" => self.handle_json_export_command(None),
            "help" => self.show_help(),
            "e" | "open" => self.add_notification("Usage: :e [file]".to_string()),
            "ac" => self.add_notification("Usage: :ac [column name]".to_string()),
            "cw" => self.add_notification("Usage: :cw [fit|min|number] [all]".to_string()),
            _ => {
                // Handle commands with parameters
                if let Some(rest) = command.strip_prefix("w ") {
                    self.save(Some(rest.trim()));
                } else if let Some(rest) = command.strip_prefix("e ") {
                    self.request_load(PathBuf::from(rest.trim()));
                } else if let Some(rest) = command.strip_prefix("open ") {
                    self.request_load(PathBuf::from(rest.trim()));
                } else if let Some(rest) = command.strip_prefix("o ") {
                    self.request_load(PathBuf::from(rest.trim()));
                } else if let Some(rest) = command.strip_prefix("ej ") {
                    self.handle_json_export_command(Some(rest.trim()));
                } else if let Some(rest) = command.strip_prefix("ac ") {
                    let name = rest.trim();
                    if name.is_empty() {
                        self.add_notification("Usage: :ac [column name]".to_string());
                    } else {
                        self.add_column(name);
                    }
                } else if command.starts_with("cw ") {
                    self.handle_column_width_command(&command);
                } else if command.starts_with("dr ") {
                    self.handle_delete_row_command(&command);
                } else {
                    self.add_notification(format!("Unknown command: {}", command));
                }
            }
        }
    }

    fn handle_column_width_command(&mut self, cmd: &str) {
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        if parts.len() < 2 {
            self.add_notification("Usage: :cw [fit|min|number] [all]".to_string());
            return;
        }

        if self.table.column_count() == 0 {
            self.add_notification("No columns to adjust".to_string());
            return;
        }

        let action = parts[1];
        let apply_to_all = parts.len() > 2 && parts[2] == "all";

        match action {
            "fit" => {
                if apply_to_all {
                    self.auto_adjust_column_width(None);
                } else {
                    self.auto_adjust_column_width(Some(self.selected_cell.1));
                }
            }
            "min" => {
                if apply_to_all {
                    for width in &mut self.column_widths {
                        *width = 5; // Minimum width
                    }
                    self.add_notification("All columns set to minimum width".to_string());
                } else {
                    let col = self.selected_cell.1;
                    if col < self.column_widths.len() {
                        self.column_widths[col] = 5; // Minimum width
                        let name = self.selected_column_name().unwrap_or_default();
                        self.add_notification(format!("Column {} set to minimum width", name));
                    }
                }
            }
            _ => {
                // Try to parse as a number
                if let Ok(width) = action.parse::<usize>() {
                    let col = self.selected_cell.1;
                    if col < self.column_widths.len() {
                        self.column_widths[col] = width.clamp(5, 50); // Clamp between 5 and 50
                        let name = self.selected_column_name().unwrap_or_default();
                        self.add_notification(format!("Column {} width set to {}", name, width));
                    }
                } else {
                    self.add_notification(format!("Invalid column width: {}", action));
                }
            }
        }
    }

    fn handle_delete_row_command(&mut self, cmd: &str) {
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        if parts.len() == 2 {
            // Delete specific row
            if let Ok(row) = parts[1].parse::<usize>() {
                self.delete_row_display(row);
            } else {
                self.add_notification(format!("Invalid row number: {}", parts[1]));
            }
            return;
        }

        if parts.len() == 3 {
            // Delete range of rows
            if let (Ok(start_row), Ok(end_row)) =
                (parts[1].parse::<usize>(), parts[2].parse::<usize>())
            {
                self.delete_rows_display(start_row, end_row);
            } else {
                self.add_notification("Invalid row range".to_string());
            }
            return;
        }

        self.add_notification("Usage: :dr [row] [end_row]".to_string());
    }

    fn handle_json_export_command(&mut self, path: Option<&str>) {
        let destination = match path {
            Some(p) => PathBuf::from(p),
            None => default_json_path(&self.table.export_name()),
        };

        match export_rows_json(self.table.rows(), &destination) {
            Ok(()) => {
                self.add_notification(format!("Exported to {}", destination.display()));
            }
            Err(e) => {
                self.add_notification(format!("Export failed: {e}"));
            }
        }
    }
}
