use std::path::PathBuf;

use crate::app::AppState;
use crate::app::InputMode;

impl AppState<'_> {
    pub fn show_help(&mut self) {
        self.help_scroll = 0;

        self.help_text = "FILE OPERATIONS:\n\
             :w [file]   - Write table as CSV (default: source file name, or data.csv)\n\
             :wq, :x     - Write and quit\n\
             :q          - Quit (will warn if unsaved changes)\n\
             :q!         - Force quit without saving\n\
             :e [file]   - Open a CSV file (:o and :open also work)\n\
             :ej [file]  - Export rows as JSON (default: file stem + .json)\n\n\
             NAVIGATION:\n\
             hjkl        - Move selection (left, down, up, right)\n\
             arrows      - Move selection\n\
             0           - Jump to first column\n\
             $           - Jump to last column\n\
             gg          - Jump to first row\n\
             G           - Jump to last row\n\n\
             EDITING:\n\
             Enter, i    - Edit current cell (Enter saves, Esc cancels)\n\
             o           - Add a row at the end\n\
             D           - Delete current row\n\
             y           - Copy current cell\n\
             d           - Cut current cell\n\
             p           - Paste into current cell\n\
             :y          - Copy current cell\n\
             :d          - Cut current cell\n\
             :put, :pu   - Paste to current cell\n\n\
             ROW OPERATIONS:\n\
             :ar         - Add a row at the end\n\
             :dr         - Delete current row\n\
             :dr [row]   - Delete specific row\n\
             :dr [start] [end] - Delete rows from start to end\n\n\
             COLUMN OPERATIONS:\n\
             :ac [name]  - Add a column (header keys live on row 1)\n\
             :cw fit     - Adjust width of current column to fit its content\n\
             :cw fit all - Adjust width of all columns to fit their content\n\
             :cw min     - Set current column width to minimum (5 characters)\n\
             :cw min all - Set all columns width to minimum\n\
             :cw [number] - Set current column width to specific number of characters\n\n\
             UI ADJUSTMENTS:\n\
             +/=         - Increase info panel height\n\
             -           - Decrease info panel height\n\
             ?           - Show this help"
            .to_string();

        self.input_mode = InputMode::Help;
    }

    /// Writes the table as CSV. With no path, the export name (source file
    /// name or `data.csv`) in the current directory is used. Returns true
    /// when the write succeeded.
    pub fn save(&mut self, path: Option<&str>) -> bool {
        let destination = match path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(self.table.export_name()),
        };

        match self.table.save_to(&destination) {
            Ok(()) => {
                self.add_notification(format!(
                    "Wrote {} rows to {}",
                    self.table.row_count(),
                    destination.display()
                ));
                true
            }
            Err(e) => {
                self.add_notification(format!("Write failed: {e}"));
                false
            }
        }
    }

    pub fn save_and_exit(&mut self) {
        if self.save(None) {
            self.should_quit = true;
        } else {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn exit_without_saving(&mut self) {
        self.should_quit = true;
    }
}
