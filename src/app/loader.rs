use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::app::AppState;
use crate::codec::{self, Decoded, ParseError};

/// An in-flight file decode. Holding this slot is what serializes opens:
/// a second request is refused until the worker reports back.
pub struct PendingLoad {
    path: PathBuf,
    rx: Receiver<Result<Decoded, ParseError>>,
}

impl PendingLoad {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl AppState<'_> {
    /// Starts decoding `path` on a worker thread. The source file name is
    /// recorded immediately, before the decode completes or fails.
    pub fn request_load(&mut self, path: PathBuf) {
        if let Some(pending) = &self.pending_load {
            self.add_notification(format!(
                "Still loading {}, try again when it finishes",
                pending.path().display()
            ));
            return;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            self.table.set_file_name(name.to_string());
        }

        debug!("loading {}", path.display());

        let (tx, rx) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            let result = codec::decode_file(&worker_path);
            let _ = tx.send(result);
        });

        self.pending_load = Some(PendingLoad { path, rx });
    }

    /// Drains the decode worker, called once per event loop tick. On
    /// success the table is replaced and the selection resets; on failure
    /// one notification is added and the table is left untouched.
    pub fn poll_load(&mut self) {
        let message = match &self.pending_load {
            Some(pending) => match pending.rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => None,
            },
            None => return,
        };

        let Some(pending) = self.pending_load.take() else {
            return;
        };

        match message {
            Some(Ok(decoded)) => {
                let row_count = decoded.rows.len();
                let column_count = decoded.columns.len();

                self.table.load_rows(decoded.rows);
                self.selected_cell = (0, 0);
                self.start_row = 0;
                self.start_col = 0;
                self.sync_column_widths();
                self.update_row_number_width();

                self.add_notification(format!(
                    "Loaded {} rows, {} columns from {}",
                    row_count,
                    column_count,
                    pending.path().display()
                ));
            }
            Some(Err(e)) => {
                warn!("failed to load {}: {}", pending.path().display(), e);
                self.add_notification(format!("Open failed: {e}"));
            }
            None => {
                warn!("decode worker for {} died", pending.path().display());
                self.add_notification(format!(
                    "Open failed: could not decode {}",
                    pending.path().display()
                ));
            }
        }
    }
}
