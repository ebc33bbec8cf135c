use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::components::entry_list::EntryListState;
use crate::config::AppConfig;
use crate::event::{BootPayload, Event};
use crate::fs::backend::{BridgeHandle, NavCommand, NavOutcome, NavResponse};
use crate::preview::{PreviewDone, PreviewLoader, PreviewState};

/// Navigation state machine.
///
/// Owns the drive list, the entry list, and both active indices; every
/// mutation happens here, either directly on key input or when a bridge
/// completion arrives. Drive/directory operations run asynchronously in
/// the bridge task, so each one is issued under a fresh token and a
/// completion is applied only while its token is still the latest — a
/// burst of key presses leaves exactly the newest intent standing.
pub struct App {
    /// Drive identifiers, fixed for the lifetime of the backend session.
    drives: Vec<String>,
    active_drive: usize,
    /// Current directory listing, replaced wholesale on every scan.
    entries: Vec<PathBuf>,
    /// Entries at `[0, sub_dir_count)` are directories.
    sub_dir_count: usize,
    active_entry: usize,
    /// Token of the most recently issued drive/directory operation.
    nav_token: u64,
    pub list: EntryListState,
    pub preview: PreviewState,
    loader: PreviewLoader,
    bridge: BridgeHandle,
    preview_enabled: bool,
    start_drive: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        bridge: BridgeHandle,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            drives: Vec::new(),
            active_drive: 0,
            entries: Vec::new(),
            sub_dir_count: 0,
            active_entry: 0,
            nav_token: 0,
            list: EntryListState::default(),
            preview: PreviewState::default(),
            loader: PreviewLoader::new(events, config.max_preview_bytes()),
            bridge,
            preview_enabled: config.preview_enabled(),
            start_drive: config.start_drive(),
            should_quit: false,
        }
    }

    // ── Render accessors ─────────────────────────────────────────────────

    pub fn drives(&self) -> &[String] {
        &self.drives
    }

    pub fn active_drive(&self) -> usize {
        self.active_drive
    }

    pub fn active_entry(&self) -> usize {
        self.active_entry
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn selected_is_dir(&self) -> bool {
        self.active_entry < self.sub_dir_count
    }

    pub fn selected_path(&self) -> Option<String> {
        self.entries
            .get(self.active_entry)
            .map(|path| path.display().to_string())
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Startup handshake: adopt the enumerated drives and issue the first
    /// drive-change + scan.
    pub fn init(&mut self, payload: BootPayload) {
        self.drives = payload.drives;
        tracing::info!(drives = self.drives.len(), "boot handshake received");
        if self.drives.is_empty() {
            return;
        }
        let target = self.start_drive;
        let token = self.next_token();
        self.bridge.submit(token, NavCommand::ChangeDrive { target });
    }

    /// Switch drives by a relative amount, wrapping in both directions.
    /// The backend's confirmed index becomes authoritative on completion.
    pub fn select_drive(&mut self, delta: i64) {
        if self.drives.is_empty() {
            return;
        }
        let target = self.drive_target(delta);
        let token = self.next_token();
        self.bridge.submit(token, NavCommand::ChangeDrive { target });
    }

    /// Move the entry selection by a relative amount, clamped to the list.
    ///
    /// The refresh runs when the index moves, and also whenever it lands
    /// on 0 — that forced refresh is what re-renders selection and preview
    /// after a list replacement.
    pub fn select_entry(&mut self, delta: i64) {
        let n = self.entry_target(delta);
        if n != self.active_entry || n == 0 {
            self.active_entry = n;
            self.list.move_selection(n);
            match self.entries.get(n) {
                Some(path) if self.preview_enabled => {
                    self.loader.request(n, path.clone());
                }
                Some(_) => {}
                None => self.preview.clear(),
            }
        } else {
            self.active_entry = n;
        }
    }

    /// Traverse into the active entry. A rejected traversal mutates
    /// nothing.
    pub fn enter_dir(&mut self) {
        let token = self.next_token();
        self.bridge.submit(
            token,
            NavCommand::EnterDir {
                entry: self.active_entry,
            },
        );
    }

    /// One-shot return to the parent directory: entry 0 is always the
    /// synthetic parent, so select it and traverse.
    pub fn go_to_parent(&mut self) {
        self.select_entry(0);
        self.active_entry = 0;
        self.enter_dir();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Completions ──────────────────────────────────────────────────────

    /// Apply a completed navigation command. A completion from a
    /// superseded operation is dropped whole.
    pub fn handle_nav(&mut self, response: NavResponse) {
        if response.token != self.nav_token {
            tracing::debug!(
                token = response.token,
                current = self.nav_token,
                "stale navigation completion dropped"
            );
            return;
        }
        match response.outcome {
            NavOutcome::Rejected => {}
            NavOutcome::Rescanned {
                drive,
                entries,
                sub_dir_count,
            } => {
                if let Some(confirmed) = drive {
                    self.active_drive = confirmed;
                }
                self.entries = entries;
                self.sub_dir_count = sub_dir_count.min(self.entries.len());
                self.active_entry = 0;
                self.list.rebuild(&self.entries, self.sub_dir_count);
                self.select_entry(0);
            }
        }
    }

    /// Apply a finished preview fetch. Successes count only while their
    /// sequence is still current; failures clear the pane even when stale.
    pub fn handle_preview(&mut self, done: PreviewDone) {
        match done.result {
            Ok(image) => {
                if done.sequence == self.loader.current() {
                    self.preview.show(image);
                } else {
                    tracing::debug!(sequence = done.sequence, "stale preview discarded");
                }
            }
            Err(e) => {
                tracing::debug!(sequence = done.sequence, error = %e, "preview fetch failed");
                self.preview.clear();
            }
        }
    }

    // ── Index arithmetic ─────────────────────────────────────────────────

    /// Wraparound drive index for a relative movement.
    fn drive_target(&self, delta: i64) -> usize {
        let len = self.drives.len() as i64;
        (self.active_drive as i64 + delta).rem_euclid(len) as usize
    }

    /// Clamped entry index; a zero delta always resolves to the top.
    fn entry_target(&self, delta: i64) -> usize {
        if delta == 0 || self.entries.is_empty() {
            return 0;
        }
        let max = self.entries.len() as i64 - 1;
        (self.active_entry as i64 + delta).clamp(0, max) as usize
    }

    fn next_token(&mut self) -> u64 {
        self.nav_token += 1;
        self.nav_token
    }
}
