//! Backend surface consumed by the navigation controller, plus the bridge
//! task that executes navigation commands against it.
//!
//! The controller never calls the backend directly. It submits a command
//! tagged with a navigation token; the bridge task runs the backend calls
//! and reports back through the main event channel. Backend failures never
//! reach the controller as errors — each call degrades to its safe default
//! (`change_drive` → 0, `change_dir` → rejection, `scan_dir` → empty list,
//! `count_sub_dir` → 0).

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::event::Event;

/// The drive/directory RPC surface.
///
/// Calls run inside the bridge task; the suspension point the controller
/// sees is the channel round-trip, not the calls themselves.
pub trait Backend: Send + 'static {
    /// Switch to the requested drive. Returns the confirmed index, which
    /// may differ from the request.
    fn change_drive(&mut self, requested: usize) -> Result<usize>;

    /// Traverse into the directory at the given entry index. An `Err` is
    /// the reserved rejection the controller treats as a no-op.
    fn change_dir(&mut self, entry: usize) -> Result<usize>;

    /// Enumerate the current directory. Index 0 is the synthetic parent
    /// entry.
    fn scan_dir(&mut self) -> Result<Vec<PathBuf>>;

    /// Number of leading entries in the last scan that are directories
    /// (the synthetic parent included).
    fn count_sub_dir(&mut self) -> Result<usize>;
}

/// A navigation operation submitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Switch drives, then rescan.
    ChangeDrive { target: usize },
    /// Traverse into an entry, then rescan.
    EnterDir { entry: usize },
}

/// Completion of a navigation command, tagged with the token it was
/// issued under.
#[derive(Debug)]
pub struct NavResponse {
    pub token: u64,
    pub outcome: NavOutcome,
}

/// What a completed navigation command produced.
#[derive(Debug)]
pub enum NavOutcome {
    /// Fresh directory contents. `drive` carries the backend-confirmed
    /// drive index for drive changes, `None` for traversals.
    Rescanned {
        drive: Option<usize>,
        entries: Vec<PathBuf>,
        sub_dir_count: usize,
    },
    /// The backend refused the traversal; entry state must not change.
    Rejected,
}

/// Cheap clonable handle for submitting commands to the bridge task.
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    tx: mpsc::UnboundedSender<(u64, NavCommand)>,
}

impl BridgeHandle {
    pub fn submit(&self, token: u64, command: NavCommand) {
        if self.tx.send((token, command)).is_err() {
            tracing::warn!(?command, "bridge task gone, navigation command dropped");
        }
    }
}

/// Spawn the bridge task around a backend. Commands are executed in
/// submission order; every command produces exactly one `Event::Nav`.
pub fn spawn<B: Backend>(mut backend: B, events: mpsc::UnboundedSender<Event>) -> BridgeHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, NavCommand)>();

    tokio::spawn(async move {
        while let Some((token, command)) = rx.recv().await {
            let outcome = execute(&mut backend, command);
            if events.send(Event::Nav(NavResponse { token, outcome })).is_err() {
                break;
            }
        }
    });

    BridgeHandle { tx }
}

fn execute<B: Backend>(backend: &mut B, command: NavCommand) -> NavOutcome {
    match command {
        NavCommand::ChangeDrive { target } => {
            let drive = match backend.change_drive(target) {
                Ok(confirmed) => confirmed,
                Err(e) => {
                    tracing::warn!(requested = target, error = %e, "change_drive failed, falling back to drive 0");
                    0
                }
            };
            let (entries, sub_dir_count) = rescan(backend);
            NavOutcome::Rescanned {
                drive: Some(drive),
                entries,
                sub_dir_count,
            }
        }
        NavCommand::EnterDir { entry } => match backend.change_dir(entry) {
            Ok(_) => {
                let (entries, sub_dir_count) = rescan(backend);
                NavOutcome::Rescanned {
                    drive: None,
                    entries,
                    sub_dir_count,
                }
            }
            Err(e) => {
                tracing::debug!(entry, error = %e, "change_dir rejected");
                NavOutcome::Rejected
            }
        },
    }
}

/// Scan the current directory. The subdirectory count is only fetched
/// after a successful scan and is clamped so the directory span never
/// exceeds the entry list.
fn rescan<B: Backend>(backend: &mut B) -> (Vec<PathBuf>, usize) {
    match backend.scan_dir() {
        Ok(entries) => {
            let count = match backend.count_sub_dir() {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!(error = %e, "count_sub_dir failed, assuming 0");
                    0
                }
            };
            let count = count.min(entries.len());
            (entries, count)
        }
        Err(e) => {
            tracing::warn!(error = %e, "scan_dir failed, showing empty listing");
            (Vec::new(), 0)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::path::PathBuf;

    use crate::error::{AppError, Result};

    use super::Backend;

    /// Backend whose responses are scripted per call, for exercising the
    /// bridge and the controller without touching the filesystem.
    #[derive(Default)]
    pub(crate) struct ScriptedBackend {
        pub change_drive: VecDeque<Result<usize>>,
        pub change_dir: VecDeque<Result<usize>>,
        pub scan_dir: VecDeque<Result<Vec<PathBuf>>>,
        pub count_sub_dir: VecDeque<Result<usize>>,
    }

    impl ScriptedBackend {
        pub fn fail(message: &str) -> AppError {
            AppError::Backend(message.into())
        }

        /// Queue one full scan response (entries + count).
        pub fn push_scan(&mut self, entries: &[&str], count: usize) {
            self.scan_dir
                .push_back(Ok(entries.iter().map(PathBuf::from).collect()));
            self.count_sub_dir.push_back(Ok(count));
        }
    }

    impl Backend for ScriptedBackend {
        fn change_drive(&mut self, requested: usize) -> Result<usize> {
            self.change_drive.pop_front().unwrap_or(Ok(requested))
        }

        fn change_dir(&mut self, entry: usize) -> Result<usize> {
            self.change_dir.pop_front().unwrap_or(Ok(entry))
        }

        fn scan_dir(&mut self) -> Result<Vec<PathBuf>> {
            self.scan_dir.pop_front().unwrap_or(Ok(Vec::new()))
        }

        fn count_sub_dir(&mut self) -> Result<usize> {
            self.count_sub_dir.pop_front().unwrap_or(Ok(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;
    use crate::event::Event;

    async fn next_nav(rx: &mut mpsc::UnboundedReceiver<Event>) -> NavResponse {
        match rx.recv().await {
            Some(Event::Nav(response)) => response,
            other => panic!("expected Event::Nav, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn drive_change_reports_confirmed_index_and_scan() {
        let mut backend = ScriptedBackend::default();
        backend.change_drive.push_back(Ok(1));
        backend.push_scan(&["/d", "/d/sub", "/d/file.txt"], 2);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(7, NavCommand::ChangeDrive { target: 1 });

        let response = next_nav(&mut rx).await;
        assert_eq!(response.token, 7);
        match response.outcome {
            NavOutcome::Rescanned {
                drive,
                entries,
                sub_dir_count,
            } => {
                assert_eq!(drive, Some(1));
                assert_eq!(entries.len(), 3);
                assert_eq!(sub_dir_count, 2);
            }
            other => panic!("expected Rescanned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_drive_change_falls_back_to_zero() {
        let mut backend = ScriptedBackend::default();
        backend
            .change_drive
            .push_back(Err(ScriptedBackend::fail("drive unavailable")));
        backend.push_scan(&["/"], 1);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(1, NavCommand::ChangeDrive { target: 3 });

        let response = next_nav(&mut rx).await;
        match response.outcome {
            NavOutcome::Rescanned { drive, .. } => assert_eq!(drive, Some(0)),
            other => panic!("expected Rescanned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_scan_degrades_to_empty_listing() {
        let mut backend = ScriptedBackend::default();
        backend.change_drive.push_back(Ok(0));
        backend
            .scan_dir
            .push_back(Err(ScriptedBackend::fail("permission denied")));
        // count_sub_dir would return stale data; it must not be consulted.
        backend.count_sub_dir.push_back(Ok(99));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(2, NavCommand::ChangeDrive { target: 0 });

        let response = next_nav(&mut rx).await;
        match response.outcome {
            NavOutcome::Rescanned {
                entries,
                sub_dir_count,
                ..
            } => {
                assert!(entries.is_empty());
                assert_eq!(sub_dir_count, 0);
            }
            other => panic!("expected Rescanned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejected_traversal_produces_no_scan() {
        let mut backend = ScriptedBackend::default();
        backend
            .change_dir
            .push_back(Err(ScriptedBackend::fail("not a directory")));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(3, NavCommand::EnterDir { entry: 4 });

        let response = next_nav(&mut rx).await;
        assert_eq!(response.token, 3);
        assert!(matches!(response.outcome, NavOutcome::Rejected));
    }

    #[tokio::test]
    async fn sub_dir_count_is_clamped_to_entry_count() {
        let mut backend = ScriptedBackend::default();
        backend.push_scan(&["/a", "/a/b"], 5);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(4, NavCommand::EnterDir { entry: 0 });

        let response = next_nav(&mut rx).await;
        match response.outcome {
            NavOutcome::Rescanned { sub_dir_count, .. } => assert_eq!(sub_dir_count, 2),
            other => panic!("expected Rescanned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn commands_complete_in_submission_order() {
        let mut backend = ScriptedBackend::default();
        backend.push_scan(&["/x"], 1);
        backend.push_scan(&["/y"], 1);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = spawn(backend, tx);
        bridge.submit(10, NavCommand::ChangeDrive { target: 0 });
        bridge.submit(11, NavCommand::ChangeDrive { target: 0 });

        assert_eq!(next_nav(&mut rx).await.token, 10);
        assert_eq!(next_nav(&mut rx).await.token, 11);
    }
}
