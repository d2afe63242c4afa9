use crate::messages::ResponseMessage;
use crate::sync_backend::sync;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{error, info};

pub enum WorkerMessage {
    Sync { source: PathBuf, target: PathBuf },
}

/// Runs sync requests off the UI thread, one at a time, streaming events back.
pub struct Worker<F> {
    receiver: Receiver<WorkerMessage>,
    response_sender: Sender<ResponseMessage>,
    repaint: F,
}

impl<F: Fn()> Worker<F> {
    pub fn new(
        receiver: Receiver<WorkerMessage>,
        response_sender: Sender<ResponseMessage>,
        repaint: F,
    ) -> Self {
        Self {
            receiver,
            response_sender,
            repaint,
        }
    }

    pub fn run(&self) {
        while let Ok(message) = self.receiver.recv() {
            match message {
                WorkerMessage::Sync { source, target } => self.run_sync(source, target),
            }
        }
        info!("Worker channel closed, stopping");
    }

    fn run_sync(&self, source: PathBuf, target: PathBuf) {
        match sync(&source, &target) {
            Ok(events) => {
                for event in events {
                    self.respond(ResponseMessage::Event(event));
                }
            }
            Err(e) => {
                error!("Sync could not start: {}", e);
                self.respond(ResponseMessage::SyncFailed(e.to_string()));
            }
        }
    }

    fn respond(&self, response: ResponseMessage) {
        if let Err(e) = self.response_sender.send(response) {
            error!("Failed to send worker response: {}", e);
        }
        (self.repaint)();
    }
}

/// Spawn the worker thread, answering on `response_sender`. `repaint` is called
/// after every response so the UI can pick it up straight away.
pub fn spawn_worker<F>(
    response_sender: Sender<ResponseMessage>,
    repaint: F,
) -> Sender<WorkerMessage>
where
    F: Fn() + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let worker = Worker::new(receiver, response_sender, repaint);
        worker.run();
    });
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync_backend::SyncEvent;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use uuid::Uuid;

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    fn next_response(receiver: &Receiver<ResponseMessage>) -> ResponseMessage {
        receiver.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_worker_streams_events() {
        let test_dir = std::env::temp_dir().join(format!("test_worker_{}", Uuid::new_v4()));
        let source = test_dir.join("source");
        let target = test_dir.join("target");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("a.dll"), "new").unwrap();
        fs::write(target.join("a.dll"), "old").unwrap();

        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);
        let (response_sender, receiver) = mpsc::channel();
        let sender = spawn_worker(response_sender, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sender
            .send(WorkerMessage::Sync {
                source: source.clone(),
                target: target.clone(),
            })
            .unwrap();

        assert!(matches!(
            next_response(&receiver),
            ResponseMessage::Event(SyncEvent::Updated(name)) if name == "a.dll"
        ));
        assert!(matches!(
            next_response(&receiver),
            ResponseMessage::Event(SyncEvent::Summary(1))
        ));
        // The repaint for the first event runs before the second is sent
        assert!(repaints.load(Ordering::SeqCst) >= 1);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_worker_reports_unreadable_target() {
        let test_dir = std::env::temp_dir().join(format!("test_worker_{}", Uuid::new_v4()));

        let (response_sender, receiver) = mpsc::channel();
        let sender = spawn_worker(response_sender, || {});
        sender
            .send(WorkerMessage::Sync {
                source: test_dir.join("source"),
                target: test_dir.join("target"),
            })
            .unwrap();

        assert!(matches!(
            next_response(&receiver),
            ResponseMessage::SyncFailed(_)
        ));
    }
}
