//! Notice dispatch loop — runs until the shutdown signal is received.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use examtrack_core::config::worker::WorkerConfig;
use examtrack_realtime::NoticeDispatcher;

/// Periodic runner for the scheduled notice dispatcher.
///
/// A single independent task, concurrent with all connection tasks. Each
/// tick delegates to [`NoticeDispatcher::dispatch_due`]; a failed tick is
/// logged and the loop keeps going.
#[derive(Debug)]
pub struct NoticeRunner {
    dispatcher: Arc<NoticeDispatcher>,
    config: WorkerConfig,
}

impl NoticeRunner {
    /// Creates a runner over the shared dispatcher.
    pub fn new(dispatcher: Arc<NoticeDispatcher>, config: WorkerConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Runs the dispatch loop until `shutdown` flips to true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let interval = Duration::from_secs(self.config.dispatch_interval_seconds.max(1));
        info!(interval_seconds = interval.as_secs(), "notice runner started");

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; skip it so
        // startup does not race notices created during boot.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match self.dispatcher.dispatch_due().await {
                        Ok(0) => {}
                        Ok(dispatched) => info!(dispatched, "scheduled notices dispatched"),
                        Err(err) => error!(error = %err, "notice dispatch tick failed"),
                    }
                }
            }
        }

        info!("notice runner stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use examtrack_core::result::AppResult;
    use examtrack_entity::notice::{Notice, NoticeStatus, SendMethod};
    use examtrack_entity::store::NoticeStore;
    use examtrack_realtime::ConnectionRegistry;

    /// Notice store that hands out one due batch and records outcomes.
    #[derive(Default)]
    struct ScriptedNoticeStore {
        due: Mutex<Vec<Notice>>,
        outcomes: Mutex<Vec<(i64, NoticeStatus)>>,
    }

    #[async_trait]
    impl NoticeStore for ScriptedNoticeStore {
        async fn find_due_scheduled(&self, _now: DateTime<Utc>) -> AppResult<Vec<Notice>> {
            Ok(std::mem::take(&mut *self.due.lock().unwrap()))
        }

        async fn mark_delivery(
            &self,
            id: i64,
            status: NoticeStatus,
            _sent_at: DateTime<Utc>,
        ) -> AppResult<()> {
            self.outcomes.lock().unwrap().push((id, status));
            Ok(())
        }
    }

    fn due_notice(id: i64) -> Notice {
        Notice {
            id,
            notice_type: "reminder".to_string(),
            target_exam: None,
            target_class: None,
            target_student: Some(1),
            title: "t".to_string(),
            content: "c".to_string(),
            send_method: SendMethod::Scheduled,
            send_time: Some(Utc::now()),
            status: NoticeStatus::Pending,
            created_by: 7,
            sent_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_due_notices_are_dispatched_on_the_interval() {
        let store = Arc::new(ScriptedNoticeStore::default());
        store.due.lock().unwrap().push(due_notice(1));
        let dispatcher = Arc::new(NoticeDispatcher::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::clone(&store) as Arc<dyn NoticeStore>,
        ));

        let runner = NoticeRunner::new(
            dispatcher,
            WorkerConfig {
                dispatch_interval_seconds: 10,
            },
        );
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { runner.run(shutdown_rx).await });

        // Nothing happens before the first interval elapses.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(store.outcomes.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(store.outcomes.lock().unwrap().len(), 1);

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_the_loop() {
        let store = Arc::new(ScriptedNoticeStore::default());
        let dispatcher = Arc::new(NoticeDispatcher::new(
            Arc::new(ConnectionRegistry::new()),
            store as Arc<dyn NoticeStore>,
        ));
        let runner = NoticeRunner::new(
            dispatcher,
            WorkerConfig {
                dispatch_interval_seconds: 10,
            },
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { runner.run(shutdown_rx).await });
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("runner did not stop on shutdown")
            .unwrap();
    }
}
