//! Background jobs run after the response has been sent.
//!
//! Handlers push a [`Job`] onto the [`TaskQueue`]; a single [`TaskWorker`]
//! spawned at startup drains the channel and appends to the [`ActivityLog`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{Email, IntelReportRequest};
use thiserror::Error;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// Errors raised when handing work to the background worker.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("background worker is not running")]
    WorkerGone,
}

/// Work the background worker knows how to do.
#[derive(Debug, Clone)]
pub enum Job {
    LogActivity { email: Email, activity: String },
    CompileReport(IntelReportRequest),
}

impl Job {
    fn kind(&self) -> &'static str {
        match self {
            Job::LogActivity { .. } => "log_activity",
            Job::CompileReport(_) => "compile_report",
        }
    }

    fn describe(&self) -> String {
        match self {
            Job::LogActivity { email, activity } => format!("User {email} activity: {activity}"),
            Job::CompileReport(report) => format!(
                "Compiled intel report '{}' for {}",
                report.report_name, report.recipient_email
            ),
        }
    }
}

/// One line of the activity log.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub job_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub message: String,
}

/// Append-only record of completed jobs.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl ActivityLog {
    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.read().await.clone()
    }

    /// Messages only, oldest first.
    pub async fn messages(&self) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    async fn append(&self, entry: ActivityEntry) {
        self.entries.write().await.push(entry);
    }
}

/// Sending half held in application state.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    sender: mpsc::UnboundedSender<(Uuid, Job)>,
    log: ActivityLog,
}

impl TaskQueue {
    /// Creates a queue and the worker that drains it.
    pub fn new() -> (Self, TaskWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let log = ActivityLog::default();
        let queue = Self {
            sender,
            log: log.clone(),
        };
        (queue, TaskWorker { receiver, log })
    }

    /// Queues a job and returns its id.
    #[tracing::instrument(skip(self, job), fields(kind = job.kind()))]
    pub fn enqueue(&self, job: Job) -> Result<Uuid, TaskError> {
        let job_id = Uuid::new_v4();
        self.sender
            .send((job_id, job))
            .map_err(|_| TaskError::WorkerGone)?;
        tracing::debug!(%job_id, "job queued");
        Ok(job_id)
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }
}

/// Receiving half; run it on its own task.
#[derive(Debug)]
pub struct TaskWorker {
    receiver: mpsc::UnboundedReceiver<(Uuid, Job)>,
    log: ActivityLog,
}

impl TaskWorker {
    /// Processes jobs until every [`TaskQueue`] clone has been dropped.
    pub async fn run(mut self) {
        while let Some((job_id, job)) = self.receiver.recv().await {
            self.process(job_id, job).await;
        }
        tracing::info!("background worker stopped");
    }

    #[tracing::instrument(skip(self, job), fields(kind = job.kind()))]
    async fn process(&self, job_id: Uuid, job: Job) {
        let message = job.describe();
        tracing::info!(%job_id, %message, "background job complete");

        self.log
            .append(ActivityEntry {
                job_id,
                recorded_at: Utc::now(),
                message,
            })
            .await;
        metrics::counter!("background_tasks_completed_total", "kind" => job.kind()).increment(1);
    }
}
