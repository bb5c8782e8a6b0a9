//! Background command runner
//!
//! Runs backend commands on worker threads and reports their lifecycle to
//! the UI: a job is observed as running, then finishes with its stdout or
//! an error. The dashboard decorates these transitions (loading marks,
//! button labels, error banners) but never controls the request itself.

use crate::model::domain::Dataset;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;

/// What a background job is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Fetch(Dataset),
    Save(Dataset),
    Delete(Dataset),
}

impl JobKind {
    pub fn dataset(&self) -> Dataset {
        match self {
            JobKind::Fetch(d) | JobKind::Save(d) | JobKind::Delete(d) => *d,
        }
    }
}

enum JobMessage {
    Stdout(String),
    Stderr(String),
    Completed(Option<i32>),
    Error(String),
}

struct RunningJob {
    kind: JobKind,
    receiver: Receiver<JobMessage>,
    stdout: String,
    stderr: String,
    started: Instant,
}

/// A finished job and what it produced
#[derive(Debug)]
pub struct JobOutcome {
    pub kind: JobKind,
    pub result: Result<String, String>,
    pub elapsed: std::time::Duration,
}

/// Runner for backend commands
#[derive(Default)]
pub struct FetchRunner {
    jobs: Vec<RunningJob>,
}

impl FetchRunner {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Spawn a command for the given job; a duplicate of an already
    /// running job is ignored
    pub fn spawn(&mut self, kind: JobKind, command: &str) {
        if self.is_running(kind) {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let command = command.to_string();
        thread::spawn(move || {
            run_command(&command, tx);
        });

        self.jobs.push(RunningJob {
            kind,
            receiver: rx,
            stdout: String::new(),
            stderr: String::new(),
            started: Instant::now(),
        });
    }

    pub fn is_running(&self, kind: JobKind) -> bool {
        self.jobs.iter().any(|job| job.kind == kind)
    }

    /// Whether any job touching the given dataset is in flight
    pub fn is_dataset_busy(&self, dataset: Dataset) -> bool {
        self.jobs.iter().any(|job| job.kind.dataset() == dataset)
    }

    /// Drain worker messages, returning the jobs that finished
    pub fn poll(&mut self) -> Vec<JobOutcome> {
        let mut outcomes = Vec::new();
        let mut index = 0;
        while index < self.jobs.len() {
            if let Some(result) = drain_job(&mut self.jobs[index]) {
                let job = self.jobs.remove(index);
                outcomes.push(JobOutcome {
                    kind: job.kind,
                    result,
                    elapsed: job.started.elapsed(),
                });
            } else {
                index += 1;
            }
        }
        outcomes
    }

    /// Drop all in-flight jobs; their worker threads exit on the next send
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

/// Pump one job's channel; `Some` once the job has finished
fn drain_job(job: &mut RunningJob) -> Option<Result<String, String>> {
    loop {
        match job.receiver.try_recv() {
            Ok(JobMessage::Stdout(line)) => {
                job.stdout.push_str(&line);
                job.stdout.push('\n');
            }
            Ok(JobMessage::Stderr(text)) => job.stderr.push_str(&text),
            Ok(JobMessage::Completed(code)) => {
                return Some(if code == Some(0) {
                    Ok(std::mem::take(&mut job.stdout))
                } else {
                    Err(failure_message(code, &job.stderr))
                });
            }
            Ok(JobMessage::Error(err)) => return Some(Err(err)),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                return Some(Err("انقطع الاتصال بالعملية الخلفية".to_string()));
            }
        }
    }
}

fn failure_message(code: Option<i32>, stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        match code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    } else {
        // last stderr line is usually the actual error
        trimmed.lines().last().unwrap_or(trimmed).to_string()
    }
}

/// Run a shell command and stream its output through the channel
fn run_command(command: &str, tx: Sender<JobMessage>) {
    #[cfg(target_os = "windows")]
    let result = Command::new("cmd")
        .args(["/C", command])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    #[cfg(not(target_os = "windows"))]
    let result = Command::new("sh")
        .args(["-c", command])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match result {
        Ok(c) => c,
        Err(e) => {
            let _ = tx.send(JobMessage::Error(e.to_string()));
            return;
        }
    };

    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(Result::ok) {
            if tx.send(JobMessage::Stdout(line)).is_err() {
                return;
            }
        }
    }

    if let Some(mut stderr) = child.stderr.take() {
        let mut text = String::new();
        if stderr.read_to_string(&mut text).is_ok() && !text.is_empty() {
            if tx.send(JobMessage::Stderr(text)).is_err() {
                return;
            }
        }
    }

    let exit_code = child.wait().ok().and_then(|s| s.code());
    let _ = tx.send(JobMessage::Completed(exit_code));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for_outcome(runner: &mut FetchRunner) -> JobOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let mut outcomes = runner.poll();
            if let Some(outcome) = outcomes.pop() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "job did not finish in time");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_successful_command_yields_stdout() {
        let mut runner = FetchRunner::new();
        runner.spawn(
            JobKind::Fetch(Dataset::Stores),
            "printf 'id,name\\n1,a\\n'",
        );
        let outcome = wait_for_outcome(&mut runner);
        assert_eq!(outcome.kind, JobKind::Fetch(Dataset::Stores));
        assert_eq!(outcome.result.unwrap(), "id,name\n1,a\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_command_reports_stderr() {
        let mut runner = FetchRunner::new();
        runner.spawn(
            JobKind::Delete(Dataset::Products),
            "echo boom >&2; exit 3",
        );
        let outcome = wait_for_outcome(&mut runner);
        assert_eq!(outcome.result.unwrap_err(), "boom");
    }

    #[test]
    #[cfg(unix)]
    fn test_duplicate_job_is_ignored() {
        let mut runner = FetchRunner::new();
        runner.spawn(JobKind::Fetch(Dataset::Orders), "sleep 2");
        runner.spawn(JobKind::Fetch(Dataset::Orders), "true");
        assert_eq!(runner.jobs.len(), 1);
        runner.clear();
    }

    #[test]
    fn test_dataset_busy_covers_all_job_kinds() {
        let mut runner = FetchRunner::new();
        runner.spawn(JobKind::Save(Dataset::Products), "sleep 2");
        assert!(runner.is_dataset_busy(Dataset::Products));
        assert!(!runner.is_dataset_busy(Dataset::Stores));
        runner.clear();
    }
}
