//! Subprocess execution with cancellation and a deadline.
//!
//! Both pipes are drained on helper threads so a chatty child cannot block on
//! a full pipe while the caller polls for exit.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::value_objects::CancelToken;

/// How often the child is polled for exit, cancellation and timeout
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finished {
    Exited(ProcessOutput),
    Cancelled,
    TimedOut,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `command` to completion unless `cancel` is set or `timeout` elapses,
/// in which case the child is killed.
pub fn run_until(command: &mut Command, cancel: &CancelToken, timeout: Duration) -> io::Result<Finished> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let started = Instant::now();

    let status = loop {
        if let Some(status) = child.try_wait()? {
            // Ctrl+C reaches the whole process group, so the child may exit
            // on the same signal that set the token
            if cancel.is_cancelled() {
                return Ok(Finished::Cancelled);
            }
            break status;
        }
        if cancel.is_cancelled() {
            stop(&mut child);
            return Ok(Finished::Cancelled);
        }
        if started.elapsed() >= timeout {
            stop(&mut child);
            return Ok(Finished::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Finished::Exited(ProcessOutput {
        code: status.code(),
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    }))
}
