//! Runs an external command while draining its output
//!
//! stdout and stderr are read on two scoped threads while the calling thread
//! waits for the child. Pipe buffers are bounded, so a child that fills one
//! of them without a concurrent reader would block forever.

use crate::{
    command::SwigCommand,
    error::{Error, Result},
    log::LogSink,
};
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Output from a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `-1` when the child was terminated by a signal
    pub exit_code: i32,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Launch `command`, forward stderr lines to `sink.error` and stdout lines to
/// `sink.debug`, and block until the child exits.
pub fn run_streaming(command: &SwigCommand, sink: &dyn LogSink) -> Result<ProcessOutcome> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(ref dir) = command.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| Error::LaunchError {
        command: command.program.display().to_string(),
        source,
    })?;
    debug!("Spawned {:?} (pid {})", command.program, child.id());

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, stdout_lines, stderr_lines) = thread::scope(|scope| {
        let out = stdout.map(|stream| scope.spawn(move || drain(stream, |line| sink.debug(line))));
        let err = stderr.map(|stream| scope.spawn(move || drain(stream, |line| sink.error(line))));

        let status = child.wait();

        let stdout_lines = out.map(|handle| join_drain(handle.join(), "stdout")).unwrap_or(0);
        let stderr_lines = err.map(|handle| join_drain(handle.join(), "stderr")).unwrap_or(0);
        (status, stdout_lines, stderr_lines)
    });
    let status = status?;

    Ok(ProcessOutcome {
        exit_code: status.code().unwrap_or(-1),
        stdout_lines,
        stderr_lines,
    })
}

/// Forward every line of `stream` in order. Invalid UTF-8 is replaced.
fn drain<R: Read>(stream: R, mut forward: impl FnMut(&str)) -> io::Result<usize> {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut lines = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(lines);
        }
        let line = String::from_utf8_lossy(&buf);
        forward(line.trim_end_matches(['\n', '\r']));
        lines += 1;
    }
}

fn join_drain(joined: thread::Result<io::Result<usize>>, stream: &str) -> usize {
    match joined {
        Ok(Ok(lines)) => lines,
        Ok(Err(e)) => {
            warn!("Error reading {}: {}", stream, e);
            0
        }
        Err(_) => {
            warn!("Reader thread for {} panicked", stream);
            0
        }
    }
}
