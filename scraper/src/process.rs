use std::io::Read;
use std::process::{Child, Command, ExitStatus};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ScrapeError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything a finished child process left behind.
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs `cmd` to completion, giving up once `timeout` has elapsed.
///
/// Both pipes are drained on helper threads while the child runs, so output
/// larger than the pipe buffer cannot stall it. The deadline covers the whole
/// capture: a descendant still holding a pipe after the child exits counts
/// against it too. On unix the child leads its own process group, and on
/// timeout the whole group is killed and the child reaped before
/// `ScrapeError::Timeout` is returned.
pub fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> Result<CapturedOutput, ScrapeError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    own_process_group(&mut cmd);

    let mut child = cmd.spawn().map_err(|source| ScrapeError::Launch {
        program: program.clone(),
        source,
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => {
                terminate(&mut child);
                return Err(ScrapeError::Launch { program, source });
            }
        }

        let now = Instant::now();
        if now >= deadline {
            terminate(&mut child);
            return Err(ScrapeError::Timeout { program, timeout });
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    };

    let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
    else {
        terminate(&mut child);
        return Err(ScrapeError::Timeout { program, timeout });
    };

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            // a read error just truncates what was captured
            let _ = pipe.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
        rx
    })
}

/// Waits for a pipe to reach EOF, or `None` if the deadline passes first.
fn collect(pipe: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(rx) = pipe else {
        return Some(String::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(mpsc::RecvTimeoutError::Timeout) => None,
        Err(mpsc::RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

#[cfg(unix)]
fn own_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_cmd: &mut Command) {}

fn terminate(child: &mut Child) {
    kill_process_group(child);
    // kill fails only if the child already exited; wait reaps it either way
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    // the child was spawned with process_group(0), so its pid is the group id
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}
