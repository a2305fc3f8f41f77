//! Best-effort sandbox for student submissions.
//!
//! The submission is parsed and (if parseable) executed inside an isolated
//! Node `vm` context driven by a small harness script in a spawned
//! subprocess. The context exposes a capture-only `console` and a
//! self-aliased `globalThis`, and nothing else — no filesystem or network
//! capability is injected. Two timeouts bound the run: the interpreter's own
//! vm budget, and an outer wall-clock limit on the whole subprocess for
//! hangs the vm timeout cannot interrupt.
//!
//! Every outcome is advisory diagnostic data. Nothing here throws past the
//! boundary and nothing here ever changes a grade.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Default interpreter budget for the executed submission, in milliseconds.
pub const VM_TIMEOUT_MS: u64 = 800;

/// Extra wall-clock allowance on top of the vm budget, covering interpreter
/// startup and teardown.
const WALL_CLOCK_GRACE_MS: u64 = 2_000;

const HARNESS: &str = include_str!("harness.js");

/// Result of the parse-only check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub ok: bool,
    /// Stack text of the parse failure when `ok` is false.
    pub error: Option<String>,
}

/// Result of an isolated execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Console output captured inside the sandbox, one entry per call.
    pub logs: Vec<String>,
    /// Stack text of a thrown error or the timeout, when any occurred.
    pub runtime_error: Option<String>,
}

/// One JSON object printed by the harness on stdout.
#[derive(Debug, Deserialize)]
struct HarnessReply {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    logs: Option<Vec<String>>,
    #[serde(default, rename = "runtimeError")]
    runtime_error: Option<String>,
}

enum HarnessError {
    /// The subprocess exceeded the outer wall-clock limit.
    TimedOut(u64),
    /// The interpreter could not be launched or produced unusable output.
    Unavailable(String),
}

/// Parse the submission wrapped in an IIFE shell, without executing it.
///
/// `Err` means the sandbox itself is unavailable (e.g. no `node` on PATH),
/// not that the submission failed to parse.
pub async fn try_compile(source: &str) -> Result<CompileOutcome, String> {
    match invoke_harness("compile", source, VM_TIMEOUT_MS, "").await {
        Ok(reply) => Ok(CompileOutcome {
            ok: reply.ok.unwrap_or(false),
            error: reply.error,
        }),
        Err(HarnessError::TimedOut(ms)) => {
            Err(format!("Sandbox parse check timed out after {ms}ms"))
        }
        Err(HarnessError::Unavailable(msg)) => Err(msg),
    }
}

/// Execute the submission in the isolated context. Only meaningful after a
/// successful [`try_compile`].
pub async fn run_isolated(source: &str, timeout_ms: u64) -> Result<RunOutcome, String> {
    run_isolated_with(source, "", timeout_ms).await
}

/// Like [`run_isolated`], with a postlude snippet appended after the
/// submission inside the same wrapper (useful for probing declared
/// functions).
pub async fn run_isolated_with(
    source: &str,
    postlude: &str,
    timeout_ms: u64,
) -> Result<RunOutcome, String> {
    match invoke_harness("run", source, timeout_ms, postlude).await {
        Ok(reply) => Ok(RunOutcome {
            logs: reply.logs.unwrap_or_default(),
            runtime_error: reply.runtime_error,
        }),
        // A wall-clock timeout is a result, not a sandbox failure: the
        // submission hung (e.g. pending I/O the vm budget cannot interrupt).
        Err(HarnessError::TimedOut(ms)) => Ok(RunOutcome {
            logs: Vec::new(),
            runtime_error: Some(format!("Execution timed out after {ms}ms (wall clock)")),
        }),
        Err(HarnessError::Unavailable(msg)) => Err(msg),
    }
}

async fn invoke_harness(
    mode: &str,
    source: &str,
    vm_timeout_ms: u64,
    postlude: &str,
) -> Result<HarnessReply, HarnessError> {
    let dir = tempfile::tempdir()
        .map_err(|e| HarnessError::Unavailable(format!("Failed to create sandbox dir: {e}")))?;

    let harness_path = dir.path().join("harness.cjs");
    let source_path = dir.path().join("submission.js");
    let postlude_path = dir.path().join("postlude.js");
    write_input(&harness_path, HARNESS)?;
    write_input(&source_path, source)?;
    write_input(&postlude_path, postlude)?;

    let wall_clock_ms = vm_timeout_ms + WALL_CLOCK_GRACE_MS;
    let mut command = Command::new("node");
    command
        .arg(&harness_path)
        .arg(mode)
        .arg(&source_path)
        .arg(vm_timeout_ms.to_string())
        .arg(&postlude_path)
        .kill_on_drop(true);

    let output = match timeout(Duration::from_millis(wall_clock_ms), command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(HarnessError::Unavailable(format!(
                "Failed to launch sandbox interpreter: {e}"
            )));
        }
        Err(_) => return Err(HarnessError::TimedOut(wall_clock_ms)),
    };

    if output.stdout.is_empty() {
        return Err(HarnessError::Unavailable(format!(
            "Sandbox interpreter exited with {} and no reply: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    serde_json::from_slice(&output.stdout)
        .map_err(|e| HarnessError::Unavailable(format!("Unreadable sandbox reply: {e}")))
}

fn write_input(path: &Path, contents: &str) -> Result<(), HarnessError> {
    std::fs::write(path, contents).map_err(|e| {
        HarnessError::Unavailable(format!("Failed to stage sandbox input {}: {e}", path.display()))
    })
}
