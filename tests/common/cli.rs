//! Runner for the `bags` binary.

use assert_cmd::Command;
use serde_json::Value;

use super::fixtures::TestWorkspace;

/// A `bags` command isolated to `ws`. Its config and store live in the
/// workspace and logging is off, so stderr only carries errors.
#[must_use]
pub fn bags(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("bags").expect("bags binary not built");
    cmd.env_remove("BAGS_FORMAT")
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .env("BAGS_CONFIG", ws.path().join("bag_types.yaml"))
        .env("BAGS_DB", ws.db_path())
        .current_dir(ws.path());
    cmd
}

/// Parse the stdout of a finished command as JSON.
#[must_use]
pub fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(text.trim())
        .unwrap_or_else(|_| panic!("Failed to parse JSON:\n{text}"))
}
