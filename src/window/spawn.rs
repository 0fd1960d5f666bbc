use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Fire-and-forget program launch; the child is never waited on and a
/// failure only produces a log line.
pub fn spawn(argv: &[String]) {
    let Some((program, args)) = argv.split_first() else {
        return;
    };
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => debug!("spawned {} (pid {})", program, child.id()),
        Err(e) => warn!("failed to spawn {}: {}", program, e),
    }
}

/// Runs `~/.local/bin/autolaunch.sh` at startup if it exists and is
/// executable.
pub fn autolaunch() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let script = home.join(".local/bin/autolaunch.sh");
    let executable = {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            script
                .metadata()
                .map(|m| m.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
        }
        #[cfg(not(unix))]
        {
            script.is_file()
        }
    };
    if executable {
        spawn(&[script.to_string_lossy().into_owned()]);
    }
}
