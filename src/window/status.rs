use std::fs;
use std::path::PathBuf;

use tracing::debug;

/// Plain-text side channel for external consumers (status bars):
/// `focused.workspace` holds the 1-based index of the visible workspace,
/// `occupied.workspace` a comma-separated ascending list of 1-based indices
/// of workspaces with at least one window. Both rewritten in full on every
/// relevant change. An unwritable location is a silent no-op.
pub struct StatusFiles {
    dir: Option<PathBuf>,
}

impl StatusFiles {
    pub fn new() -> Self {
        Self {
            dir: dirs::home_dir().map(|h| h.join(".wm")),
        }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    pub fn write_focused(&self, ws: usize) {
        self.write("focused.workspace", format!("{}\n", ws + 1));
    }

    pub fn write_occupied(&self, occupied: &[usize]) {
        let list = occupied
            .iter()
            .map(|ws| (ws + 1).to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.write("occupied.workspace", format!("{list}\n"));
    }

    fn write(&self, name: &str, contents: String) {
        let Some(dir) = &self.dir else {
            return;
        };
        if let Err(e) = fs::create_dir_all(dir) {
            debug!("skipping status file {name}: {e}");
            return;
        }
        if let Err(e) = fs::write(dir.join(name), contents) {
            debug!("skipping status file {name}: {e}");
        }
    }
}

impl Default for StatusFiles {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_based_focused_index() {
        let dir = tempfile::tempdir().unwrap();
        let status = StatusFiles::with_dir(dir.path().to_path_buf());
        status.write_focused(0);
        let got = fs::read_to_string(dir.path().join("focused.workspace")).unwrap();
        assert_eq!(got, "1\n");

        status.write_focused(8);
        let got = fs::read_to_string(dir.path().join("focused.workspace")).unwrap();
        assert_eq!(got, "9\n");
    }

    #[test]
    fn writes_comma_separated_occupied_list() {
        let dir = tempfile::tempdir().unwrap();
        let status = StatusFiles::with_dir(dir.path().to_path_buf());
        status.write_occupied(&[0, 3, 8]);
        let got = fs::read_to_string(dir.path().join("occupied.workspace")).unwrap();
        assert_eq!(got, "1,4,9\n");

        status.write_occupied(&[]);
        let got = fs::read_to_string(dir.path().join("occupied.workspace")).unwrap();
        assert_eq!(got, "\n");
    }
}
