//! Script directory adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ScriptError, ScriptSource};

/// Extension that marks a file as a script
const SCRIPT_EXTENSION: &str = "md";

/// Markdown scripts stored in one directory
pub struct ScriptDirectory {
    root: PathBuf,
}

impl ScriptDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_script(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
    }
}

#[async_trait]
impl ScriptSource for ScriptDirectory {
    async fn list(&self) -> Result<Vec<String>, ScriptError> {
        let location = self.root.display().to_string();
        let list_failed = |e: std::io::Error| ScriptError::ListFailed {
            location: location.clone(),
            message: e.to_string(),
        };

        let mut entries = fs::read_dir(&self.root).await.map_err(list_failed)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
            let path = entry.path();
            let is_file = fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file || !Self::is_script(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(ScriptError::NoScripts(location));
        }

        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<String, ScriptError> {
        fs::read_to_string(self.root.join(name))
            .await
            .map_err(|e| ScriptError::ReadFailed {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_markdown_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b-outro.md"), "Bye").unwrap();
        std::fs::write(dir.path().join("a-intro.md"), "Hi").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let scripts = ScriptDirectory::new(dir.path());
        let names = scripts.list().await.unwrap();

        assert_eq!(names, vec!["a-intro.md", "b-outro.md"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn lists_symlinked_scripts() {
        let shared = TempDir::new().unwrap();
        std::fs::write(shared.path().join("intro.md"), "Hi").unwrap();
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(shared.path().join("intro.md"), dir.path().join("intro.md"))
            .unwrap();
        std::os::unix::fs::symlink(shared.path(), dir.path().join("linked.md")).unwrap();

        let scripts = ScriptDirectory::new(dir.path());

        assert_eq!(scripts.list().await.unwrap(), vec!["intro.md"]);
    }

    #[tokio::test]
    async fn empty_directory_has_no_scripts() {
        let dir = TempDir::new().unwrap();
        let scripts = ScriptDirectory::new(dir.path());

        assert!(matches!(scripts.list().await, Err(ScriptError::NoScripts(_))));
    }

    #[tokio::test]
    async fn missing_directory_fails_listing() {
        let scripts = ScriptDirectory::new("/nonexistent/take-prompter/scripts");

        assert!(matches!(
            scripts.list().await,
            Err(ScriptError::ListFailed { .. })
        ));
    }

    #[tokio::test]
    async fn reads_script_content() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("demo.md"), "# Demo\n\nHello").unwrap();
        let scripts = ScriptDirectory::new(dir.path());

        assert_eq!(scripts.read("demo.md").await.unwrap(), "# Demo\n\nHello");
        assert!(matches!(
            scripts.read("missing.md").await,
            Err(ScriptError::ReadFailed { .. })
        ));
    }
}
