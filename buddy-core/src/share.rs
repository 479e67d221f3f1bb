//! Sharing and exporting a finished idea.
//!
//! Sharing goes through a [`ShareTarget`], which reports up front whether it
//! can accept a payload. The PDF export is a stub that only returns a notice.

use crate::error::{Error, Result};
use crate::summary;
use crate::types::AppIdea;
use std::path::PathBuf;

/// Title attached to every shared idea
pub const SHARE_TITLE: &str = "My App Idea";

/// Notice shown instead of a PDF export
pub const EXPORT_NOTICE: &str = "PDF download functionality would be implemented here";

/// Text handed to a share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    /// Summary followed by the build prompt
    pub fn for_idea(idea: &AppIdea) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!(
                "{}\n\n{}: {}",
                summary::describe(idea),
                summary::PROMPT_LABEL,
                summary::build_prompt(idea)
            ),
        }
    }
}

/// Somewhere a payload can be sent.
pub trait ShareTarget {
    /// Capability check; `false` means [`ShareTarget::send`] must not be called
    fn is_available(&self) -> bool;

    /// Deliver the payload, returning a short confirmation for the user
    fn send(&self, payload: &SharePayload) -> Result<String>;
}

/// Share `idea` through `target`, or report that sharing is unavailable.
pub fn share(target: &dyn ShareTarget, idea: &AppIdea) -> Result<String> {
    if !target.is_available() {
        tracing::info!("Share target unavailable");
        return Err(Error::ShareUnavailable(
            "no share target on this system".to_string(),
        ));
    }
    target.send(&SharePayload::for_idea(idea))
}

/// Notice returned by the PDF export stub
pub fn export_pdf(_idea: &AppIdea) -> &'static str {
    EXPORT_NOTICE
}

/// Writes shared ideas as text files into a directory.
#[derive(Debug, Clone)]
pub struct FileShareTarget {
    dir: PathBuf,
}

impl FileShareTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ShareTarget for FileShareTarget {
    fn is_available(&self) -> bool {
        std::fs::create_dir_all(&self.dir).is_ok()
    }

    fn send(&self, payload: &SharePayload) -> Result<String> {
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S%3f");
        let path = self.dir.join(format!("app-idea-{}.txt", stamp));
        std::fs::write(&path, format!("{}\n\n{}\n", payload.title, payload.text))?;

        tracing::info!(path = %path.display(), "Shared idea to file");
        Ok(format!("Shared to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl ShareTarget for Unavailable {
        fn is_available(&self) -> bool {
            false
        }

        fn send(&self, _payload: &SharePayload) -> Result<String> {
            panic!("send must not be called when unavailable");
        }
    }

    fn idea() -> AppIdea {
        [("problem", "Lost keys"), ("audience", "commuters")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_payload_joins_summary_and_prompt() {
        let payload = SharePayload::for_idea(&idea());
        assert_eq!(payload.title, "My App Idea");
        assert!(payload.text.starts_with("Your app aims to solve the problem of lost keys"));
        let prompt = "\n\nPrompt for ChatAndBuild: Create an app that solves Lost keys for commuters";
        assert!(payload.text.ends_with(prompt));
    }

    #[test]
    fn test_unavailable_target_is_reported() {
        assert!(matches!(
            share(&Unavailable, &idea()),
            Err(Error::ShareUnavailable(_))
        ));
    }

    #[test]
    fn test_file_target_writes_payload() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = FileShareTarget::new(dir.path().join("shared"));

        let notice = share(&target, &idea()).unwrap();
        assert!(notice.starts_with("Shared to "));

        let files: Vec<_> = std::fs::read_dir(dir.path().join("shared"))
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
        let written = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert!(written.starts_with("My App Idea\n\n"));
    }

    #[test]
    fn test_export_is_a_notice() {
        assert_eq!(export_pdf(&idea()), EXPORT_NOTICE);
    }
}
