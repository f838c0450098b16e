//! Native file dialog for choosing a model file.
//!
//! The dialog runs on its own thread; poll [`ModelFilePicker::try_take`]
//! each frame for the outcome.

use anyhow::{Context, Result};
use shared::selection::{infer_mime_type, ModelFile, SUPPORTED_EXTENSIONS};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Build a [`ModelFile`] from a path on disk. Size comes from metadata.
pub fn model_file_from_path(path: &Path) -> Result<ModelFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let size_bytes = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    let mime_type = infer_mime_type(&name);
    Ok(ModelFile::new(name, size_bytes, mime_type).with_path(path.to_path_buf()))
}

pub struct ModelFilePicker {
    title: String,
    start_dir: Option<PathBuf>,
    result_rx: Option<Receiver<Option<PathBuf>>>,
}

impl Default for ModelFilePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelFilePicker {
    pub fn new() -> Self {
        Self {
            title: "Choose a VRM model".to_string(),
            start_dir: None,
            result_rx: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = Some(dir);
        self
    }

    /// Open the dialog unless one is already showing.
    pub fn open(&mut self) {
        if self.is_picking() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.result_rx = Some(rx);

        let title = self.title.clone();
        let start_dir = self.start_dir.clone();
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new()
                .set_title(&title)
                .add_filter("VRM / GLB models", SUPPORTED_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            let _ = tx.send(dialog.pick_file());
        });
    }

    /// The chosen path once the dialog closes. Cancelling yields `None`.
    pub fn try_take(&mut self) -> Option<PathBuf> {
        let rx = self.result_rx.as_ref()?;
        match rx.try_recv() {
            Ok(picked) => {
                self.result_rx = None;
                picked
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.result_rx = None;
                None
            }
        }
    }

    pub fn is_picking(&self) -> bool {
        self.result_rx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_picker_starts_idle() {
        let mut picker = ModelFilePicker::new().with_title("Pick");
        assert_eq!(picker.title, "Pick");
        assert!(!picker.is_picking());
        assert!(picker.try_take().is_none());
    }

    #[test]
    fn test_model_file_from_path_reads_size_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Alice.GLB");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0u8; 4096]).unwrap();

        let file = model_file_from_path(&path).unwrap();
        assert_eq!(file.name, "Alice.GLB");
        assert_eq!(file.size_bytes, 4096);
        assert_eq!(file.mime_type, "model/gltf-binary");
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(model_file_from_path(Path::new("/definitely/not/here.vrm")).is_err());
    }
}
