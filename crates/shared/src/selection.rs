//! Model file selection for the VRM analyzer.

use std::path::PathBuf;

use crate::error::PanelError;
use crate::metrics;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["vrm", "glb"];

/// A file handed over by the drop zone or the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Where to read the bytes from for upload
    pub path: Option<PathBuf>,
}

impl ModelFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn size_label(&self) -> String {
        metrics::format_mib(self.size_bytes)
    }
}

/// Case-insensitive `.vrm` / `.glb` check on the file name.
pub fn is_supported_model_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// MIME type for a model file name when the source did not report one.
pub fn infer_mime_type(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".glb") {
        "model/gltf-binary"
    } else if lower.ends_with(".vrm") {
        "model/vrm"
    } else {
        "application/octet-stream"
    }
}

/// The currently selected model file, if any.
#[derive(Debug, Default)]
pub struct FileSelection {
    current: Option<ModelFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `file` if its name is supported.
    ///
    /// Unsupported files leave the selection untouched.
    pub fn offer(&mut self, file: ModelFile) -> Result<&ModelFile, PanelError> {
        if !is_supported_model_name(&file.name) {
            return Err(PanelError::InvalidFileSelection { name: file.name });
        }
        Ok(&*self.current.insert(file))
    }

    pub fn current(&self) -> Option<&ModelFile> {
        self.current.as_ref()
    }
}
