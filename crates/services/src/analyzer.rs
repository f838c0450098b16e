//! The generation requests behind each dashboard panel.

use crate::prompts;
use crate::storage::{object_path, BlobStorage, UploadOptions, UploadRequest};
use anyhow::{anyhow, Context, Result};
use providers::{GenerateOptions, TextGenerator};
use shared::facts::{STEAM_FUNDING, STEAM_RELEASE};
use shared::results::{AiAnalysisResult, CommunityMetrics, VrmAnalysisResult};
use shared::selection::ModelFile;
use shared::settings::{AppSettings, GenerationLimits};
use std::sync::Arc;

/// Cheap to clone; every panel task gets its own handle.
#[derive(Clone)]
pub struct Analyzer {
    generator: Arc<dyn TextGenerator>,
    storage: Arc<dyn BlobStorage>,
    model: String,
    limits: GenerationLimits,
    object_prefix: String,
}

impl Analyzer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        storage: Arc<dyn BlobStorage>,
        settings: &AppSettings,
    ) -> Self {
        Self {
            generator,
            storage,
            model: settings.request_model.clone(),
            limits: settings.generation,
            object_prefix: settings.storage.object_prefix.clone(),
        }
    }

    fn options(&self, max_output_tokens: u32) -> GenerateOptions {
        GenerateOptions::new(&self.model, max_output_tokens)
    }

    pub async fn analyze_project(&self) -> Result<AiAnalysisResult> {
        let summary = self
            .generator
            .generate(
                &prompts::project_analysis_prompt(),
                &self.options(self.limits.analysis_max_tokens),
            )
            .await
            .context("project analysis failed")?;
        Ok(AiAnalysisResult::from_summary(summary))
    }

    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(anyhow!("question is empty"));
        }
        self.generator
            .generate(
                &prompts::chat_prompt(question),
                &self.options(self.limits.chat_max_tokens),
            )
            .await
            .context("question failed")
    }

    pub async fn analyze_community(&self) -> Result<CommunityMetrics> {
        let narrative = self
            .generator
            .generate(
                &prompts::community_prompt(&STEAM_FUNDING, &STEAM_RELEASE),
                &self.options(self.limits.community_max_tokens),
            )
            .await
            .context("community analysis failed")?;
        Ok(CommunityMetrics::from_narrative(narrative))
    }

    /// Upload the file, then ask for a compatibility write-up.
    pub async fn analyze_model_file(&self, file: &ModelFile) -> Result<VrmAnalysisResult> {
        let path = file
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("{} has no readable path", file.name))?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        let stored = self
            .storage
            .upload(
                UploadRequest {
                    path: object_path(&self.object_prefix, &file.name),
                    content_type: file.mime_type.clone(),
                    bytes,
                },
                UploadOptions { upsert: true },
            )
            .await?;

        let narrative = self
            .generator
            .generate(
                &prompts::model_file_prompt(file),
                &self.options(self.limits.model_file_max_tokens),
            )
            .await
            .context("model file analysis failed")?;

        Ok(VrmAnalysisResult::assess(
            file,
            narrative,
            Some(stored.public_url),
        ))
    }
}
