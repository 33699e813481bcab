//! PDF knowledge base loaded once at startup

use std::path::Path;

use thiserror::Error;

/// Errors raised while loading the knowledge base
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed
    #[error("Failed to extract PDF text: {0}")]
    Extraction(#[from] pdf_extract::OutputError),

    /// The extractor panicked or was cancelled
    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracted text of the knowledge PDF
///
/// Holds either the full text of every page or the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    text: String,
}

impl KnowledgeBase {
    /// Wrap already-extracted text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// An empty knowledge base
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and extract the PDF at `path`
    ///
    /// Never fails: a missing file, an unreadable file, or a corrupt PDF all
    /// yield an empty knowledge base and a log line.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::info!(
                path = %path.display(),
                "No PDF found. Bot will work without knowledge base"
            );
            return Self::empty();
        }

        match Self::try_load(path).await {
            Ok(knowledge) => {
                tracing::info!(
                    path = %path.display(),
                    chars = knowledge.text.chars().count(),
                    "Knowledge base loaded successfully"
                );
                knowledge
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Error extracting PDF");
                Self::empty()
            }
        }
    }

    async fn try_load(path: &Path) -> Result<Self, KnowledgeError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| KnowledgeError::Read {
                path: path.display().to_string(),
                source,
            })?;

        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes)).await??;
        Ok(Self { text })
    }

    /// The extracted text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether any text was extracted
    pub fn is_loaded(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Extract the text of every page, each followed by a newline
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, KnowledgeError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    text
}
