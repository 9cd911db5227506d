use service_core::error::AppError;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_DOCUMENT: &str = include_str!("../../assets/personal_info.txt");

/// The static document describing the site owner, used as the only grounding
/// context for answers. Cheap to clone; never mutated after load.
#[derive(Debug, Clone)]
pub struct PersonalInfo(Arc<str>);

impl PersonalInfo {
    pub fn builtin() -> Self {
        Self(Arc::from(BUILTIN_DOCUMENT.trim()))
    }

    /// Read the document from `path`, or fall back to the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read personal info document {}: {}",
                path.display(),
                e
            ))
        })?;

        let contents = contents.trim();
        if contents.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Personal info document {} is empty",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), bytes = contents.len(), "Loaded personal info document");
        Ok(Self(Arc::from(contents)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonalInfo {
    fn from(text: &str) -> Self {
        Self(Arc::from(text))
    }
}
