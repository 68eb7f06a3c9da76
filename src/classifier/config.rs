use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    /// Artifact directory; `None` means bypass mode.
    pub model_path: Option<PathBuf>,
}

impl ClassifierConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
        }
    }

    pub fn bypass() -> Self {
        Self { model_path: None }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
