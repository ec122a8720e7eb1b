use std::fmt;

/// Provider-side reference to uploaded audio, usable as a transcription input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadUrl(String);

impl UploadUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UploadUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
