use std::fmt;

/// Where the service is running. Decides the storage root: local runs
/// keep uploads next to the working directory, cloud runs use /tmp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Cloud,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "Local",
            Environment::Cloud => "Cloud",
        }
    }

    /// Hosting platforms signal themselves through `RENDER` /
    /// `RENDER_EXTERNAL_URL`; everything else counts as local.
    pub fn detect() -> Self {
        let flagged = std::env::var("RENDER")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);
        if flagged || std::env::var("RENDER_EXTERNAL_URL").is_ok() {
            Environment::Cloud
        } else {
            Environment::Local
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" | "render" => Ok(Self::Cloud),
            other => Err(format!(
                "Invalid environment: {}. Expected: local or cloud",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
