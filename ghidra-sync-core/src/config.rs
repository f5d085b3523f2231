use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SyncError};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_REPOSITORY: &str = "NationalSecurityAgency/ghidra";

/// Where to fetch from and where to write to. Relative local paths are resolved
/// against a root directory by [`SyncConfig::rooted_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub api_base: String,
    /// `owner/name` on the code host.
    pub repository: String,
    /// Branch, tag or commit; the default branch when unset.
    pub reference: Option<String>,
    pub decompiler: DecompilerConfig,
    pub processors: ProcessorsConfig,
}

/// Allow-list sync of the decompiler sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompilerConfig {
    pub remote_path: String,
    /// Local directories whose existing files get refreshed.
    pub targets: Vec<PathBuf>,
}

/// Full mirror of the processor definitions tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorsConfig {
    pub remote_path: String,
    pub output_dir: PathBuf,
    /// Extensions without the leading dot, compared case-insensitively.
    pub excluded_extensions: Vec<String>,
    pub max_depth: Option<usize>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            reference: None,
            decompiler: DecompilerConfig::default(),
            processors: ProcessorsConfig::default(),
        }
    }
}

impl Default for DecompilerConfig {
    fn default() -> Self {
        Self {
            remote_path: "Ghidra/Features/Decompiler/src/decompile/cpp".to_string(),
            targets: vec![
                PathBuf::from("dependencies/ghidra/src"),
                PathBuf::from("dependencies/ghidra/include"),
                PathBuf::from("dependencies/ghidra/parse"),
            ],
        }
    }
}

impl Default for ProcessorsConfig {
    fn default() -> Self {
        Self {
            remote_path: "Ghidra/Processors".to_string(),
            output_dir: PathBuf::from("."),
            excluded_extensions: vec!["java".to_string(), "gradle".to_string()],
            max_depth: None,
        }
    }
}

impl SyncConfig {
    /// Contents API URL for a repository-relative path. The reference, if any, is
    /// sent as a percent-encoded `ref` query parameter.
    pub fn listing_url(&self, remote_path: &str) -> Result<String> {
        let raw = format!(
            "{}/repos/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.repository.trim_matches('/'),
            remote_path.trim_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| SyncError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if let Some(reference) = self.reference.as_deref().filter(|r| !r.is_empty()) {
            url.query_pairs_mut().append_pair("ref", reference);
        }
        Ok(url.into())
    }

    /// Resolve every relative local path against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.decompiler.targets = self
            .decompiler
            .targets
            .into_iter()
            .map(|t| resolve(root, &t))
            .collect();
        self.processors.output_dir = resolve(root, &self.processors.output_dir);
        self
    }

    pub fn trace_loaded(&self) {
        info!(
            repository = %self.repository,
            reference = self.reference.as_deref().unwrap_or("<default branch>"),
            targets = self.decompiler.targets.len(),
            output_dir = %self.processors.output_dir.display(),
            "Loaded sync config"
        );
        debug!(?self, "Sync config loaded (full debug)");
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    let resolved: PathBuf = root
        .join(path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if resolved.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing_url_points_at_decompiler_sources() {
        let config = SyncConfig::default();
        assert_eq!(
            config.listing_url(&config.decompiler.remote_path).unwrap(),
            "https://api.github.com/repos/NationalSecurityAgency/ghidra/contents/Ghidra/Features/Decompiler/src/decompile/cpp"
        );
    }

    #[test]
    fn reference_is_appended_as_query() {
        let config = SyncConfig {
            api_base: "https://ghe.example.com/api/v3/".to_string(),
            reference: Some("Ghidra_11.0_build".to_string()),
            ..SyncConfig::default()
        };
        assert_eq!(
            config.listing_url("/Ghidra/Processors/").unwrap(),
            "https://ghe.example.com/api/v3/repos/NationalSecurityAgency/ghidra/contents/Ghidra/Processors?ref=Ghidra_11.0_build"
        );
    }

    #[test]
    fn reference_with_reserved_characters_is_encoded() {
        let config = SyncConfig {
            reference: Some("feature/a&b #1".to_string()),
            ..SyncConfig::default()
        };
        let url = config.listing_url("Ghidra/Processors").unwrap();
        assert_eq!(
            url,
            "https://api.github.com/repos/NationalSecurityAgency/ghidra/contents/Ghidra/Processors?ref=feature%2Fa%26b+%231"
        );
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("ref".to_string(), "feature/a&b #1".to_string())]);
    }

    #[test]
    fn unparseable_api_base_is_invalid_url() {
        let config = SyncConfig {
            api_base: "not a url".to_string(),
            ..SyncConfig::default()
        };
        let err = config.listing_url("cpp").unwrap_err();
        assert!(matches!(err, SyncError::InvalidUrl { .. }), "got {err:?}");
    }

    #[test]
    fn rooted_at_keeps_absolute_paths() {
        let mut config = SyncConfig::default();
        config.processors.output_dir = PathBuf::from("/abs/out");
        let config = config.rooted_at(Path::new("/work"));
        assert_eq!(config.processors.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(
            config.decompiler.targets[0],
            PathBuf::from("/work/dependencies/ghidra/src")
        );
    }

    #[test]
    fn default_output_dir_is_the_root_itself() {
        let config = SyncConfig::default().rooted_at(Path::new("/work"));
        assert_eq!(config.processors.output_dir, PathBuf::from("/work"));
    }
}
