//! Environment probe - debug override detection and image classification.
//!
//! Both flags are sampled once at startup and stay fixed for the life of
//! the process. Classification reads the version descriptor directly
//! instead of shelling out to grep/sed, so there is no locale or quoting
//! behavior to worry about.

use crate::config::Config;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Marker token identifying a production build in the descriptor
const PRODUCTION_MARKER: &str = "PROD";

/// Startup flags, fixed for the life of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Operator-set override forcing the check on any image
    pub debug_override: bool,
    /// Whether this build is subject to mandatory validation
    pub is_production: bool,
}

impl Flags {
    /// Probe the environment once at startup
    pub fn detect(config: &Config) -> Self {
        let debug_override = file_exists(&config.paths.debug_override);
        if debug_override {
            info!(
                "Debug override file {} exists, forcing sanity check",
                config.paths.debug_override
            );
        }

        let is_production = is_production_image(config);

        Self { debug_override, is_production }
    }
}

/// Existence test only. I/O errors count as absent.
pub fn file_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check whether this is a production image.
///
/// Tries the configured descriptor paths in order. When no descriptor can
/// be found or read, the configured policy decides the classification
/// (fail-closed by default, forcing the wait/check path).
pub fn is_production_image(config: &Config) -> bool {
    let Some(descriptor) = config
        .paths
        .version_descriptors
        .iter()
        .find(|p| file_exists(p))
    else {
        error!(
            "Version descriptor not found (tried {:?})",
            config.paths.version_descriptors
        );
        return config.policy.missing_descriptor_is_production;
    };

    let content = match fs::read_to_string(descriptor) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read version descriptor {}: {}", descriptor, e);
            return config.policy.missing_descriptor_is_production;
        }
    };

    let is_prod = image_class(&content).as_deref() == Some(PRODUCTION_MARKER);
    if is_prod {
        info!("Production image detected, sanity check active");
    } else {
        info!("Debug/VBN image detected");
    }

    is_prod
}

/// Extract the classification token from descriptor content.
///
/// The descriptor carries `key:value` or `key=value` lines; the value of
/// the `imagename` key is underscore-delimited and the second field is the
/// build classification (e.g. `XB3_PROD_sey` -> `PROD`).
pub fn image_class(content: &str) -> Option<String> {
    let line = content.lines().find(|l| l.starts_with("imagename"))?;
    let value = line
        .strip_prefix("imagename:")
        .or_else(|| line.strip_prefix("imagename="))?;
    value.split('_').nth(1).map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_descriptor(dir: &TempDir, content: Option<&str>) -> Config {
        let descriptor = dir.path().join("version.txt");
        if let Some(content) = content {
            fs::write(&descriptor, content).unwrap();
        }
        let mut config = Config::default();
        config.paths.version_descriptors = vec![descriptor.to_string_lossy().into_owned()];
        config.paths.debug_override = dir
            .path()
            .join("forceFSC")
            .to_string_lossy()
            .into_owned();
        config
    }

    #[test]
    fn test_image_class_colon_separator() {
        assert_eq!(
            image_class("imagename:XB3_PROD_sey\nversion:1.2.3\n"),
            Some("PROD".to_string())
        );
    }

    #[test]
    fn test_image_class_equals_separator() {
        assert_eq!(
            image_class("imagename=XB3_DEV_sey\n"),
            Some("DEV".to_string())
        );
    }

    #[test]
    fn test_image_class_ignores_other_lines() {
        assert_eq!(
            image_class("version:1.0\nbuild:42\nimagename:GW_VBN\n"),
            Some("VBN".to_string())
        );
    }

    #[test]
    fn test_image_class_no_second_token() {
        assert_eq!(image_class("imagename:monolithic\n"), None);
    }

    #[test]
    fn test_image_class_missing_key() {
        assert_eq!(image_class("version:1.0\n"), None);
    }

    #[test]
    fn test_production_descriptor() {
        let dir = TempDir::new().unwrap();
        let config = config_with_descriptor(&dir, Some("imagename:XB3_PROD_sey\n"));
        assert!(is_production_image(&config));
    }

    #[test]
    fn test_debug_descriptor() {
        let dir = TempDir::new().unwrap();
        let config = config_with_descriptor(&dir, Some("imagename:XB3_DEV_sey\n"));
        assert!(!is_production_image(&config));
    }

    #[test]
    fn test_missing_descriptor_fails_closed() {
        let dir = TempDir::new().unwrap();
        let config = config_with_descriptor(&dir, None);
        assert!(is_production_image(&config));
    }

    #[test]
    fn test_missing_descriptor_policy_override() {
        let dir = TempDir::new().unwrap();
        let mut config = config_with_descriptor(&dir, None);
        config.policy.missing_descriptor_is_production = false;
        assert!(!is_production_image(&config));
    }

    #[test]
    fn test_descriptor_fallback_order() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("missing.txt");
        let secondary = dir.path().join("version.txt");
        fs::write(&secondary, "imagename:GW_PROD\n").unwrap();

        let mut config = Config::default();
        config.paths.version_descriptors = vec![
            primary.to_string_lossy().into_owned(),
            secondary.to_string_lossy().into_owned(),
        ];
        assert!(is_production_image(&config));
    }

    #[test]
    fn test_flags_detect_override() {
        let dir = TempDir::new().unwrap();
        let config = config_with_descriptor(&dir, Some("imagename:XB3_DEV_sey\n"));
        fs::write(&config.paths.debug_override, "").unwrap();

        let flags = Flags::detect(&config);
        assert!(flags.debug_override);
        assert!(!flags.is_production);
    }

    #[test]
    fn test_file_exists_on_missing_path() {
        assert!(!file_exists("/nonexistent/forceFSC"));
    }
}
