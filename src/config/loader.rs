//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::ImpactError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `.obfuscation-impact.toml` from the given directory
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use obfuscation_impact::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Compiling with {}", config.compiler.program);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(dir: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load from a directory with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read {}", CONFIG_FILE_NAME));
            }
        };

        Self::parse(&contents, &config_path)
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_file(path: &Path) -> Result<ConfigFile> {
        Self::load_file_with_fs(path, &RealFileSystem)
    }

    /// Load an explicitly named config file with a custom filesystem
    pub fn load_file_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| ImpactError::ConfigNotFound {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<ConfigFile> {
        let config: ConfigFile = toml_edit::de::from_str(contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate().map_err(|e| ImpactError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to `.obfuscation-impact.toml` in the given directory
    pub fn save(config: &ConfigFile, dir: &Path) -> Result<()> {
        Self::save_with_fs(config, dir, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(config: &ConfigFile, dir: &Path, fs: &FS) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    /// Check if a config file exists in the directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
        written_content: Arc<Mutex<Option<String>>>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
                written_content: Arc::new(Mutex::new(None)),
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                ..Self::new()
            }
        }

        fn with_read_error() -> Self {
            Self {
                should_fail_read: true,
                ..Self::new()
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            let contents = String::from_utf8_lossy(contents.as_ref()).to_string();
            *self.written_content.lock().unwrap() = Some(contents);
            Ok(())
        }

        fn metadata(&self, _path: &Path) -> io::Result<std::fs::Metadata> {
            unimplemented!()
        }

        fn read_dir(&self, _path: &Path) -> io::Result<std::fs::ReadDir> {
            unimplemented!()
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }

        fn remove_file(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigLoader::load_with_fs(Path::new("."), &MockFileSystem::new()).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_read_error_is_reported() {
        let result = ConfigLoader::load_with_fs(Path::new("."), &MockFileSystem::with_read_error());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let fs = MockFileSystem::with_content(
            r#"
output-dir = "build/obf"

[compiler]
program = "ecj"
args = ["-d", "build", "{input}"]

[transformers.proguard]
enabled = false

[transformers.proguard.command]
program = "proguard"
"#,
        );

        let config = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap();

        assert_eq!(config.output_dir, Path::new("build/obf"));
        assert_eq!(config.compiler.program, "ecj");
        assert_eq!(config.compiler.args, ["-d", "build", "{input}"]);
        assert_eq!(config.source_extension, "java");
        assert!(!config.transformers.proguard.enabled);
        assert!(config.transformers.jshrink.enabled);
    }

    #[test]
    fn test_disabling_a_transformer_needs_no_command() {
        let fs = MockFileSystem::with_content("[transformers.proguard]\nenabled = false\n");

        let config = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap();

        assert!(!config.transformers.proguard.enabled);
        assert_eq!(config.transformers.proguard.command.program, "proguard");
        assert!(config.transformers.jshrink.enabled);
    }

    #[test]
    fn test_compiler_program_only_gets_input_argument() {
        let fs = MockFileSystem::with_content("[compiler]\nprogram = \"/opt/jdk/bin/javac\"\n");

        let config = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap();

        assert_eq!(
            config.compiler.expand_args(Path::new("/w/A.java"), None),
            ["/w/A.java"]
        );
    }

    #[test]
    fn test_extractor_args_without_input_are_rejected() {
        let fs = MockFileSystem::with_content(
            "[extractor]\nprogram = \"class-metrics\"\nargs = [\"--json\"]\n",
        );
        let err = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap_err();
        let impact = err.downcast_ref::<ImpactError>().unwrap();
        assert!(matches!(impact, ImpactError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let fs = MockFileSystem::with_content("source-extension = [");
        let err = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_semantically_invalid_config_is_rejected() {
        let fs = MockFileSystem::with_content(
            r#"
source-extension = "class"
compiled-extension = "class"
"#,
        );
        let err = ConfigLoader::load_with_fs(Path::new("."), &fs).unwrap_err();
        let impact = err.downcast_ref::<ImpactError>().unwrap();
        assert!(matches!(impact, ImpactError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_config_not_found() {
        let err =
            ConfigLoader::load_file_with_fs(Path::new("custom.toml"), &MockFileSystem::new())
                .unwrap_err();
        let impact = err.downcast_ref::<ImpactError>().unwrap();
        assert!(matches!(impact, ImpactError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_save_then_load_preserves_config() {
        let fs = MockFileSystem::new();
        let mut config = ConfigFile::default();
        config.transformers.jshrink.enabled = false;

        ConfigLoader::save_with_fs(&config, Path::new("."), &fs).unwrap();
        let written = fs.written_content.lock().unwrap().clone().unwrap();
        assert!(written.contains("jshrink"));

        let reloaded =
            ConfigLoader::load_with_fs(Path::new("."), &MockFileSystem::with_content(&written))
                .unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_exists_with_tempdir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));
        ConfigLoader::save(&ConfigFile::default(), temp.path()).unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }
}
