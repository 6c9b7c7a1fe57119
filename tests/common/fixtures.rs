//! Test fixture helpers
//!
//! Creates source trees and, on unix, shell scripts that stand in for the
//! compiler, the obfuscators and the analyzer.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a source file, creating parent directories
pub fn write_source(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// A workspace with a `src` tree, a `tools` directory and a config file
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("tools")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("analysis.toml")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("obfuscated")
    }

    /// Write an executable script into `tools/`
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root().join("tools").join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Install the scripted tools and write a config pointing at them
    ///
    /// - the compiler copies `X.java` to `X.class`
    /// - jshrink copies its input and appends one byte
    /// - proguard always fails
    /// - the analyzer reports one more field for jshrink variants
    #[cfg(unix)]
    pub fn install_fake_tools(&self) {
        let javac = self.script("javac", r#"cp "$1" "${1%.java}.class""#);
        let jshrink = self.script("jshrink", r#"cp "$2" "$4" && printf 'x' >> "$4""#);
        let proguard = self.script(
            "proguard",
            r#"echo "Error: no -keep options specified" >&2; exit 1"#,
        );
        let metrics = self.script(
            "class-metrics",
            r#"case "$2" in
  */jshrink/*) echo '{"structure":{"methods":2,"fields":2,"constant_pool":11},"call_depth":2,"call_flow":"[x, y]"}' ;;
  *Helper*) echo '{"structure":{"methods":1,"fields":0,"constant_pool":4},"call_depth":0,"call_flow":"[]"}' ;;
  *) echo '{"structure":{"methods":2,"fields":1,"constant_pool":9},"call_depth":2,"call_flow":"[x, y]"}' ;;
esac"#,
        );

        let config = format!(
            r#"output-dir = "{out}"

[compiler]
program = "{javac}"
args = ["{{input}}"]

[extractor]
program = "{metrics}"
args = ["--json", "{{input}}"]

[transformers.jshrink.command]
program = "{jshrink}"
args = ["--input", "{{input}}", "--output", "{{output}}"]

[transformers.proguard.command]
program = "{proguard}"
args = ["-injars", "{{input}}", "-outjars", "{{output}}"]
"#,
            out = self.output_dir().display(),
            javac = javac.display(),
            metrics = metrics.display(),
            jshrink = jshrink.display(),
            proguard = proguard.display(),
        );
        fs::write(self.config_path(), config).unwrap();
    }
}
