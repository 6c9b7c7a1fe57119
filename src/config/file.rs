//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::TransformationKind;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".obfuscation-impact.toml";

/// Placeholder replaced with the artifact a tool reads
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced with the artifact a tool writes
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// obfuscation-impact configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Extension of source artifacts to collect (without the dot)
    #[serde(rename = "source-extension", default = "default_source_extension")]
    pub source_extension: String,

    /// Extension of compiled artifacts (without the dot)
    #[serde(rename = "compiled-extension", default = "default_compiled_extension")]
    pub compiled_extension: String,

    /// Directory receiving transformed artifacts, one subdirectory per kind
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Compiler producing baselines
    #[serde(default = "default_compiler", deserialize_with = "compiler_command")]
    pub compiler: ToolCommand,

    /// Structural/trace analyzer
    #[serde(default = "default_extractor", deserialize_with = "extractor_command")]
    pub extractor: ToolCommand,

    /// Transformation tools
    #[serde(default)]
    pub transformers: TransformerSettings,
}

/// An external program and its argument template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCommand {
    /// Program name or path
    pub program: String,

    /// Arguments; `{input}` and `{output}` are substituted per invocation
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command from a program and argument template
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Substitute placeholders for one invocation
    ///
    /// Without an output path, `{output}` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use obfuscation_impact::config::ToolCommand;
    /// use std::path::Path;
    ///
    /// let cmd = ToolCommand::new("proguard", &["-injars", "{input}", "-outjars", "{output}"]);
    /// let args = cmd.expand_args(Path::new("A.class"), Some(Path::new("out/A.class")));
    /// assert_eq!(args, ["-injars", "A.class", "-outjars", "out/A.class"]);
    /// ```
    pub fn expand_args(&self, input: &Path, output: Option<&Path>) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.map(|p| p.to_string_lossy());

        self.args
            .iter()
            .map(|arg| {
                let arg = arg.replace(INPUT_PLACEHOLDER, &input);
                match output {
                    Some(ref out) => arg.replace(OUTPUT_PLACEHOLDER, out),
                    None => arg,
                }
            })
            .collect()
    }

    fn uses(&self, placeholder: &str) -> bool {
        self.args.iter().any(|arg| arg.contains(placeholder))
    }
}

/// A command table as written; `args` falls back to the tool's template
#[derive(Deserialize)]
struct PartialCommand {
    program: String,
    args: Option<Vec<String>>,
}

impl PartialCommand {
    fn or_template(self, template: ToolCommand) -> ToolCommand {
        ToolCommand {
            program: self.program,
            args: self.args.unwrap_or(template.args),
        }
    }
}

fn compiler_command<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<ToolCommand, D::Error> {
    Ok(PartialCommand::deserialize(d)?.or_template(default_compiler()))
}

fn extractor_command<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<ToolCommand, D::Error> {
    Ok(PartialCommand::deserialize(d)?.or_template(default_extractor()))
}

/// Settings for both transformation tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialTransformerSettings")]
pub struct TransformerSettings {
    /// JShrink settings
    pub jshrink: TransformerCommand,

    /// ProGuard settings
    pub proguard: TransformerCommand,
}

#[derive(Deserialize)]
struct PartialTransformerSettings {
    jshrink: Option<PartialTransformer>,
    proguard: Option<PartialTransformer>,
}

/// A transformer table as written; a missing command keeps the kind's default
#[derive(Deserialize)]
struct PartialTransformer {
    #[serde(default = "default_true")]
    enabled: bool,
    command: Option<PartialCommand>,
}

impl PartialTransformer {
    fn or_default(partial: Option<Self>, default: TransformerCommand) -> TransformerCommand {
        let Some(partial) = partial else {
            return default;
        };
        TransformerCommand {
            enabled: partial.enabled,
            command: match partial.command {
                Some(command) => command.or_template(default.command),
                None => default.command,
            },
        }
    }
}

impl From<PartialTransformerSettings> for TransformerSettings {
    fn from(partial: PartialTransformerSettings) -> Self {
        Self {
            jshrink: PartialTransformer::or_default(partial.jshrink, default_jshrink()),
            proguard: PartialTransformer::or_default(partial.proguard, default_proguard()),
        }
    }
}

impl Default for TransformerSettings {
    fn default() -> Self {
        Self {
            jshrink: default_jshrink(),
            proguard: default_proguard(),
        }
    }
}

/// One transformation tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformerCommand {
    /// Whether this transformation is attempted
    pub enabled: bool,

    /// Program and argument template
    pub command: ToolCommand,
}

fn default_source_extension() -> String {
    "java".to_string()
}

fn default_compiled_extension() -> String {
    "class".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("obfuscated")
}

fn default_compiler() -> ToolCommand {
    ToolCommand::new("javac", &[INPUT_PLACEHOLDER])
}

fn default_extractor() -> ToolCommand {
    ToolCommand::new("class-metrics", &["--json", INPUT_PLACEHOLDER])
}

fn default_jshrink() -> TransformerCommand {
    TransformerCommand {
        enabled: true,
        command: ToolCommand::new(
            "jshrink",
            &["--input", INPUT_PLACEHOLDER, "--output", OUTPUT_PLACEHOLDER],
        ),
    }
}

fn default_proguard() -> TransformerCommand {
    TransformerCommand {
        enabled: true,
        command: ToolCommand::new(
            "proguard",
            &[
                "-injars",
                INPUT_PLACEHOLDER,
                "-outjars",
                OUTPUT_PLACEHOLDER,
                "-dontwarn",
            ],
        ),
    }
}

fn default_true() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            compiled_extension: default_compiled_extension(),
            output_dir: default_output_dir(),
            compiler: default_compiler(),
            extractor: default_extractor(),
            transformers: TransformerSettings::default(),
        }
    }
}

impl ConfigFile {
    /// Settings for one transformation kind; `None` for the baseline kind
    pub fn transformer(&self, kind: TransformationKind) -> Option<&TransformerCommand> {
        match kind {
            TransformationKind::None => None,
            TransformationKind::JShrink => Some(&self.transformers.jshrink),
            TransformationKind::ProGuard => Some(&self.transformers.proguard),
        }
    }

    /// Enabled transformation kinds, in attempt order
    pub fn enabled_transformers(&self) -> Vec<(TransformationKind, &TransformerCommand)> {
        TransformationKind::ATTEMPT_ORDER
            .into_iter()
            .filter_map(|kind| self.transformer(kind).map(|t| (kind, t)))
            .filter(|(_, t)| t.enabled)
            .collect()
    }

    /// Validate the configuration
    ///
    /// Ensures extensions are usable and every program is named. The
    /// compiler and extractor must be handed `{input}`; enabled transformers
    /// also need `{output}`.
    pub fn validate(&self) -> Result<()> {
        for (name, ext) in [
            ("source-extension", &self.source_extension),
            ("compiled-extension", &self.compiled_extension),
        ] {
            if ext.is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            if ext.starts_with('.') {
                anyhow::bail!("{} must not start with a dot (got '{}')", name, ext);
            }
        }

        if self.source_extension == self.compiled_extension {
            anyhow::bail!(
                "source-extension and compiled-extension are both '{}'; cleanup would delete sources",
                self.source_extension
            );
        }

        for (table, command) in [("compiler", &self.compiler), ("extractor", &self.extractor)] {
            if command.program.trim().is_empty() {
                anyhow::bail!("[{}] program cannot be empty", table);
            }
            if !command.uses(INPUT_PLACEHOLDER) {
                anyhow::bail!("[{}] args must contain {}", table, INPUT_PLACEHOLDER);
            }
        }

        for (kind, transformer) in self.enabled_transformers() {
            let command = &transformer.command;
            if command.program.trim().is_empty() {
                anyhow::bail!("[transformers.{}] program cannot be empty", kind.as_str());
            }
            for placeholder in [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER] {
                if !command.uses(placeholder) {
                    anyhow::bail!(
                        "[transformers.{}] args must contain {}",
                        kind.as_str(),
                        placeholder
                    );
                }
            }
        }

        Ok(())
    }
}
