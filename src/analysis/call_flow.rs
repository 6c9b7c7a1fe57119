//! Call-trace parsing and rendering
//!
//! Structural analyzers report the observed call flow as a bracketed,
//! comma-separated list such as `[main, Greeter.greet, System.out.println]`.
//! The list is parsed into a [`CallTrace`] once, where the extractor output
//! is read, and only turned back into text by the reporter.

/// Ordered call-site identifiers observed from an artifact's entry point
///
/// An empty trace is a legitimate state: helper and utility types have no
/// entry point to trace from.
///
/// # Examples
///
/// ```
/// use obfuscation_impact::analysis::CallTrace;
///
/// let trace = CallTrace::parse("[main, helper,  print]");
/// assert_eq!(trace.sites(), ["main", "helper", "print"]);
/// assert_eq!(trace.render(), "main\nhelper\nprint\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTrace {
    sites: Vec<String>,
}

impl CallTrace {
    /// Build a trace from already separated call-site identifiers
    pub fn new(sites: Vec<String>) -> Self {
        Self { sites }
    }

    /// Parse the bracketed, comma-separated form reported by analyzers
    ///
    /// Bracket characters and all whitespace are removed, then the text is
    /// split on commas. Tokens keep their original order and are neither
    /// deduplicated nor validated. Trailing empty tokens are dropped, so
    /// `"[]"` and `""` both parse to an empty trace.
    pub fn parse(raw: &str) -> Self {
        let compact: String = raw
            .chars()
            .filter(|c| !matches!(c, '[' | ']') && !c.is_whitespace())
            .collect();

        if compact.is_empty() {
            return Self::default();
        }

        let mut sites: Vec<String> = compact.split(',').map(str::to_string).collect();
        while sites.last().is_some_and(|site| site.is_empty()) {
            sites.pop();
        }

        Self { sites }
    }

    /// Call-site identifiers in observed order
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Number of call sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True when no call sites were recorded
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// True when the rendered trace has visible content
    pub fn is_traceable(&self) -> bool {
        self.sites.iter().any(|site| !site.trim().is_empty())
    }

    /// One call site per line, each followed by a newline
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.sites.iter().map(|s| s.len() + 1).sum());
        for site in &self.sites {
            out.push_str(site);
            out.push('\n');
        }
        out
    }

    /// Re-frame the trace in the analyzer's bracketed form
    pub fn to_bracketed(&self) -> String {
        format!("[{}]", self.sites.join(", "))
    }
}

/// Normalize a raw bracketed trace into its line-per-call-site form
///
/// Normalization is not idempotent on its own output: rendered text has
/// lost its commas, so feeding it back in joins every line into a single
/// token. Re-frame with [`CallTrace::to_bracketed`] first.
pub fn normalize(raw: &str) -> String {
    CallTrace::parse(raw).render()
}
