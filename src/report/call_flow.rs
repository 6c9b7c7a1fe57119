//! Call-flow comparison section

use std::io::{self, Write};

use crate::pipeline::RunState;

/// Title printed above the section
pub const CALL_FLOW_TITLE: &str = "--- Call Flow Analysis ---";

/// Write the baseline and variant traces of every origin with variants
///
/// Origins whose baseline has no traceable entry point are skipped, since
/// helper types are not expected to have a call flow.
pub fn write_call_flow<W: Write>(out: &mut W, state: &RunState) -> io::Result<()> {
    writeln!(out, "{}", CALL_FLOW_TITLE)?;

    for (origin, variants) in state.variants() {
        let Some(baseline) = state.baseline(origin) else {
            continue;
        };
        if !baseline.call_flow.is_traceable() {
            continue;
        }

        writeln!(out, "--- File: {} ---", origin.display())?;
        writeln!(out, "Original Call Flow:")?;
        write!(out, "{}", baseline.call_flow.render())?;
        for variant in variants {
            writeln!(out, "Obfuscation Type: {}", variant.kind.label())?;
            writeln!(out, "Obfuscated Call Flow:")?;
            write!(out, "{}", variant.call_flow.render())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalyzedFile, CallTrace, TransformationKind};
    use std::path::PathBuf;

    fn record(origin: &str, kind: TransformationKind, flow: &str) -> AnalyzedFile {
        AnalyzedFile {
            origin_path: PathBuf::from(origin),
            file_name: "X.class".to_string(),
            kind,
            num_methods: 1,
            num_fields: 0,
            file_size: 1,
            cpool_size: 1,
            call_depth: 1,
            call_flow: CallTrace::parse(flow),
        }
    }

    fn render(state: &RunState) -> String {
        let mut out = Vec::new();
        write_call_flow(&mut out, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_section_lists_baseline_then_variants() {
        let mut state = RunState::new();
        state.record_baseline(record("/s/A.java", TransformationKind::None, "[main, run]"));
        state.record_variant(record("/s/A.java", TransformationKind::JShrink, "[main, a]"));

        assert_eq!(
            render(&state),
            "--- Call Flow Analysis ---\n\
             --- File: /s/A.java ---\n\
             Original Call Flow:\n\
             main\nrun\n\
             Obfuscation Type: JShrink\n\
             Obfuscated Call Flow:\n\
             main\na\n"
        );
    }

    #[test]
    fn test_untraceable_baseline_is_skipped() {
        let mut state = RunState::new();
        state.record_baseline(record("/s/Util.java", TransformationKind::None, "[]"));
        state.record_variant(record("/s/Util.java", TransformationKind::ProGuard, "[a]"));

        assert_eq!(render(&state), "--- Call Flow Analysis ---\n");
    }

    #[test]
    fn test_origin_without_variants_is_skipped() {
        let mut state = RunState::new();
        state.record_baseline(record("/s/A.java", TransformationKind::None, "[main]"));

        assert!(!render(&state).contains("--- File:"));
    }

    #[test]
    fn test_empty_variant_trace_prints_header_only() {
        let mut state = RunState::new();
        state.record_baseline(record("/s/A.java", TransformationKind::None, "[main]"));
        state.record_variant(record("/s/A.java", TransformationKind::ProGuard, ""));

        assert!(render(&state).ends_with("Obfuscated Call Flow:\n"));
    }
}
