//! Shared display helpers for resolution results.
//!
//! Used by `resolve` and `check` so a dependency renders the same way in
//! both.

use crate::dependency::ResolutionResult;
use crate::ui::UserInterface;

/// Space-joined arguments, or `(none)`.
pub fn format_args(args: &[String]) -> String {
    if args.is_empty() {
        "(none)".to_string()
    } else {
        args.join(" ")
    }
}

/// One-line summary of a result.
pub fn summary_line(result: &ResolutionResult) -> String {
    match (result.version(), result.source()) {
        (Some(version), Some(source)) if result.is_found() => {
            format!("Found {} {} via {}", result.name(), version, source)
        }
        _ => format!("{} not found", result.name()),
    }
}

/// Print the flags of a found dependency.
pub fn show_flags(ui: &mut dyn UserInterface, result: &ResolutionResult) {
    ui.show_detail("Compile args", &format_args(result.compile_args()));
    ui.show_detail("Link args", &format_args(result.link_args()));
}

/// List the probes that did not find the dependency (verbose only).
pub fn show_failures(ui: &mut dyn UserInterface, result: &ResolutionResult) {
    if !ui.output_mode().shows_diagnostics() {
        return;
    }
    ui.show_detail("Attempted", &result.attempted_summary());
    for failure in result.failures() {
        ui.message(&format!("  - {}: {}", failure.target, failure.reason));
    }
}

/// Print a full resolution result.
pub fn show_resolution(ui: &mut dyn UserInterface, result: &ResolutionResult) {
    if result.is_found() {
        ui.success(&summary_line(result));
        show_flags(ui, result);
    } else {
        ui.warning(&summary_line(result));
    }
    show_failures(ui, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{FoundDependency, NotFoundReason, ProbeFailure, Strategy};
    use crate::ui::{MockUI, OutputMode};

    fn found() -> ResolutionResult {
        ResolutionResult::found(
            "lapack",
            FoundDependency {
                compile_args: vec![],
                link_args: vec!["-llapack".into(), "-lblas".into()],
                version: "3.9.0".into(),
                source: Strategy::Registry,
            },
            vec![],
        )
    }

    fn missing() -> ResolutionResult {
        ResolutionResult::not_found(
            "zlib",
            vec![ProbeFailure {
                strategy: Strategy::Registry,
                target: "pkg-config:zlib".into(),
                reason: NotFoundReason::Unavailable {
                    tool: "pkg-config".into(),
                },
            }],
        )
    }

    #[test]
    fn empty_args_render_as_none() {
        assert_eq!(format_args(&[]), "(none)");
        assert_eq!(format_args(&["-la".into(), "-lb".into()]), "-la -lb");
    }

    #[test]
    fn found_shows_flags() {
        let mut ui = MockUI::new();
        show_resolution(&mut ui, &found());

        assert!(ui.has_success("Found lapack 3.9.0 via registry"));
        assert_eq!(ui.detail("Compile args"), Some("(none)"));
        assert_eq!(ui.detail("Link args"), Some("-llapack -lblas"));
        assert!(ui.detail("Attempted").is_none());
    }

    #[test]
    fn missing_is_a_warning() {
        let mut ui = MockUI::new();
        show_resolution(&mut ui, &missing());

        assert!(ui.has_warning("zlib not found"));
        assert!(ui.detail("Link args").is_none());
    }

    #[test]
    fn verbose_lists_failures() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        show_resolution(&mut ui, &missing());

        assert_eq!(ui.detail("Attempted"), Some("registry"));
        assert!(ui.has_message("pkg-config:zlib"));
    }
}
