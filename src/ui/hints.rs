//! Hint text suggesting the next action.

/// Hint after a dependency could not be found.
pub fn after_not_found(name: &str) -> String {
    format!(
        "Run `extdep resolve {} --verbose` to see why each strategy failed.",
        name
    )
}

/// Hint when `check` finds nothing to check.
pub fn no_dependencies_configured() -> &'static str {
    "Declare dependencies under `dependencies:` in .extdep/config.yml."
}

/// Hint after the compiler could not be identified.
pub fn compiler_not_identified(env_var: &str) -> String {
    format!(
        "Set {} or pass --compiler-id to choose the compiler explicitly.",
        env_var
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_hint_names_dependency() {
        assert!(after_not_found("lapack").contains("extdep resolve lapack"));
    }

    #[test]
    fn no_dependencies_hint_mentions_config() {
        assert!(no_dependencies_configured().contains(".extdep/config.yml"));
    }

    #[test]
    fn compiler_hint_names_variable() {
        assert!(compiler_not_identified("FC").contains("FC"));
    }
}
