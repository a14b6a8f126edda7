//! Launch-command composition.
//!
//! Pure helpers that build the literal process-launch command from the
//! configured base command, an optional named variant, and the project
//! root. Variants only ever affect fresh launches; a running session keeps
//! the command it was started with.

use std::collections::HashMap;
use std::path::Path;

use crate::config::ShellSettings;

/// Result of looking a variant name up in the configured table.
///
/// `NotFound` is not an error: it means "use the base command".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantLookup<'a> {
    Found(&'a str),
    NotFound,
}

/// Look up a named variant's extra arguments. Empty names are `NotFound`.
pub fn lookup_variant<'a>(name: &str, table: &'a HashMap<String, String>) -> VariantLookup<'a> {
    if name.is_empty() {
        return VariantLookup::NotFound;
    }
    match table.get(name) {
        Some(args) => VariantLookup::Found(args.as_str()),
        None => VariantLookup::NotFound,
    }
}

/// Compose the final launch command from a base command and a variant.
///
/// Total: an empty or unknown variant name degrades to the base command.
pub fn compose(base: &str, variant: &str, table: &HashMap<String, String>) -> String {
    match lookup_variant(variant, table) {
        VariantLookup::Found(args) => format!("{base} {args}"),
        VariantLookup::NotFound => base.to_string(),
    }
}

/// Wrap a command so it executes from the project root and returns:
/// `pushd <root> && <command> && popd`, with the separator and directory
/// commands taken from `[shell]` settings.
pub fn wrap_for_root(command: &str, root: &Path, shell: &ShellSettings) -> String {
    format!(
        "{} {} {} {} {} {}",
        shell.pushd,
        shell_escape(&root.display().to_string()),
        shell.separator,
        command,
        shell.separator,
        shell.popd,
    )
}

/// Escape a string for safe shell use.
///
/// Wraps the string in single quotes and escapes embedded single quotes
/// using the `'\''` technique (end quote, escaped quote, start quote).
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_variant_is_a_no_op() {
        assert_eq!(compose("claude", "", &HashMap::new()), "claude");
    }

    #[test]
    fn unknown_variant_is_a_no_op() {
        let t = table(&[("x", "y")]);
        assert_eq!(compose("claude", "missing", &t), "claude");
    }

    #[test]
    fn known_variant_appends_its_arguments() {
        let t = table(&[("v", "--flag")]);
        assert_eq!(compose("claude", "v", &t), "claude --flag");
    }

    #[test]
    fn lookup_is_an_explicit_sum_type() {
        let t = table(&[("continue", "--continue")]);
        assert_eq!(
            lookup_variant("continue", &t),
            VariantLookup::Found("--continue")
        );
        assert_eq!(lookup_variant("", &t), VariantLookup::NotFound);
        assert_eq!(lookup_variant("nope", &t), VariantLookup::NotFound);
    }

    #[test]
    fn wrap_for_root_uses_shell_settings() {
        let shell = ShellSettings::default();
        let wrapped = wrap_for_root("claude", Path::new("/tmp/proj"), &shell);
        assert_eq!(wrapped, "pushd '/tmp/proj' && claude && popd");
    }

    #[test]
    fn shell_escape_quotes_embedded_quotes() {
        assert_eq!(shell_escape("hello"), "'hello'");
        assert_eq!(shell_escape("it's"), "'it'\\''s'");
    }
}
