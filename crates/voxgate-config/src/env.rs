use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// A `default("...")` filter supplies the value when the variable is unset.
/// Comment lines are copied through untouched so a commented-out key never
/// demands its variable.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut failure = None;

    let expanded = PLACEHOLDER.replace_all(line, |captures: &Captures<'_>| {
        let default = captures.get(2).map(|m| m.as_str());

        resolve(&captures[1], default).unwrap_or_else(|e| {
            failure.get_or_insert(e);
            String::new()
        })
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match std::env::var(var_name) {
        Ok(value) => Ok(value),
        Err(_) => default
            .map(str::to_owned)
            .ok_or_else(|| format!("environment variable not found: `{var_name}`")),
    }
}
