use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when
/// the variable is unset; a placeholder without a default for an unset
/// variable is an error. Expansion happens on the raw config text
/// before deserialization, so the config structs stay plain typed
/// fields. TOML comment lines pass through untouched.
pub fn expand_env(input: &str) -> Result<String, String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("valid regex")
    });

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for caps in re.captures_iter(line) {
            let whole = caps.get(0).expect("group 0 always present");
            output.push_str(&line[cursor..whole.start()]);

            let key = &caps[1];
            let fallback = caps.get(2).map(|m| m.as_str());
            output.push_str(&resolve(key, fallback)?);

            cursor = whole.end();
        }
        output.push_str(&line[cursor..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

/// Look up an `env.VAR` key, falling back to the placeholder default
fn resolve(key: &str, fallback: Option<&str>) -> Result<String, String> {
    let Some(var) = key.strip_prefix("env.") else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };
    if var.contains('.') {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    }

    match std::env::var(var) {
        Ok(value) => Ok(value),
        Err(_) => fallback
            .map(str::to_owned)
            .ok_or_else(|| format!("environment variable not found: `{var}`")),
    }
}
