//! Display formatting for names, parameters and uids

use std::sync::LazyLock;

use regex::Regex;

static NAME_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"module\.exports\.|\.prototype|\(\)").expect("name pattern is valid")
});

static UID_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.]+").expect("uid pattern is valid"));

/// `module.exports.parser()` → `parser`, `Foo.prototype.bar` → `Foo.bar`
pub(crate) fn format_name(content: &str) -> String {
    NAME_NOISE.replace_all(content, "").into_owned()
}

/// `[optional]` → `optional`
pub(crate) fn format_param(content: &str) -> String {
    content.replace(['[', ']'], "")
}

/// `index.js-module.exports.parser()` → `index.js-module.exports.parser`
pub(crate) fn format_uid(content: &str) -> String {
    let lowered = content.to_lowercase();
    UID_SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Join parameter names into a signature, nesting consecutive optional
/// parameters: `a, [b], [c]` → `a[, b, c]`.
pub(crate) fn join_params<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let joined = params
        .into_iter()
        .map(|(name, optional)| {
            let name = format_param(name);
            if optional {
                format!("[{}]", name)
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    joined.replace("], [", ", ").replacen(", [", "[, ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("module.exports.parser"), "parser");
        assert_eq!(format_name("History.prototype.push()"), "History.push");
        assert_eq!(format_name("emitEvent()"), "emitEvent");
    }

    #[test]
    fn test_format_param() {
        assert_eq!(format_param("[title]"), "title");
        assert_eq!(format_param("url"), "url");
    }

    #[test]
    fn test_format_uid() {
        assert_eq!(
            format_uid("wtc-history.js-History.push()"),
            "wtc-history.js-history.push"
        );
        assert_eq!(format_uid("index.js-Example String"), "index.js-example-string");
        assert_eq!(format_uid("--a  b--"), "a-b");
    }

    #[test]
    fn test_join_params() {
        assert_eq!(join_params([("url", false), ("title", false)]), "url, title");
        assert_eq!(join_params([("url", false), ("title", true)]), "url[, title]");
        assert_eq!(
            join_params([("url", false), ("title", true), ("state", true)]),
            "url[, title, state]"
        );
        assert_eq!(join_params([("devmode", true)]), "[devmode]");
        assert_eq!(join_params(Vec::<(&str, bool)>::new()), "");
    }
}
