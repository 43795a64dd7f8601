//! Source rewrites applied to the concatenated script bundle.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `exports.DEBUG = <value>;` on its own line, maybe with a `//` comment.
static DEBUG_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)exports\.DEBUG\s*=\s*[^;\n]+;?[ \t]*(?://[^\n]*)?$").unwrap()
});

/// `Object.defineProperty(exports, 'DEBUG', {value: <value>});` on its own line.
static DEBUG_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^([ \t]*)Object\.defineProperty\(\s*exports\s*,\s*['"]DEBUG['"]\s*,\s*\{\s*value\s*:\s*[^}\s]+\s*\}\s*\)\s*;?[ \t]*(?://[^\n]*)?$"#,
    )
    .unwrap()
});

static BUILD_REMOVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*<BUILD_REMOVAL>\*/.*?/\*</BUILD_REMOVAL>\*/").unwrap()
});

/// Force the debug flag to `false`, whichever form declares it.
pub fn disable_debug(source: &str) -> String {
    let source = DEBUG_ASSIGN.replace_all(source, "${1}exports.DEBUG = false;");
    DEBUG_DEFINE
        .replace_all(&source, "${1}Object.defineProperty(exports, 'DEBUG', {value: false});")
        .into_owned()
}

/// Remove every `/*<BUILD_REMOVAL>*/ ... /*</BUILD_REMOVAL>*/` region.
pub fn strip_build_removals(source: &str) -> Cow<'_, str> {
    BUILD_REMOVAL.replace_all(source, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_assignment() {
        let src = "(function (exports) {\n  exports.DEBUG = true;\n})(this);\n";
        assert_eq!(
            disable_debug(src),
            "(function (exports) {\n  exports.DEBUG = false;\n})(this);\n"
        );
    }

    #[test]
    fn test_debug_assignment_any_value() {
        assert_eq!(disable_debug("exports.DEBUG=!0"), "exports.DEBUG = false;");
        assert_eq!(disable_debug("exports.DEBUG = 1;"), "exports.DEBUG = false;");
    }

    #[test]
    fn test_debug_trailing_comment() {
        assert_eq!(
            disable_debug("exports.DEBUG = true; // on\nrun();\n"),
            "exports.DEBUG = false;\nrun();\n"
        );
        assert_eq!(
            disable_debug("Object.defineProperty(exports, 'DEBUG', {value: true}); // dev"),
            "Object.defineProperty(exports, 'DEBUG', {value: false});"
        );
    }

    #[test]
    fn test_debug_define_property() {
        assert_eq!(
            disable_debug("Object.defineProperty(exports,'DEBUG',{value:true});"),
            "Object.defineProperty(exports, 'DEBUG', {value: false});"
        );
        assert_eq!(
            disable_debug("Object.defineProperty(exports, 'DEBUG', { value: true })"),
            "Object.defineProperty(exports, 'DEBUG', {value: false});"
        );
    }

    #[test]
    fn test_debug_inline_mentions_untouched() {
        let src = "if (exports.DEBUG) log();\nconst x = exports.DEBUG_LEVEL;\n";
        assert_eq!(disable_debug(src), src);
    }

    #[test]
    fn test_build_removal_multiline() {
        let src = "a();\n/*<BUILD_REMOVAL>*/\nb();\nc();\n/*</BUILD_REMOVAL>*/\nd();\n\
                   e(/*<BUILD_REMOVAL>*/f/*</BUILD_REMOVAL>*/);\n";
        assert_eq!(strip_build_removals(src), "a();\n\nd();\ne();\n");
    }

    #[test]
    fn test_build_removal_non_greedy() {
        let src = "/*<BUILD_REMOVAL>*/x/*</BUILD_REMOVAL>*/keep/*<BUILD_REMOVAL>*/y/*</BUILD_REMOVAL>*/";
        assert_eq!(strip_build_removals(src), "keep");
    }

    #[test]
    fn test_build_removal_unclosed_kept() {
        let src = "/*<BUILD_REMOVAL>*/ dangling";
        assert_eq!(strip_build_removals(src), src);
    }
}
