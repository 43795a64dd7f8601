//! Placeholder reflow for minified stylesheets.
//!
//! Minifiers move a leading `/*placeholder*/` comment behind the value of a
//! custom property: `--x:/*p*/1;` comes out as `--x:1;/*p*/` (or `--x:1/*p*/`
//! before a closing brace). The reflow puts the comment back in front of the
//! value, inside the designated block only.

use crate::error::BuildError;
use regex::Regex;
use std::sync::LazyLock;

/// Property name, value with at most one trailing `;`, then the comment.
static DISPLACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(--[A-Za-z0-9_-]+:)([^;/}]+;?)(/\*.*?\*/)").unwrap());

/// Move displaced placeholders back in front of their values.
///
/// Only the first `selector{...}` block is touched. A stylesheet without that
/// block is a structural mismatch.
pub fn reflow_placeholders(css: &str, selector: &str) -> Result<String, BuildError> {
    let block = Regex::new(&format!(r"{}\{{[^}}]+\}}", regex::escape(selector)))
        .map_err(|e| BuildError::structural("<stylesheet>", format!("bad selector: {e}")))?;

    let Some(found) = block.find(css) else {
        return Err(BuildError::structural(
            "<stylesheet>",
            format!("no `{selector}{{...}}` block found"),
        ));
    };

    let reflowed = DISPLACED.replace_all(found.as_str(), "$1$3$2");

    let mut out = String::with_capacity(css.len());
    out.push_str(&css[..found.start()]);
    out.push_str(&reflowed);
    out.push_str(&css[found.end()..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_root_block() {
        let css = ":root{--a:1px/*A*/;--b:red/*B*/}body{color:red}";
        assert_eq!(
            reflow_placeholders(css, ":root").unwrap(),
            ":root{--a:/*A*/1px;--b:/*B*/red}body{color:red}"
        );
    }

    #[test]
    fn test_reflow_comment_after_semicolon() {
        let css = ":root{--a:1px;/*!A*/--b:red;/*!B*/}body{x:y}";
        assert_eq!(
            reflow_placeholders(css, ":root").unwrap(),
            ":root{--a:/*!A*/1px;--b:/*!B*/red;}body{x:y}"
        );
    }

    #[test]
    fn test_reflow_does_not_reach_into_neighbours() {
        // only `--b` carries a placeholder
        let css = ":root{--a:1px;--b:red;/*!B*/--c:0}";
        assert_eq!(
            reflow_placeholders(css, ":root").unwrap(),
            ":root{--a:1px;--b:/*!B*/red;--c:0}"
        );
    }

    #[test]
    fn test_reflow_leaves_outside_untouched() {
        let css = "a{--x:1/*X*/}:root{--y:2/*Y*/}p{--z:3/*Z*/}";
        assert_eq!(
            reflow_placeholders(css, ":root").unwrap(),
            "a{--x:1/*X*/}:root{--y:/*Y*/2}p{--z:3/*Z*/}"
        );
    }

    #[test]
    fn test_reflow_without_placeholders() {
        let css = ":root{--a:1px;--b:calc(1px + 2px)}";
        assert_eq!(reflow_placeholders(css, ":root").unwrap(), css);
    }

    #[test]
    fn test_reflow_multibyte_prefix() {
        let css = "/*页面*/:root{--font:\"思源\"/*F*/}";
        assert_eq!(
            reflow_placeholders(css, ":root").unwrap(),
            "/*页面*/:root{--font:/*F*/\"思源\"}"
        );
    }

    #[test]
    fn test_reflow_custom_selector() {
        let css = "html[data-theme]{--c:#fff/*C*/}";
        assert_eq!(
            reflow_placeholders(css, "html[data-theme]").unwrap(),
            "html[data-theme]{--c:/*C*/#fff}"
        );
    }

    #[test]
    fn test_reflow_missing_block() {
        let err = reflow_placeholders("body{color:red}", ":root").unwrap_err();
        assert!(matches!(err, BuildError::Structural { .. }));
        assert!(err.to_string().contains(":root"));
    }
}
