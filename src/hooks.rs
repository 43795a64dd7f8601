//! Font subsetting hook.
//!
//! Runs the `[hooks.fonts]` command after the charsets are written. The
//! command sees `$SITEBAKE_*` variables both in its environment and, as
//! literal tokens, in its arguments.

use crate::config::SiteConfig;
use crate::utils::exec::Cmd;
use anyhow::Result;
use rustc_hash::FxHashMap;

/// Build `$SITEBAKE_*` environment variables for hook execution
pub fn build_vars(config: &SiteConfig) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();
    vars.insert("SITEBAKE_ROOT".into(), config.get_root().display().to_string());
    vars.insert(
        "SITEBAKE_CHARSETS".into(),
        config.charsets.output.display().to_string(),
    );
    vars.insert(
        "SITEBAKE_OUTPUT".into(),
        config.paths.output.display().to_string(),
    );
    vars
}

/// Replace `$SITEBAKE_XXX` tokens in command arguments.
///
/// Longer names are substituted first so `$SITEBAKE_ROOT` never eats the
/// prefix of a longer variable.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<_> = vars.keys().collect();
    keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

    args.iter()
        .map(|arg| {
            keys.iter().fold(arg.clone(), |acc, key| {
                acc.replace(&format!("${key}"), &vars[key.as_str()])
            })
        })
        .collect()
}

/// Run the fonts hook if enabled.
pub fn run_fonts_hook(config: &SiteConfig) -> Result<()> {
    let hook = &config.hooks.fonts;
    if !hook.enable || hook.command.is_empty() {
        return Ok(());
    }

    let vars = build_vars(config);
    let resolved = resolve_args(&hook.command, &vars);
    let cwd = hook.cwd.as_deref().unwrap_or_else(|| config.get_root());

    if !hook.quiet {
        crate::log!("fonts"; "`{}` running", hook.display_name());
    }

    let output = Cmd::from_slice(&resolved)
        .cwd(cwd)
        .envs(&vars)
        .quiet(hook.quiet)
        .run()?;

    if !hook.quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_resolve_args() {
        let mut vars = FxHashMap::default();
        vars.insert("SITEBAKE_CHARSETS".into(), "/site/fonts/charsets".into());
        vars.insert("SITEBAKE_ROOT".into(), "/site".into());

        let args = vec![
            "subset".into(),
            "--text-file=$SITEBAKE_CHARSETS/cjk.txt".into(),
            "$SITEBAKE_ROOT/fonts".into(),
        ];
        assert_eq!(
            resolve_args(&args, &vars),
            ["subset", "--text-file=/site/fonts/charsets/cjk.txt", "/site/fonts"]
        );
    }

    #[test]
    fn test_disabled_hook_is_noop() {
        let config = test_parse_config("[hooks.fonts]\ncommand = [\"false\"]");
        run_fonts_hook(&config).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_hook_runs_in_cwd_with_vars() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = test_parse_config(
            r#"
[hooks.fonts]
enable = true
quiet = true
command = ["sh", "-c", "echo $SITEBAKE_CHARSETS > seen.txt"]
"#,
        );
        config.root = dir.path().to_path_buf();
        config.charsets.output = dir.path().join("charsets");
        config.hooks.fonts.cwd = Some(dir.path().join("fonts"));
        std::fs::create_dir(dir.path().join("fonts")).unwrap();

        run_fonts_hook(&config).unwrap();

        let seen = std::fs::read_to_string(dir.path().join("fonts/seen.txt")).unwrap();
        assert_eq!(seen.trim(), dir.path().join("charsets").display().to_string());
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_hook_is_error() {
        let mut config = test_parse_config("[hooks.fonts]\nenable = true\ncommand = [\"false\"]");
        config.root = std::env::temp_dir();
        assert!(run_fonts_hook(&config).is_err());
    }
}
