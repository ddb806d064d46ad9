use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash (`-path`, `-rep=x`).
const LONG_FLAGS: &[&str] = &[
    "path", "branch", "rep", "govendor", "json", "verbose", "quiet", "help", "version",
];

/// Rewrite single-dash long flags into the `--flag` form clap expects, so
/// invocations written for the `flag`-package style keep working.
/// Everything after a bare `--` is left alone.
pub(crate) fn normalize_long_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        match single_dash_long(text) {
            Some(rest) => out.push(OsString::from(format!("--{rest}"))),
            None => out.push(arg),
        }
    }
    out
}

fn single_dash_long(arg: &str) -> Option<&str> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name).then_some(rest)
}
