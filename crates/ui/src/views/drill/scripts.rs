/// Resolves after `ms` milliseconds. Also yields to the renderer when `ms`
/// is zero.
pub(super) fn sleep_script(ms: i64) -> String {
    format!("await new Promise((resolve) => setTimeout(resolve, {ms})); return true;")
}

pub(super) fn focus_script(target: &str) -> String {
    format!("document.getElementById({target:?})?.focus();")
}
