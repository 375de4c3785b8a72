pub mod alert_fmt;
pub mod history_fmt;
pub mod status_fmt;
pub mod table_fmt;

/// Drops control characters (C0, DEL and C1, which covers ESC and the
/// single-byte CSI `\u{9b}`) so untrusted text cannot drive the terminal.
/// Newlines are kept; callers flatten them as needed.
pub(crate) fn sanitize_terminal(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}
