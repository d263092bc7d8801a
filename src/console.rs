//! Operator-facing progress lines on stdout
//!
//! Use the `log_action!`, `log_success!` and `log_failure!` macros; they take
//! the same arguments as `format!`. A leading `to: writer,` sends the line to
//! that writer instead of stdout and returns the `io::Result`.

use std::fmt;
use std::io::{self, Write};

pub const ACTION: &str = "✚";
pub const SUCCESS: &str = "✔";
pub const FAILURE: &str = "✗";

/// Something is about to happen
pub fn action(args: fmt::Arguments<'_>) {
    report(ACTION, args);
}

/// Something finished
pub fn success(args: fmt::Arguments<'_>) {
    report(SUCCESS, args);
}

/// Something went wrong
pub fn failure(args: fmt::Arguments<'_>) {
    report(FAILURE, args);
}

fn report(glyph: &str, args: fmt::Arguments<'_>) {
    // Nothing sensible to do if stdout is gone
    let _ = write_line(&mut io::stdout().lock(), glyph, args);
}

/// Write one `<glyph> <message>` line
pub fn write_line<W: Write + ?Sized>(out: &mut W, glyph: &str, args: fmt::Arguments<'_>) -> io::Result<()> {
    writeln!(out, "{glyph} {args}")
}

#[macro_export]
macro_rules! log_action {
    (to: $out:expr, $($arg:tt)*) => {
        $crate::console::write_line($out, $crate::console::ACTION, ::std::format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::console::action(::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_success {
    (to: $out:expr, $($arg:tt)*) => {
        $crate::console::write_line($out, $crate::console::SUCCESS, ::std::format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::console::success(::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_failure {
    (to: $out:expr, $($arg:tt)*) => {
        $crate::console::write_line($out, $crate::console::FAILURE, ::std::format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::console::failure(::std::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(glyph: &str, args: fmt::Arguments<'_>) -> String {
        let mut out = Vec::new();
        write_line(&mut out, glyph, args).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lines_carry_distinct_glyphs() {
        let name = "flux";
        assert_eq!(line(ACTION, format_args!("installing {name}")), "✚ installing flux\n");
        assert_eq!(line(SUCCESS, format_args!("{name} ready")), "✔ flux ready\n");
        assert_eq!(line(FAILURE, format_args!("{}: {}", name, 1)), "✗ flux: 1\n");
    }

    #[test]
    fn test_macros_write_glyph_lines() {
        let mut out = Vec::new();
        crate::log_action!(to: &mut out, "checking {}", "macros").unwrap();
        crate::log_success!(to: &mut out, "plain message").unwrap();
        crate::log_failure!(to: &mut out, "code {code}", code = 1).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✚ checking macros\n✔ plain message\n✗ code 1\n"
        );
    }

    #[test]
    fn test_failure_macro_keeps_error_chain() {
        let err = anyhow::anyhow!("connection refused").context("failed to build client");
        let mut out = Vec::new();
        crate::log_failure!(to: &mut out, "{err:#}").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✗ failed to build client: connection refused\n"
        );
    }
}
