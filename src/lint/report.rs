//! Terminal output for lint reports

use std::io::{self, Write};

use super::LintReport;

/// ANSI color codes used in the report
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub header: &'static str,
    pub file: &'static str,
    pub ok: &'static str,
    pub warning: &'static str,
    pub fail: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const COLOR: Palette = Palette {
        header: "\x1b[95m",
        file: "\x1b[94m",
        ok: "\x1b[92m",
        warning: "\x1b[93m",
        fail: "\x1b[91m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Palette = Palette {
        header: "",
        file: "",
        ok: "",
        warning: "",
        fail: "",
        reset: "",
    };

    /// Colors unless disabled explicitly or through `NO_COLOR`
    pub fn detect(no_color: bool) -> Palette {
        if no_color || std::env::var_os("NO_COLOR").is_some() {
            Palette::PLAIN
        } else {
            Palette::COLOR
        }
    }
}

pub fn write_header<W: Write>(out: &mut W, p: &Palette) -> io::Result<()> {
    writeln!(
        out,
        "{}🔍 STARTING SEO PRE-FLIGHT CHECK...{}",
        p.header, p.reset
    )
}

/// Print every file that has findings, then the pass/fail footer
pub fn write_report<W: Write>(out: &mut W, report: &LintReport, p: &Palette) -> io::Result<()> {
    write_header(out, p)?;

    for file in report.files.iter().filter(|f| !f.is_clean()) {
        writeln!(out)?;
        writeln!(out, "📄 {}{}{}", p.file, file.file_name, p.reset)?;
        for err in &file.errors {
            writeln!(out, "   ❌ {}{}{}", p.fail, err, p.reset)?;
        }
        for warn in &file.warnings {
            writeln!(out, "   ⚠️  {}{}{}", p.warning, warn, p.reset)?;
        }
    }

    writeln!(out, "{}", "-".repeat(30))?;
    if report.has_errors() {
        writeln!(
            out,
            "{}⛔ SEO CHECK FAILED. COMMIT REJECTED.{}",
            p.fail, p.reset
        )?;
        writeln!(out, "Fix the ❌ errors above to proceed.")?;
    } else {
        writeln!(out, "{}✅ SEO CHECK PASSED. Code is compliant.{}", p.ok, p.reset)?;
    }

    Ok(())
}
