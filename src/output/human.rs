#![forbid(unsafe_code)]

//! Human-readable output for check results
//!
//! One line per value, marked ✓ or ✗, with the failing rules indented
//! beneath it, followed by a summary line.

use crate::engine::BatchResult;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter writing colored output
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write every result followed by a summary line
    pub fn write_results<W: WriteColor + ?Sized>(
        &self,
        out: &mut W,
        results: &[BatchResult],
    ) -> io::Result<()> {
        for result in results {
            self.write_result(out, result)?;
        }

        let invalid = results.iter().filter(|r| !r.is_valid()).count();
        writeln!(out)?;
        if invalid == 0 {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(out, "Check PASSED")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "Check FAILED")?;
        }
        out.reset()?;
        writeln!(
            out,
            ": {} value(s) checked, {} valid, {} invalid",
            results.len(),
            results.len() - invalid,
            invalid
        )
    }

    fn write_result<W: WriteColor + ?Sized>(
        &self,
        out: &mut W,
        result: &BatchResult,
    ) -> io::Result<()> {
        if result.is_valid() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "✓")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, "✗")?;
        }
        out.reset()?;
        writeln!(out, " {:?}", result.value)?;

        for failure in &result.failures {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, "    {}", failure.rule)?;
            out.reset()?;
            writeln!(out, ": {}", failure.message)?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}
