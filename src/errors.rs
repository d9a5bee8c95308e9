//! Error types for the evaluation tools.
//!
//! Malformed input fails the file (or kernel) it belongs to instead of being
//! coerced into NaN; the binaries report the failure and move on to the
//! remaining inputs.

// `error_chain!` expands to an `ErrorKind` enum whose internal `Msg` variant
// carries no doc comment, which trips the crate-level `#![deny(missing_docs)]`.
// The declared error variants below are all documented.
#![allow(missing_docs)]

error_chain! {
    errors {
        /// A required column is absent from a measurement table.
        MissingColumn(source: String, column: String) {
            description("required column is missing")
            display("{}: missing required column `{}`", source, column)
        }

        /// A field in a required column does not parse as a finite number.
        BadField(source: String, column: String, line: usize, value: String) {
            description("field is not a finite number")
            display(
                "{}: line {}, column `{}`: `{}` is not a finite number",
                source, line, column, value
            )
        }

        /// A derived column is already present in the table.
        DuplicateColumn(source: String, column: String) {
            description("column is already present")
            display("{}: column `{}` is already present", source, column)
        }

        /// A column cannot be min-max normalized because it does not span a
        /// range of values.
        DegenerateColumn(column: String, detail: String) {
            description("column does not span a value range")
            display("column `{}` cannot be normalized: {}", column, detail)
        }

        /// No row of a kernel's table matches the designated baseline
        /// configuration.
        MissingBaseline(kernel: String, core_freq: u32, memory_freq: u32) {
            description("baseline configuration was not measured")
            display(
                "kernel `{}`: no row matches the baseline configuration \
                 {} MHz core / {} MHz memory",
                kernel, core_freq, memory_freq
            )
        }

        /// Two tables cannot be combined because their shapes disagree.
        ShapeMismatch(detail: String) {
            description("tables cannot be combined")
            display("tables cannot be combined: {}", detail)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
    }
}

/// Logs an error and its chain of causes, one line each.
pub fn report(context: &str, err: &Error) {
    error!("{}: {}", context, err);
    for cause in err.iter().skip(1) {
        error!("caused by: {}", cause);
    }
}
