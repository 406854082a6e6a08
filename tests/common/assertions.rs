//! Domain-specific assertion macros for logfan harnesses.
//!
//! These wrap `pretty_assertions` and say which pipeline invariant was
//! violated instead of dumping two opaque `Result`s.

/// Assert that a `TrackingResult` is a record with the given message, format
/// and source path.
///
/// ```rust
/// assert_record!(result, "hello", LogFormat::FirstFormat, &path);
/// ```
#[macro_export]
macro_rules! assert_record {
    ($result:expr, $message:expr, $format:expr, $path:expr) => {{
        let result: &logfan::TrackingResult = &$result;
        match result {
            Ok(record) => {
                pretty_assertions::assert_eq!(record.message, $message, "record message");
                pretty_assertions::assert_eq!(record.format, $format, "record format");
                pretty_assertions::assert_eq!(
                    record.source_path.as_path(),
                    std::path::Path::new($path),
                    "record source path"
                );
            }
            Err(err) => panic!("assert_record! failed: expected a record, got error: {err}"),
        }
    }};
}

/// Assert that a `TrackingResult` is a parse error for the given format and
/// raw line.
#[macro_export]
macro_rules! assert_line_error {
    ($result:expr, $format:expr, $line:expr) => {{
        let result: &logfan::TrackingResult = &$result;
        match result {
            Err(err) => {
                pretty_assertions::assert_eq!(err.format(), $format, "error format");
                pretty_assertions::assert_eq!(err.line(), $line, "error line");
            }
            Ok(record) => panic!(
                "assert_line_error! failed: expected an error, got record {:?}",
                record
            ),
        }
    }};
}

/// Messages of the successful results from one source file, in arrival order.
pub fn messages_from(results: &[logfan::TrackingResult], path: &std::path::Path) -> Vec<String> {
    results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter(|record| record.source_path == path)
        .map(|record| record.message.clone())
        .collect()
}
