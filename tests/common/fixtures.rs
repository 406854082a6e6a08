//! Static log corpora used across harnesses.

/// Well-formed `first_format` lines.
pub const FIRST_FORMAT_LINES: &[&str] = &[
    "Feb 1, 2018 at 3:04:05pm (UTC) | hello",
    "Feb 1, 2018 at 3:04:06pm (UTC) | user 42 logged in",
    "Mar 12, 2019 at 11:00:00am (GMT) | cache warmed in 380ms",
    "Dec 31, 2020 at 11:59:59pm (UTC) | year rolled over",
];

/// Well-formed `second_format` lines (year, day, month).
pub const SECOND_FORMAT_LINES: &[&str] = &[
    "2018-02-01T15:04:05Z | hello",
    "2018-02-01T15:04:06Z | job queued id=7",
    "2019-31-12T23:59:59Z | job finished id=7",
];

/// Lines that are not two fields separated by `" | "`.
pub const WRONG_FIELD_COUNT_LINES: &[&str] = &[
    "garbage",
    "",
    "Feb 1, 2018 at 3:04:05pm (UTC) | a | b",
    "Feb 1, 2018 at 3:04:05pm (UTC)|no spaces",
];

/// Lines with the right shape but an unparseable `first_format` timestamp.
pub const BAD_TIMESTAMP_LINES: &[&str] = &[
    "yesterday | hello",
    "Feb 30, 2018 at 3:04:05pm (UTC) | no such day",
    "Feb 1, 2018 at 13:04:05pm (UTC) | hour out of range",
    "2018-02-01T15:04:05Z | wrong format",
];

/// A numbered `first_format` line, one second apart per index.
pub fn first_format_line(i: usize) -> String {
    format!(
        "Feb 1, 2018 at 3:{:02}:{:02}pm (UTC) | line {i}",
        i / 60 % 60,
        i % 60
    )
}

/// A numbered `second_format` line.
pub fn second_format_line(i: usize) -> String {
    format!(
        "2018-02-01T15:{:02}:{:02}Z | line {i}",
        i / 60 % 60,
        i % 60
    )
}
