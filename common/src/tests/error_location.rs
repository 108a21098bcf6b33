use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: ErrorLocation is the foundation of the error reporting
/// across the whole link. If it fails to capture accurate location data, every
/// error message in the workspace loses its debugging value.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - `Location::caller()` stops being propagated correctly
/// - File path extraction breaks
/// - Line/column capture fails
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Two caller locations on consecutive statements
    let first = ErrorLocation::from(Location::caller());
    let second = ErrorLocation::from(Location::caller());

    // THEN: Both capture this file and the second is below the first
    assert!(
        first.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert!(second.line > first.line, "Lines should advance in order");
    assert!(first.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies that ErrorLocation Display formatting produces the expected format.
///
/// **WHY THIS MATTERS**: Locations are embedded in every error message. If the
/// format breaks, log lines lose the file/line breadcrumb operators grep for.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Display implementation drops the brackets
/// - File path, line, or column are missing from output
/// - Format is inconsistent (wrong number of colons)
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = format!("{}", location);

    // THEN: Should produce "[file:line:column]" format
    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert!(
        formatted.contains("error_location.rs"),
        "Should include filename"
    );
    assert!(
        formatted.contains(&location.line.to_string()),
        "Should include line number"
    );
    assert_eq!(
        formatted.matches(':').count(),
        2,
        "Should have exactly 2 colons"
    );
}

/// **VALUE**: Verifies `#[track_caller]` propagation through a helper function.
///
/// **WHY THIS MATTERS**: Every `From` impl in the workspace relies on
/// `#[track_caller]` so that converted errors point at the conversion site,
/// not at the `From` body.
///
/// **BUG THIS CATCHES**: Would catch if a refactor drops `#[track_caller]`
/// from the chain and all errors start reporting the same constructor line.
#[test]
fn given_track_caller_helper_when_called_then_reports_call_site() {
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Calling through the annotated helper
    let location = capture();

    // THEN: The reported file is this test file, not the helper body
    assert!(
        location.file.contains("error_location.rs"),
        "Should report the call site file"
    );
}
