/// Error code registry for tweetflow
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2499: Source errors
/// - 2500-2999: Sink errors
/// - 3000-3999: Repair errors
/// - 4000-4999: Decode/encode errors
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_BACKEND_DISABLED: u16 = 1005;

    // Source errors (2000-2499)
    pub const SOURCE_GENERIC: u16 = 2000;
    pub const SOURCE_NOT_FOUND: u16 = 2001;
    pub const SOURCE_IO_ERROR: u16 = 2002;
    pub const SOURCE_UNAVAILABLE: u16 = 2003;

    // Sink errors (2500-2999)
    pub const SINK_GENERIC: u16 = 2500;
    pub const SINK_IO_ERROR: u16 = 2501;
    pub const SINK_UNAVAILABLE: u16 = 2502;

    // Repair errors (3000-3999)
    pub const REPAIR_UNPARSABLE_DATETIME: u16 = 3001;

    // Decode/encode errors (4000-4999)
    pub const DECODE_GENERIC: u16 = 4000;
    pub const DECODE_MISSING_COLUMN: u16 = 4001;
    pub const DECODE_MALFORMED_ROW: u16 = 4002;
    pub const ENCODE_FAILED: u16 = 4003;

    // Validation errors (7000-7999)
    pub const VALIDATION_ENFORCED: u16 = 7001;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1003 => "Invalid value in configuration",
        1004 => "Required configuration field is missing",
        1005 => "Storage backend is not enabled in this build",

        // Source errors
        2000 => "Generic source error",
        2001 => "Source batch not found",
        2002 => "Source I/O error",
        2003 => "Source backend unavailable",

        // Sink errors
        2500 => "Generic sink error",
        2501 => "Sink I/O error",
        2502 => "Sink backend unavailable",

        // Repair errors
        3001 => "Timestamp does not match the input pattern",

        // Decode/encode errors
        4000 => "Generic decode error",
        4001 => "Required column is missing from the header",
        4002 => "Malformed CSV row",
        4003 => "Failed to encode output table",

        // Validation errors
        7001 => "Batch rejected by enforced validation",

        // Other errors
        9000 => "Generic error",

        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(
            describe_error_code(ErrorCode::REPAIR_UNPARSABLE_DATETIME),
            "Timestamp does not match the input pattern"
        );
        assert_eq!(
            describe_error_code(ErrorCode::DECODE_MISSING_COLUMN),
            "Required column is missing from the header"
        );
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe_error_code(42), "Unknown error code");
    }
}
