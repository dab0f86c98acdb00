use crate::modules::registration_webhook::runner::suite::{Case, Category};
use crate::modules::registration_webhook::use_cases::security::injection::sql_injection;
use crate::modules::registration_webhook::use_cases::security::rate_limit::rate_limiting;
use crate::modules::registration_webhook::use_cases::security::xss::xss;

/// Rate limiting stays last: its burst may leave the service throttling.
pub fn category() -> Category {
    Category {
        name: "security",
        description: "Hostile and abusive input",
        cases: vec![
            Case::new(
                "sql_injection",
                "SQL injection attempts are rejected",
                sql_injection,
            ),
            Case::new("xss", "Script tags are never echoed back", xss),
            Case::new(
                "rate_limiting",
                "A burst of submissions shows throttling",
                rate_limiting,
            ),
        ],
    }
}
