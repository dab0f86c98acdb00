use crate::modules::registration_webhook::runner::suite::{Case, Category};
use crate::modules::registration_webhook::use_cases::integration::delivery::{
    concurrent_submissions, content_types, timeout_tolerance,
};
use crate::modules::registration_webhook::use_cases::integration::submission::{
    idempotency, oversized_payload, response_shape, valid_submission,
};
use crate::modules::registration_webhook::use_cases::integration::validation::{
    invalid_passphrase, malformed_email, missing_required_fields, special_characters,
    special_characters_disabled,
};

pub fn category() -> Category {
    Category {
        name: "integration",
        description: "Registration webhook contract",
        cases: vec![
            Case::new(
                "valid_submission",
                "Well-formed registration is accepted",
                valid_submission,
            ),
            Case::new(
                "invalid_passphrase",
                "Wrong passphrase is rejected with 401",
                invalid_passphrase,
            ),
            Case::new(
                "missing_required_fields",
                "Missing email or name is rejected",
                missing_required_fields,
            ),
            Case::new(
                "malformed_email",
                "Malformed email is rejected",
                malformed_email,
            ),
            Case::new(
                "oversized_payload",
                "Large extra field is handled",
                oversized_payload,
            ),
            Case::new(
                "content_types",
                "Non-JSON bodies are handled",
                content_types,
            ),
            Case::new(
                "concurrent_submissions",
                "Parallel submissions all resolve",
                concurrent_submissions,
            ),
            Case::new(
                "response_shape",
                "Responses follow the JSON envelope",
                response_shape,
            ),
            Case::new(
                "idempotency",
                "Repeated submission is accepted or flagged",
                idempotency,
            ),
            Case::new(
                "timeout_tolerance",
                "Slow processing within a short client timeout",
                timeout_tolerance,
            ),
            Case::new(
                "special_characters",
                "Special characters in email and name",
                special_characters,
            )
            .skip_if(special_characters_disabled),
        ],
    }
}
