use crate::modules::registration_webhook::runner::suite::{Case, Category};
use crate::modules::registration_webhook::use_cases::health::probe::health_check;

pub fn category() -> Category {
    Category {
        name: "health",
        description: "Automation platform availability",
        cases: vec![Case::new(
            "health_check",
            "Health endpoint answers 200",
            health_check,
        )],
    }
}
