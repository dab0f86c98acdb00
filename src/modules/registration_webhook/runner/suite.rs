//! Case definitions and the complete contract suite.

use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::use_cases::{health, integration, security};
use crate::shell::config::ContractConfig;
use crate::shell::state::HarnessState;
use std::future::Future;
use std::pin::Pin;

pub type CaseFuture = Pin<Box<dyn Future<Output = Result<(), ContractError>> + Send>>;

/// A case body. It owns its copy of the harness state so it can run on its own task.
pub type CaseFn = Box<dyn Fn(HarnessState) -> CaseFuture + Send + Sync>;

/// Returns Some(reason) when the case should be skipped under this configuration.
pub type SkipFn = fn(&ContractConfig) -> Option<String>;

/// A single contract case.
pub struct Case {
    /// Case name (used for filtering).
    pub name: &'static str,
    pub description: &'static str,
    pub run: CaseFn,
    pub skip_if: Option<SkipFn>,
}

impl Case {
    pub fn new<F, Fut>(name: &'static str, description: &'static str, run: F) -> Self
    where
        F: Fn(HarnessState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ContractError>> + Send + 'static,
    {
        Self {
            name,
            description,
            run: Box::new(move |state| -> CaseFuture { Box::pin(run(state)) }),
            skip_if: None,
        }
    }

    pub fn skip_if(mut self, condition: SkipFn) -> Self {
        self.skip_if = Some(condition);
        self
    }

    pub fn skip_reason(&self, config: &ContractConfig) -> Option<String> {
        self.skip_if.and_then(|condition| condition(config))
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A category of related cases.
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
    pub cases: Vec<Case>,
}

/// The complete contract suite, in execution order.
#[derive(Debug)]
pub struct Suite {
    pub categories: Vec<Category>,
}

impl Suite {
    /// Cases whose `category/name` contains `filter`, in suite order.
    pub fn select<'a>(&'a self, filter: Option<&str>) -> Vec<(&'a Category, &'a Case)> {
        self.categories
            .iter()
            .flat_map(|category| category.cases.iter().map(move |case| (category, case)))
            .filter(|(category, case)| {
                filter.is_none_or(|text| case_id(category, case).contains(text))
            })
            .collect()
    }
}

pub fn case_id(category: &Category, case: &Case) -> String {
    format!("{}/{}", category.name, case.name)
}

pub fn build_suite() -> Suite {
    Suite {
        categories: vec![
            health::category::category(),
            integration::category::category(),
            security::category::category(),
        ],
    }
}
