// Composition root for the contract runner.
//
// Responsibilities
// - Parse flags and environment into a ContractConfig.
// - Pick the transport (reqwest or the in-memory simulated webhook).
// - Wire the shared HarnessState that every contract case receives.
// - Initialise logging.

pub mod cli;
pub mod config;
pub mod state;
