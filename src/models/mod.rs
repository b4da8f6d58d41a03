pub mod case;
pub mod case_step;
pub mod case_version;
pub mod environment;
pub mod product;
pub mod product_version;
pub mod result;
pub mod result_transition;
pub mod run;
pub mod run_case_version;
pub mod run_suite;
pub mod step_result;
pub mod suite;
pub mod suite_case;
pub mod tag;
pub mod user;

// Re-export core models for easy access
pub use case::Case;
pub use case_step::CaseStep;
pub use case_version::CaseVersion;
pub use environment::{Category, Element, Environment, Profile};
pub use product::Product;
pub use product_version::ProductVersion;
pub use result::RunResult;
pub use result_transition::ResultTransition;
pub use run::Run;
pub use run_case_version::RunCaseVersion;
pub use run_suite::RunSuite;
pub use step_result::StepResult;
pub use suite::Suite;
pub use suite_case::SuiteCase;
pub use tag::Tag;
pub use user::User;
