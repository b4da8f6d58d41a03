//! # Execution Factories
//!
//! Factories for runs, run membership, results, and step results.

#![allow(dead_code)]

use async_trait::async_trait;
use casetrack_core::models::{
    result::NewRunResult, run::NewRun, run_case_version::NewRunCaseVersion,
    run_suite::NewRunSuite, step_result::NewStepResult, Run, RunCaseVersion, RunResult,
    RunSuite, StepResult,
};
use casetrack_core::state_machine::{ResultStatus, StepStatus};
use sqlx::PgPool;

use super::base::*;
use super::environments::EnvironmentFactory;
use super::foundation::{ProductVersionFactory, UserFactory};
use super::library::{CaseStepFactory, CaseVersionFactory, SuiteFactory};

/// Factory for creating runs
#[derive(Debug, Clone)]
pub struct RunFactory {
    base: BaseFactory,
    product_version_id: Option<i64>,
    name: String,
    description: Option<String>,
    activated: bool,
}

impl Default for RunFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            product_version_id: None,
            name: "Test Run".to_string(),
            description: None,
            activated: false,
        }
    }
}

impl RunFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_product_version(mut self, product_version_id: i64) -> Self {
        self.product_version_id = Some(product_version_id);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Create the run already activated for testers
    pub fn activated(mut self) -> Self {
        self.activated = true;
        self
    }
}

#[async_trait]
impl SqlxFactory<Run> for RunFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<Run> {
        let product_version_id = match self.product_version_id {
            Some(id) => id,
            None => {
                ProductVersionFactory::new()
                    .find_or_create(pool)
                    .await?
                    .product_version_id
            }
        };

        let mut run = Run::create(
            pool,
            NewRun {
                product_version_id,
                name: self.name.clone(),
                description: self.description.clone(),
            },
        )
        .await?;

        if self.activated {
            run.activate(pool).await?;
        }

        Ok(run)
    }
}

/// Factory for including suites in runs
#[derive(Debug, Clone)]
pub struct RunSuiteFactory {
    base: BaseFactory,
    run_id: Option<i64>,
    suite_id: Option<i64>,
    order_index: i32,
}

impl Default for RunSuiteFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            run_id: None,
            suite_id: None,
            order_index: 0,
        }
    }
}

impl RunSuiteFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_run(mut self, run_id: i64) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn for_suite(mut self, suite_id: i64) -> Self {
        self.suite_id = Some(suite_id);
        self
    }
}

#[async_trait]
impl SqlxFactory<RunSuite> for RunSuiteFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<RunSuite> {
        let run_id = match self.run_id {
            Some(id) => id,
            None => RunFactory::new().create(pool).await?.run_id,
        };
        let suite_id = match self.suite_id {
            Some(id) => id,
            None => SuiteFactory::new().create(pool).await?.suite_id,
        };

        let member = RunSuite::create(
            pool,
            NewRunSuite {
                run_id,
                suite_id,
                order_index: self.order_index,
            },
        )
        .await?;
        Ok(member)
    }
}

/// Factory for including case versions in runs
#[derive(Debug, Clone)]
pub struct RunCaseVersionFactory {
    base: BaseFactory,
    run_id: Option<i64>,
    case_version_id: Option<i64>,
    order_index: i32,
}

impl Default for RunCaseVersionFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            run_id: None,
            case_version_id: None,
            order_index: 0,
        }
    }
}

impl RunCaseVersionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_run(mut self, run_id: i64) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn for_case_version(mut self, case_version_id: i64) -> Self {
        self.case_version_id = Some(case_version_id);
        self
    }

    pub fn with_order(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }
}

#[async_trait]
impl SqlxFactory<RunCaseVersion> for RunCaseVersionFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<RunCaseVersion> {
        let run_id = match self.run_id {
            Some(id) => id,
            None => RunFactory::new().create(pool).await?.run_id,
        };
        let case_version_id = match self.case_version_id {
            Some(id) => id,
            None => {
                CaseVersionFactory::new()
                    .create(pool)
                    .await?
                    .case_version_id
            }
        };

        let member = RunCaseVersion::create(
            pool,
            NewRunCaseVersion {
                run_id,
                case_version_id,
                order_index: self.order_index,
            },
        )
        .await?;
        Ok(member)
    }
}

/// Factory for creating results
///
/// Missing dependencies (run-case-version, environment, tester) are created
/// on demand. `with_status` forces the stored status after insertion, for
/// tests that need a result mid-workflow without replaying its history.
#[derive(Debug, Clone)]
pub struct RunResultFactory {
    base: BaseFactory,
    run_case_version_id: Option<i64>,
    environment_id: Option<i64>,
    tester_id: Option<i64>,
    status: Option<ResultStatus>,
}

impl Default for RunResultFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            run_case_version_id: None,
            environment_id: None,
            tester_id: None,
            status: None,
        }
    }
}

impl RunResultFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_run_case_version(mut self, run_case_version_id: i64) -> Self {
        self.run_case_version_id = Some(run_case_version_id);
        self
    }

    pub fn for_environment(mut self, environment_id: i64) -> Self {
        self.environment_id = Some(environment_id);
        self
    }

    pub fn for_tester(mut self, tester_id: i64) -> Self {
        self.tester_id = Some(tester_id);
        self
    }

    pub fn with_status(mut self, status: ResultStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[async_trait]
impl SqlxFactory<RunResult> for RunResultFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<RunResult> {
        let run_case_version_id = match self.run_case_version_id {
            Some(id) => id,
            None => {
                RunCaseVersionFactory::new()
                    .create(pool)
                    .await?
                    .run_case_version_id
            }
        };
        let environment_id = match self.environment_id {
            Some(id) => id,
            None => {
                EnvironmentFactory::new()
                    .create(pool)
                    .await?
                    .environment_id
            }
        };
        let tester_id = match self.tester_id {
            Some(id) => id,
            None => UserFactory::new().create(pool).await?.user_id,
        };

        let result = RunResult::create(
            pool,
            NewRunResult {
                run_case_version_id,
                environment_id,
                tester_id,
            },
        )
        .await?;

        match self.status {
            Some(status) => Ok(force_status(pool, result.result_id, status).await?),
            None => Ok(result),
        }
    }
}

/// Overwrite a result's stored status without replaying the workflow
async fn force_status(
    pool: &PgPool,
    result_id: i64,
    status: ResultStatus,
) -> Result<RunResult, sqlx::Error> {
    sqlx::query_as::<_, RunResult>(
        r#"
        UPDATE casetrack_results
        SET status = $2,
            started = CASE WHEN $2 <> 'created' THEN NOW() ELSE started END,
            completed = CASE WHEN $2 IN ('passed', 'failed', 'invalidated') THEN NOW() ELSE completed END,
            updated_at = NOW()
        WHERE result_id = $1
        RETURNING result_id, run_case_version_id, environment_id, tester_id, status,
                  started, completed, comment, modified_by_id, created_at, updated_at
        "#,
    )
    .bind(result_id)
    .bind(status.to_string())
    .fetch_one(pool)
    .await
}

/// Factory for creating step results
#[derive(Debug, Clone)]
pub struct StepResultFactory {
    base: BaseFactory,
    result_id: Option<i64>,
    case_step_id: Option<i64>,
    status: StepStatus,
    bug_url: Option<String>,
}

impl Default for StepResultFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            result_id: None,
            case_step_id: None,
            status: StepStatus::Passed,
            bug_url: None,
        }
    }
}

impl StepResultFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_result(mut self, result_id: i64) -> Self {
        self.result_id = Some(result_id);
        self
    }

    pub fn for_case_step(mut self, case_step_id: i64) -> Self {
        self.case_step_id = Some(case_step_id);
        self
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_bug_url(mut self, bug_url: &str) -> Self {
        self.bug_url = Some(bug_url.to_string());
        self
    }
}

#[async_trait]
impl SqlxFactory<StepResult> for StepResultFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<StepResult> {
        let result_id = match self.result_id {
            Some(id) => id,
            None => RunResultFactory::new().create(pool).await?.result_id,
        };
        let case_step_id = match self.case_step_id {
            Some(id) => id,
            None => CaseStepFactory::new().create(pool).await?.case_step_id,
        };

        let step_result = StepResult::create(
            pool,
            NewStepResult {
                result_id,
                case_step_id,
                status: self.status.to_string(),
                bug_url: self.bug_url.clone(),
            },
        )
        .await?;
        Ok(step_result)
    }
}
