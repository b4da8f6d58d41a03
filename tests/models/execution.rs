//! Execution model tests: runs, run membership, results, step results,
//! and the query scopes over them

use casetrack_core::models::step_result::NewStepResult;
use casetrack_core::models::{Run, RunCaseVersion, RunResult, StepResult};
use casetrack_core::scopes::ScopeBuilder;
use casetrack_core::state_machine::ResultStatus;
use sqlx::PgPool;

use crate::factories::base::SqlxFactory;
use crate::factories::execution::{
    RunCaseVersionFactory, RunFactory, RunResultFactory, StepResultFactory,
};
use crate::factories::foundation::{ProductVersionFactory, UserFactory};
use crate::factories::library::CaseVersionFactory;

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn run_status_lifecycle(pool: PgPool) -> sqlx::Result<()> {
    let mut run = RunFactory::new().with_name("Nightly").create(&pool).await.unwrap();
    assert_eq!(run.status, "draft");

    run.activate(&pool).await?;
    assert_eq!(refresh_run(&pool, run.run_id).await.status, "active");

    run.disable(&pool).await?;
    assert_eq!(refresh_run(&pool, run.run_id).await.status, "disabled");

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn run_case_versions_list_in_order(pool: PgPool) -> sqlx::Result<()> {
    let run = RunFactory::new().create(&pool).await.unwrap();

    for order in [2, 1] {
        let version = CaseVersionFactory::new().create(&pool).await.unwrap();
        RunCaseVersionFactory::new()
            .for_run(run.run_id)
            .for_case_version(version.case_version_id)
            .with_order(order)
            .create(&pool)
            .await
            .unwrap();
    }

    let members = RunCaseVersion::list_by_run(&pool, run.run_id).await?;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].order_index, 1);
    assert_eq!(members[1].order_index, 2);

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn new_results_default_to_created(pool: PgPool) -> sqlx::Result<()> {
    let result = RunResultFactory::new().create(&pool).await.unwrap();

    assert_eq!(result.status, "created");
    assert_eq!(result.current_status().unwrap(), ResultStatus::Created);
    assert!(result.started.is_none());
    assert!(result.completed.is_none());
    assert_eq!(result.comment, "");
    assert!(result.modified_by_id.is_none());

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn step_results_are_unique_per_result_and_step(pool: PgPool) -> sqlx::Result<()> {
    let step_result = StepResultFactory::new().create(&pool).await.unwrap();

    let duplicate = StepResult::create(
        &pool,
        NewStepResult {
            result_id: step_result.result_id,
            case_step_id: step_result.case_step_id,
            status: "passed".to_string(),
            bug_url: None,
        },
    )
    .await;
    assert!(duplicate.is_err(), "should not allow duplicate step results");

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn result_scopes_filter_by_run_status_and_tester(pool: PgPool) -> sqlx::Result<()> {
    let run = RunFactory::new().create(&pool).await.unwrap();
    let tester = UserFactory::new().create(&pool).await.unwrap();

    let version = CaseVersionFactory::new().create(&pool).await.unwrap();
    let rcv = RunCaseVersionFactory::new()
        .for_run(run.run_id)
        .for_case_version(version.case_version_id)
        .create(&pool)
        .await
        .unwrap();

    RunResultFactory::new()
        .for_run_case_version(rcv.run_case_version_id)
        .for_tester(tester.user_id)
        .with_status(ResultStatus::Started)
        .create(&pool)
        .await
        .unwrap();
    RunResultFactory::new()
        .for_run_case_version(rcv.run_case_version_id)
        .with_status(ResultStatus::Passed)
        .create(&pool)
        .await
        .unwrap();
    // A result outside the run entirely
    RunResultFactory::new().create(&pool).await.unwrap();

    assert_eq!(RunResult::scope().for_run(run.run_id).count(&pool).await?, 2);
    assert_eq!(
        RunResult::scope().for_run(run.run_id).pending().count(&pool).await?,
        1
    );
    assert_eq!(
        RunResult::scope().for_run(run.run_id).completed().count(&pool).await?,
        1
    );
    assert_eq!(
        RunResult::scope()
            .for_tester(tester.user_id)
            .with_status(ResultStatus::Started)
            .count(&pool)
            .await?,
        1
    );

    let first = RunResult::scope()
        .for_run(run.run_id)
        .first(&pool)
        .await?
        .expect("no result in run");
    assert_eq!(first.run_case_version_id, rcv.run_case_version_id);

    assert!(RunResult::scope().for_run(run.run_id).exists(&pool).await?);

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn run_scopes_filter_by_product_version_and_status(pool: PgPool) -> sqlx::Result<()> {
    let version = ProductVersionFactory::new().create(&pool).await.unwrap();

    RunFactory::new()
        .for_product_version(version.product_version_id)
        .activated()
        .create(&pool)
        .await
        .unwrap();
    RunFactory::new()
        .for_product_version(version.product_version_id)
        .create(&pool)
        .await
        .unwrap();

    assert_eq!(
        Run::scope()
            .for_product_version(version.product_version_id)
            .count(&pool)
            .await?,
        2
    );
    assert_eq!(
        Run::scope()
            .for_product_version(version.product_version_id)
            .active()
            .count(&pool)
            .await?,
        1
    );

    Ok(())
}

async fn refresh_run(pool: &PgPool, run_id: i64) -> Run {
    Run::find_by_id(pool, run_id)
        .await
        .expect("refresh query failed")
        .expect("run disappeared")
}
