//! Library model tests: products, versions, suites, cases, steps, tags

use casetrack_core::models::case_version::NewCaseVersion;
use casetrack_core::models::product::NewProduct;
use casetrack_core::models::suite_case::NewSuiteCase;
use casetrack_core::models::{CaseStep, CaseVersion, Product, SuiteCase, Tag};
use casetrack_core::CasetrackError;
use sqlx::PgPool;

use crate::factories::base::SqlxFactory;
use crate::factories::foundation::{ProductFactory, ProductVersionFactory, TagFactory};
use crate::factories::library::{CaseFactory, CaseStepFactory, CaseVersionFactory, SuiteFactory};

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn product_crud(pool: PgPool) -> sqlx::Result<()> {
    let created = Product::create(
        &pool,
        NewProduct {
            name: "CaseTrack".to_string(),
            description: Some("The product under test".to_string()),
        },
    )
    .await?;
    assert_eq!(created.name, "CaseTrack");

    let found = Product::find_by_id(&pool, created.product_id)
        .await?
        .expect("product not found");
    assert_eq!(found.product_id, created.product_id);

    let by_name = Product::find_by_name(&pool, "CaseTrack")
        .await?
        .expect("product not found by name");
    assert_eq!(by_name.product_id, created.product_id);

    let mut product = created.clone();
    product
        .update(&pool, Some("CaseTrack NG"), None)
        .await?;
    assert_eq!(product.name, "CaseTrack NG");
    assert_eq!(
        product.description.as_deref(),
        Some("The product under test")
    );

    let all = Product::list_all(&pool).await?;
    assert_eq!(all.len(), 1);

    product.delete(&pool).await?;
    assert!(Product::find_by_id(&pool, created.product_id).await?.is_none());

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn duplicate_product_names_are_rejected(pool: PgPool) -> sqlx::Result<()> {
    ProductFactory::new().with_name("Unique").create(&pool).await.unwrap();

    let duplicate = Product::create(
        &pool,
        NewProduct {
            name: "Unique".to_string(),
            description: None,
        },
    )
    .await;
    assert!(duplicate.is_err(), "should not allow duplicate names");

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn case_version_numbers_increment_per_case(pool: PgPool) -> sqlx::Result<()> {
    let case = CaseFactory::new().create(&pool).await.unwrap();

    let first = CaseVersionFactory::new()
        .for_case(case.case_id)
        .with_name("Login")
        .create(&pool)
        .await
        .unwrap();
    let second = CaseVersionFactory::new()
        .for_case(case.case_id)
        .with_name("Login, revised")
        .create(&pool)
        .await
        .unwrap();

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);

    // A different case starts its own numbering
    let other = CaseVersionFactory::new().create(&pool).await.unwrap();
    assert_eq!(other.number, 1);

    let latest = CaseVersion::latest_for_case(&pool, case.case_id)
        .await?
        .expect("no latest version");
    assert_eq!(latest.case_version_id, second.case_version_id);

    let by_number = CaseVersion::find_by_case_and_number(&pool, case.case_id, 1)
        .await?
        .expect("version 1 not found");
    assert_eq!(by_number.name, "Login");

    let versions = case.versions(&pool).await?;
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].number, 2);

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn case_step_numbers_increment_per_version(pool: PgPool) -> sqlx::Result<()> {
    let version = CaseVersionFactory::new().create(&pool).await.unwrap();

    let first = CaseStepFactory::new()
        .for_case_version(version.case_version_id)
        .with_instruction("Open the front page")
        .create(&pool)
        .await
        .unwrap();
    let second = CaseStepFactory::new()
        .for_case_version(version.case_version_id)
        .with_instruction("Click log in")
        .with_expected("The login form appears")
        .create(&pool)
        .await
        .unwrap();

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);

    let by_number = CaseStep::find_by_number(&pool, version.case_version_id, 2)
        .await?
        .expect("step 2 not found");
    assert_eq!(by_number.instruction, "Click log in");

    assert!(CaseStep::find_by_number(&pool, version.case_version_id, 3)
        .await?
        .is_none());

    let steps = version.steps(&pool).await?;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].number, 1);

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn suite_case_requires_matching_products(pool: PgPool) -> sqlx::Result<()> {
    let product_a = ProductFactory::new().with_name("Product A").create(&pool).await.unwrap();
    let product_b = ProductFactory::new().with_name("Product B").create(&pool).await.unwrap();

    let suite = SuiteFactory::new()
        .for_product(product_a.product_id)
        .create(&pool)
        .await
        .unwrap();

    let version_b = ProductVersionFactory::new()
        .for_product(product_b.product_id)
        .create(&pool)
        .await
        .unwrap();
    let foreign_case = CaseFactory::new()
        .for_product_version(version_b.product_version_id)
        .create(&pool)
        .await
        .unwrap();

    let rejected = SuiteCase::create(
        &pool,
        NewSuiteCase {
            suite_id: suite.suite_id,
            case_id: foreign_case.case_id,
            order_index: 0,
        },
    )
    .await;
    assert!(matches!(rejected, Err(CasetrackError::ValidationError(_))));

    // Same product is accepted
    let version_a = ProductVersionFactory::new()
        .for_product(product_a.product_id)
        .create(&pool)
        .await
        .unwrap();
    let local_case = CaseFactory::new()
        .for_product_version(version_a.product_version_id)
        .create(&pool)
        .await
        .unwrap();

    let accepted = SuiteCase::create(
        &pool,
        NewSuiteCase {
            suite_id: suite.suite_id,
            case_id: local_case.case_id,
            order_index: 0,
        },
    )
    .await;
    assert!(accepted.is_ok());

    let members = SuiteCase::list_by_suite(&pool, suite.suite_id).await?;
    assert_eq!(members.len(), 1);

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn tags_attach_to_case_versions(pool: PgPool) -> sqlx::Result<()> {
    let version = CaseVersionFactory::new().create(&pool).await.unwrap();
    let smoke = TagFactory::new().with_name("smoke").create(&pool).await.unwrap();
    let slow = TagFactory::new().with_name("slow").create(&pool).await.unwrap();

    smoke.attach_to_case_version(&pool, version.case_version_id).await?;
    slow.attach_to_case_version(&pool, version.case_version_id).await?;
    // Attaching twice is a no-op
    smoke.attach_to_case_version(&pool, version.case_version_id).await?;

    let tags = Tag::list_for_case_version(&pool, version.case_version_id).await?;
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "slow");
    assert_eq!(tags[1].name, "smoke");

    assert!(Tag::find_by_name(&pool, "smoke").await?.is_some());

    Ok(())
}

#[sqlx::test]
#[ignore = "requires a live PostgreSQL database (DATABASE_URL)"]
async fn case_version_create_assigns_next_number_directly(pool: PgPool) -> sqlx::Result<()> {
    let case = CaseFactory::new().create(&pool).await.unwrap();

    let version = CaseVersion::create(
        &pool,
        NewCaseVersion {
            case_id: case.case_id,
            name: "Direct".to_string(),
            description: None,
        },
    )
    .await?;
    assert_eq!(version.number, 1);

    Ok(())
}
