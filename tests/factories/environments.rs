//! # Environment Factories
//!
//! Factory for environments plus the set helpers: build environments from
//! explicit element rows, or the full cartesian product of category
//! elements.

#![allow(dead_code)]

use async_trait::async_trait;
use casetrack_core::models::Environment;
use sqlx::PgPool;

use super::base::*;
use super::foundation::{CategoryFactory, ElementFactory, ProfileFactory};

/// Factory for creating environments
#[derive(Debug, Clone)]
pub struct EnvironmentFactory {
    base: BaseFactory,
    profile_id: Option<i64>,
    with_profile: bool,
}

impl Default for EnvironmentFactory {
    fn default() -> Self {
        Self {
            base: BaseFactory::new(),
            profile_id: None,
            with_profile: false,
        }
    }
}

impl EnvironmentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_profile(mut self, profile_id: i64) -> Self {
        self.profile_id = Some(profile_id);
        self.with_profile = true;
        self
    }

    /// Create a fresh profile for the environment
    pub fn with_profile(mut self) -> Self {
        self.with_profile = true;
        self
    }

    /// Create a set of environments given category and element names
    ///
    /// Given a list of category names, and some number of same-length lists
    /// of element names, create one environment per element-name list:
    ///
    /// ```text
    /// create_set(pool,
    ///     &["OS", "Browser"],
    ///     &[vec!["Windows", "Internet Explorer"],
    ///       vec!["Windows", "Firefox"],
    ///       vec!["Linux", "Firefox"]])
    /// ```
    pub async fn create_set(
        pool: &PgPool,
        category_names: &[&str],
        environments: &[Vec<&str>],
    ) -> FactoryResult<Vec<Environment>> {
        let mut categories = Vec::new();
        for name in category_names {
            categories.push(CategoryFactory::new().with_name(name).find_or_create(pool).await?);
        }

        let mut created = Vec::new();
        for element_names in environments {
            if element_names.len() != categories.len() {
                return Err(FactoryError::Misuse(format!(
                    "expected {} element names, got {}",
                    categories.len(),
                    element_names.len()
                )));
            }

            let mut element_ids = Vec::new();
            for (category, name) in categories.iter().zip(element_names.iter()) {
                let element = ElementFactory::new()
                    .for_category(category.category_id)
                    .with_name(name)
                    .create(pool)
                    .await?;
                element_ids.push(element.element_id);
            }

            let environment = EnvironmentFactory::new().create(pool).await?;
            environment.add_elements(pool, &element_ids).await?;
            created.push(environment);
        }

        Ok(created)
    }

    /// Create all possible environment combinations from given categories
    ///
    /// Given category names each mapped to a list of element names, create
    /// one environment per combination of one element from each category.
    pub async fn create_full_set(
        pool: &PgPool,
        categories: &[(&str, Vec<&str>)],
    ) -> FactoryResult<Vec<Environment>> {
        let mut element_id_lists = Vec::new();

        for (category_name, element_names) in categories {
            let category = CategoryFactory::new()
                .with_name(category_name)
                .find_or_create(pool)
                .await?;

            let mut ids = Vec::new();
            for name in element_names {
                let element = ElementFactory::new()
                    .for_category(category.category_id)
                    .with_name(name)
                    .create(pool)
                    .await?;
                ids.push(element.element_id);
            }
            element_id_lists.push(ids);
        }

        let mut created = Vec::new();
        for combination in cartesian_product(&element_id_lists) {
            let environment = EnvironmentFactory::new().create(pool).await?;
            environment.add_elements(pool, &combination).await?;
            created.push(environment);
        }

        Ok(created)
    }
}

/// All combinations taking one element from each input list
fn cartesian_product(lists: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let mut combinations: Vec<Vec<i64>> = vec![Vec::new()];

    for list in lists {
        let mut next = Vec::with_capacity(combinations.len() * list.len());
        for combination in &combinations {
            for item in list {
                let mut extended = combination.clone();
                extended.push(*item);
                next.push(extended);
            }
        }
        combinations = next;
    }

    combinations
}

#[async_trait]
impl SqlxFactory<Environment> for EnvironmentFactory {
    async fn create(&self, pool: &PgPool) -> FactoryResult<Environment> {
        let profile_id = match (self.profile_id, self.with_profile) {
            (Some(id), _) => Some(id),
            (None, true) => Some(ProfileFactory::new().create(pool).await?.profile_id),
            (None, false) => None,
        };

        Ok(Environment::create(pool, profile_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::cartesian_product;

    #[test]
    fn cartesian_product_covers_all_combinations() {
        let lists = vec![vec![1, 2], vec![10, 20, 30]];
        let product = cartesian_product(&lists);

        assert_eq!(product.len(), 6);
        assert!(product.contains(&vec![1, 10]));
        assert!(product.contains(&vec![2, 30]));
    }

    #[test]
    fn cartesian_product_of_nothing_is_one_empty_combination() {
        assert_eq!(cartesian_product(&[]), vec![Vec::<i64>::new()]);
    }
}
