//! Query-string extractors shared by the scan and batch routes.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use sabor_core::IdSet;
use sabor_core::error::DomainError;
use sabor_core::repository::PageRequest;
use sabor_core::validation::FieldErrors;
use serde::Deserialize;

use crate::error::ApiError;

/// `?page=&size=` on paginated scans.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size; clamped to 1..=100.
    pub size: Option<u32>,
}

impl PageParams {
    /// The store-level page request, with defaults applied.
    #[must_use]
    pub fn into_request(self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// Identifiers from `?ids=1&ids=2` or `?ids=1,2`, in any mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdsQuery(pub IdSet);

impl IdsQuery {
    fn parse<'a>(values: impl Iterator<Item = &'a str>) -> Result<Self, ApiError> {
        let mut ids = IdSet::new();
        for token in values.flat_map(|value| value.split(',')) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.add("ids", format!("'{token}' is not a valid identifier"));
                    return Err(ApiError(DomainError::Validation(errors)));
                }
            }
        }
        Ok(Self(ids))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for IdsQuery {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let mut errors = FieldErrors::new();
                errors.add("ids", rejection.body_text());
                ApiError(DomainError::Validation(errors))
            })?;
        Self::parse(
            pairs
                .iter()
                .filter(|(key, _)| key == "ids")
                .map(|(_, value)| value.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_and_comma_separated_forms_merge() {
        let parsed = IdsQuery::parse(["3,1", "2", "3"].into_iter()).unwrap();

        assert_eq!(parsed.0, IdSet::from([1, 2, 3]));
    }

    #[test]
    fn test_non_numeric_identifier_is_a_validation_error() {
        let result = IdsQuery::parse(["1,x"].into_iter());

        assert!(matches!(
            result,
            Err(ApiError(DomainError::Validation(fields))) if fields.get("ids").is_some()
        ));
    }

    #[test]
    fn test_page_params_default_to_first_page_of_ten() {
        let request = PageParams::default().into_request();

        assert_eq!(request, PageRequest::new(0, 10));
    }
}
