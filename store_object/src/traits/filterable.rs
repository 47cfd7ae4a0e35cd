use super::core::StoreObject;
use crate::StoreError;
use async_trait::async_trait;

/// Equality filter for store queries
#[derive(Clone, Debug)]
pub struct StoreFilter {
    pub conditions: Vec<(String, String)>, // (field_name, value)
}

impl StoreFilter {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    pub fn add_condition(mut self, field: &str, value: &str) -> Self {
        self.conditions.push((field.to_string(), value.to_string()));
        self
    }

    /// Reject fields outside `columns`; callers pass the table's text columns
    pub fn validate_fields(&self, columns: &[&str]) -> Result<(), StoreError> {
        match self
            .conditions
            .iter()
            .find(|(field, _)| !columns.contains(&field.as_str()))
        {
            Some((field, _)) => Err(StoreError::Validation(format!(
                "Unknown or non-text filter field: {}",
                field
            ))),
            None => Ok(()),
        }
    }

    pub fn build_where_clause(&self) -> (String, Vec<String>) {
        if self.conditions.is_empty() {
            return ("".to_string(), Vec::new());
        }

        let mut where_clause = " WHERE ".to_string();
        let mut values = Vec::new();

        for (i, (field, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                where_clause.push_str(" AND ");
            }
            where_clause.push_str(&format!("{} = ${}", field, i + 1));
            values.push(value.clone());
        }

        (where_clause, values)
    }
}

impl Default for StoreFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for objects that support filtering
#[async_trait]
pub trait Filterable: StoreObject {
    /// List objects whose fields equal the filter values exactly (case-sensitive)
    async fn list_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Self::Model>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let (clause, values) = StoreFilter::new().build_where_clause();
        assert!(clause.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn test_where_clause_numbers_parameters() {
        let filter = StoreFilter::new()
            .add_condition("category", "Bikes")
            .add_condition("name", "Roadster");
        let (clause, values) = filter.build_where_clause();

        assert_eq!(clause, " WHERE category = $1 AND name = $2");
        assert_eq!(values, vec!["Bikes".to_string(), "Roadster".to_string()]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let filter = StoreFilter::new().add_condition("category; DROP TABLE products", "x");
        let err = filter.validate_fields(&["product_id", "category"]).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let filter = StoreFilter::new().add_condition("category", "Boots");
        assert!(filter.validate_fields(&["product_id", "category"]).is_ok());
    }
}
