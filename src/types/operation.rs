use crate::Variables;

/// A GraphQL operation: the query document, the name of the operation to run and its variables.
///
/// # Examples
///
/// ```
/// use graphql_multipart_client::*;
///
/// let operation = Operation::new("query FetchAllCategories { categories { id name } }")
///     .operation_name("FetchAllCategories");
/// assert_eq!(operation.operation_name.as_deref(), Some("FetchAllCategories"));
/// assert!(operation.variables.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operation {
    /// The name of the operation to execute.
    pub operation_name: Option<String>,

    /// The query source.
    pub query: String,

    /// The variables of the operation.
    pub variables: Variables,
}

impl Operation {
    /// Create an operation from a query source.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            query: query.into(),
            variables: Variables::default(),
        }
    }

    /// Specify the operation name.
    #[must_use]
    pub fn operation_name(self, name: impl Into<String>) -> Self {
        Self {
            operation_name: Some(name.into()),
            ..self
        }
    }

    /// Specify the variables.
    #[must_use]
    pub fn variables(self, variables: Variables) -> Self {
        Self { variables, ..self }
    }
}
