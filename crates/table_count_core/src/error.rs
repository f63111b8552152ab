/// Failure taxonomy for the count call chain.
///
/// `ConfigurationMissing` is only produced during process initialization and
/// is fatal there; the two store variants propagate unhandled up to the
/// entry-point adapter, which collapses them into one generic response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    ConfigurationMissing { name: String },
    StoreConnectionFailed { message: String },
    StoreQueryFailed { message: String },
}

impl CountError {
    pub fn configuration_missing(name: impl Into<String>) -> Self {
        Self::ConfigurationMissing { name: name.into() }
    }

    pub fn store_connection_failed(message: impl Into<String>) -> Self {
        Self::StoreConnectionFailed {
            message: message.into(),
        }
    }

    pub fn store_query_failed(message: impl Into<String>) -> Self {
        Self::StoreQueryFailed {
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::ConfigurationMissing { name } => {
                format!("Missing environment variable: {name}")
            }
            Self::StoreConnectionFailed { message } => {
                format!("store connection failed: {message}")
            }
            Self::StoreQueryFailed { message } => {
                format!("store query failed: {message}")
            }
        }
    }
}

impl std::fmt::Display for CountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_the_variable() {
        let error = CountError::configuration_missing("PG_HOST");
        assert_eq!(error.message(), "Missing environment variable: PG_HOST");
    }

    #[test]
    fn store_errors_carry_the_underlying_message() {
        let error = CountError::store_query_failed("relation \"nope\" does not exist");
        assert!(error.message().contains("does not exist"));
        assert!(error.to_string().starts_with("store query failed"));
    }
}
