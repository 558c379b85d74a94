//! Environment variable names and lookup helpers

/// GitHub token used for the authenticated contents API
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Override for the GitHub REST API base URL
pub const GITHUB_API_BASE_URL: &str = "GITHUB_API_BASE_URL";
/// Override for the raw-content host base URL
pub const GITHUB_RAW_BASE_URL: &str = "GITHUB_RAW_BASE_URL";
/// Azure OpenAI API key
pub const AZURE_OPENAI_KEY: &str = "AZURE_OPENAI_KEY";
/// Azure OpenAI resource endpoint
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Azure OpenAI deployment name
pub const AZURE_OPENAI_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
/// Azure OpenAI API version
pub const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

/// Reads an environment variable, treating empty values as unset
pub fn get_env_value(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Overwrites `slot` with the environment value for `key` when one is set
pub(crate) fn override_from_env(slot: &mut Option<String>, key: &str) {
    if let Some(value) = get_env_value(key) {
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_unset() {
        std::env::set_var("REPO_ARCH_ANALYZER_TEST_EMPTY", "   ");
        assert_eq!(get_env_value("REPO_ARCH_ANALYZER_TEST_EMPTY"), None);
        std::env::remove_var("REPO_ARCH_ANALYZER_TEST_EMPTY");
    }

    #[test]
    fn test_override_keeps_existing_when_unset() {
        let mut slot = Some("from-file".to_string());
        override_from_env(&mut slot, "REPO_ARCH_ANALYZER_TEST_MISSING");
        assert_eq!(slot.as_deref(), Some("from-file"));

        std::env::set_var("REPO_ARCH_ANALYZER_TEST_SET", "from-env");
        override_from_env(&mut slot, "REPO_ARCH_ANALYZER_TEST_SET");
        assert_eq!(slot.as_deref(), Some("from-env"));
        std::env::remove_var("REPO_ARCH_ANALYZER_TEST_SET");
    }
}
