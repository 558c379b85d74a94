/// Normalizes a repository URL typed or pasted by a user
///
/// - Trims leading/trailing whitespace
/// - Strips surrounding single or double quotes if present
pub fn normalize_repo_input(input: &str) -> String {
    let trimmed = input.trim();

    let unquoted = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_unquotes() {
        assert_eq!(
            normalize_repo_input("  \"https://github.com/octo/repo\"  "),
            "https://github.com/octo/repo"
        );
        assert_eq!(
            normalize_repo_input("'https://github.com/octo/repo'"),
            "https://github.com/octo/repo"
        );
    }

    #[test]
    fn test_leaves_single_quote_char() {
        assert_eq!(normalize_repo_input("\""), "\"");
    }
}
