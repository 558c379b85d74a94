#![allow(dead_code)]

use mockito::{Server, ServerGuard};
use repo_arch_analyzer::config::GitHubSettings;

pub mod test_helpers {
    use super::*;
    use repo_arch_analyzer::{RepoRef, RepositoryCollector};

    pub const REPO_URL: &str = "https://github.com/octo/widgets";

    pub async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    /// Points both the REST API and the raw-content host at the mock server
    pub fn github_settings(server: &ServerGuard, token: Option<&str>) -> GitHubSettings {
        GitHubSettings {
            token: token.map(str::to_string),
            api_base: server.url(),
            raw_base: server.url(),
            timeout_secs: 5,
            ..GitHubSettings::default()
        }
    }

    pub fn create_collector(server: &ServerGuard, token: Option<&str>) -> RepositoryCollector {
        RepositoryCollector::new(&github_settings(server, token))
            .expect("Failed to build collector")
    }

    pub fn test_repo() -> RepoRef {
        RepoRef::parse(REPO_URL).expect("Invalid test repository URL")
    }

    pub fn setup_test_logger() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }
}
