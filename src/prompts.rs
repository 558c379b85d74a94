use crate::analysis::QuestionKey;
use crate::github::RepoRef;

/// System message sent with every analysis request
pub const SYSTEM_PROMPT: &str = "You are an AI that analyzes GitHub repositories for Azure solutions.";

pub const ASKSAGE_PROFILE: &str = "a web based tool that provides access to large language models, including Azure OpenAI.
    It is a paid, license based service.
    It is not Government Owned.
    It is RBAC enabled.
    It is deployed in Azure to Azure Government Cloud.
    It does provide chat history.
    It does allow file upload.
    It does enable agents.
    It does not enable the use of organization data.
    It does offer external APIs.
    It does offer tool usage.";

pub const NIPRGPT_PROFILE: &str = "a web based tool that provides access to large language models.
    It is Government Owned.
    It is RBAC enabled.
    It does provide chat history.
    It does allow file upload.
    It does not enable agents.
    It does not enable the use of organization data.
    It does not offer external APIs.
    It does not offer tool usage.";

pub const CAMOGPT_PROFILE: &str = "a web based tool that provides access to large language models.
    It is Government Owned.
    It is RBAC enabled.
    It does provide chat history.
    It does allow file upload.
    It does not enable agents.
    It does not enable the use of organization data.
    It does offer external APIs.
    It does not offer tool usage.";

pub const ARCHITECTURE_ANALYSIS: &str = r#"
You are a cloud architecture analyst specializing in Azure solutions.
I need you to analyze the following GitHub repository and extract specific information.
Assume the repository ownership is {owner} and the repository name is {name}.
If not explicitly stated, assume the repository is not owned by the US Government.

Repository: {url}
Owner: {owner}
Name: {name}

Here is the content from the repository:

{content}

Based on this content, answer the following questions in JSON format:

{questions}

Format your response as a valid JSON with the following keys:
{keys}

For each answer, provide a brief explanation and confidence level (high, medium, low).
Please ensure the JSON is well-structured and valid.
Use the key "answer" for the answer, "explanation" for the explanation, and "confidence" for the confidence level.
If the answer is a boolean, use true or false (without quotes).
"#;

/// Question text for one key, as enumerated in the prompt
pub fn question(key: QuestionKey) -> String {
    match key {
        QuestionKey::RbacEnabled => "Is RBAC (Role-Based Access Control) enabled in this solution? Specifically, RBAC within the application (for uploading data, etc.), not Azure RBAC to the services.".to_string(),
        QuestionKey::AzureGovReady => "Is this solution ready for Azure Government Cloud?".to_string(),
        QuestionKey::AzureSecretReady => "Is this solution ready for Azure Government SECRET or TOP SECRET Cloud?".to_string(),
        QuestionKey::ChatHistory => "Does this solution maintain chat history?".to_string(),
        QuestionKey::AzureServicesCount => "How many different Azure services are used in this solution?".to_string(),
        QuestionKey::ArchitectureDiagramPresent => "Does this solution include architecture diagrams? If yes, describe them.".to_string(),
        QuestionKey::DifferentiatorsFromAsksage => format!("What are the key differentiators of this solution from AskSage, {}", ASKSAGE_PROFILE),
        QuestionKey::DifferentiatorsFromNiprgpt => format!("What are the key differentiators of this solution from NIPRGPT, {}", NIPRGPT_PROFILE),
        QuestionKey::DifferentiatorsFromCamogpt => format!("What are the key differentiators of this solution from CamoGPT, {}", CAMOGPT_PROFILE),
        QuestionKey::DeploymentMethod => "What deployment method does this solution use?".to_string(),
        QuestionKey::CostsEstimate => "What is the estimated cost to deploy and run this solution?".to_string(),
        QuestionKey::Notes => "Any additional notes or observations about this solution?".to_string(),
    }
}

/// Renders [`ARCHITECTURE_ANALYSIS`] for one repository
///
/// Placeholders are filled in a single pass; braces inside the URL or the
/// repository content are copied through verbatim.
pub fn render_analysis_prompt(repo: &RepoRef, content: &str) -> String {
    let questions = QuestionKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| format!("{}. {}", i + 1, question(*key)))
        .collect::<Vec<_>>()
        .join("\n");

    let keys = QuestionKey::ALL
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    fill_template(
        ARCHITECTURE_ANALYSIS,
        &[
            ("owner", repo.owner()),
            ("name", repo.name()),
            ("url", repo.url()),
            ("questions", questions.as_str()),
            ("keys", keys.as_str()),
            ("content", content),
        ],
    )
}

/// Replaces `{key}` placeholders in `template`; unknown braces are kept
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let filled = values.iter().find_map(|(key, value)| {
            let after = tail.strip_prefix('{')?.strip_prefix(*key)?.strip_prefix('}')?;
            Some((*value, after))
        });

        match filled {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
