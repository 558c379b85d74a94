//! Typed answer record returned by the model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// The twelve questions every analysis answers, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    /// Application-level RBAC
    RbacEnabled,
    /// Azure Government readiness
    AzureGovReady,
    /// Azure Government SECRET/TOP SECRET readiness
    AzureSecretReady,
    /// Chat history retention
    ChatHistory,
    /// Number of distinct Azure services
    AzureServicesCount,
    /// Architecture diagrams present
    ArchitectureDiagramPresent,
    /// Differentiators from AskSage
    DifferentiatorsFromAsksage,
    /// Differentiators from NIPRGPT
    DifferentiatorsFromNiprgpt,
    /// Differentiators from CamoGPT
    DifferentiatorsFromCamogpt,
    /// Deployment method
    DeploymentMethod,
    /// Cost estimate
    CostsEstimate,
    /// Free-form notes
    Notes,
}

impl QuestionKey {
    /// All keys in report order
    pub const ALL: [QuestionKey; 12] = [
        QuestionKey::RbacEnabled,
        QuestionKey::AzureGovReady,
        QuestionKey::AzureSecretReady,
        QuestionKey::ChatHistory,
        QuestionKey::AzureServicesCount,
        QuestionKey::ArchitectureDiagramPresent,
        QuestionKey::DifferentiatorsFromAsksage,
        QuestionKey::DifferentiatorsFromNiprgpt,
        QuestionKey::DifferentiatorsFromCamogpt,
        QuestionKey::DeploymentMethod,
        QuestionKey::CostsEstimate,
        QuestionKey::Notes,
    ];

    /// JSON key used in the prompt and the reply
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::RbacEnabled => "rbac_enabled",
            QuestionKey::AzureGovReady => "azure_gov_ready",
            QuestionKey::AzureSecretReady => "azure_secret_ready",
            QuestionKey::ChatHistory => "chat_history",
            QuestionKey::AzureServicesCount => "azure_services_count",
            QuestionKey::ArchitectureDiagramPresent => "architecture_diagram_present",
            QuestionKey::DifferentiatorsFromAsksage => "differentiators_from_asksage",
            QuestionKey::DifferentiatorsFromNiprgpt => "differentiators_from_niprgpt",
            QuestionKey::DifferentiatorsFromCamogpt => "differentiators_from_camogpt",
            QuestionKey::DeploymentMethod => "deployment_method",
            QuestionKey::CostsEstimate => "costs_estimate",
            QuestionKey::Notes => "notes",
        }
    }

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKey::RbacEnabled => "RBAC enabled",
            QuestionKey::AzureGovReady => "Azure Government ready",
            QuestionKey::AzureSecretReady => "Azure SECRET/TOP SECRET ready",
            QuestionKey::ChatHistory => "Chat history",
            QuestionKey::AzureServicesCount => "Azure services used",
            QuestionKey::ArchitectureDiagramPresent => "Architecture diagram",
            QuestionKey::DifferentiatorsFromAsksage => "vs. AskSage",
            QuestionKey::DifferentiatorsFromNiprgpt => "vs. NIPRGPT",
            QuestionKey::DifferentiatorsFromCamogpt => "vs. CamoGPT",
            QuestionKey::DeploymentMethod => "Deployment method",
            QuestionKey::CostsEstimate => "Cost estimate",
            QuestionKey::Notes => "Notes",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model's self-reported confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// High confidence
    High,
    /// Medium confidence
    Medium,
    /// Low confidence, also used for anything unrecognized
    #[default]
    Low,
}

impl Confidence {
    /// Maps a label case-insensitively; unknown labels are `Low`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    /// Lower-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_str().map(Confidence::from_label).unwrap_or_default())
    }
}

/// One answer: value, explanation and confidence
///
/// The prompt asks for `answer`; `value` is accepted too. Missing or
/// malformed explanation and confidence fall back to empty and `low`, and a
/// bare JSON value is taken as the answer itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerField {
    /// Answer as returned by the model: boolean, number or text
    pub value: Value,
    /// Short justification
    pub explanation: String,
    /// Self-reported confidence
    pub confidence: Confidence,
}

impl AnswerField {
    /// Creates an answer
    pub fn new(value: impl Into<Value>, explanation: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            value: value.into(),
            explanation: explanation.into(),
            confidence,
        }
    }

    /// Value rendered for display: strings unquoted, null as "-"
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for AnswerField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let field = match Value::deserialize(deserializer)? {
            Value::Object(mut map) => {
                let value = map.remove("value")
                    .or_else(|| map.remove("answer"))
                    .unwrap_or(Value::Null);
                let explanation = match map.remove("explanation") {
                    Some(Value::String(text)) => text,
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                let confidence = map.get("confidence")
                    .and_then(Value::as_str)
                    .map(Confidence::from_label)
                    .unwrap_or_default();
                AnswerField { value, explanation, confidence }
            }
            bare => AnswerField { value: bare, explanation: String::new(), confidence: Confidence::Low },
        };
        Ok(field)
    }
}

/// Answers to all twelve questions
///
/// Deserialization needs every key; a reply missing any of them is treated
/// as unparseable and replaced by [`AnalysisResult::sentinel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rbac_enabled: AnswerField,
    pub azure_gov_ready: AnswerField,
    pub azure_secret_ready: AnswerField,
    pub chat_history: AnswerField,
    pub azure_services_count: AnswerField,
    pub architecture_diagram_present: AnswerField,
    pub differentiators_from_asksage: AnswerField,
    pub differentiators_from_niprgpt: AnswerField,
    pub differentiators_from_camogpt: AnswerField,
    pub deployment_method: AnswerField,
    pub costs_estimate: AnswerField,
    pub notes: AnswerField,
}

impl AnalysisResult {
    /// The fixed result used whenever the model reply cannot be parsed
    pub fn sentinel() -> Self {
        let unknown = || AnswerField::new("Unknown", "Could not determine", Confidence::Low);
        Self {
            rbac_enabled: unknown(),
            azure_gov_ready: unknown(),
            azure_secret_ready: unknown(),
            chat_history: unknown(),
            azure_services_count: unknown(),
            architecture_diagram_present: unknown(),
            differentiators_from_asksage: unknown(),
            differentiators_from_niprgpt: unknown(),
            differentiators_from_camogpt: unknown(),
            deployment_method: unknown(),
            costs_estimate: unknown(),
            notes: AnswerField::new("Error processing repository data", "Could not determine", Confidence::Low),
        }
    }

    /// Returns true when this is the parse-failure fallback
    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }

    /// Answer for one key
    pub fn get(&self, key: QuestionKey) -> &AnswerField {
        match key {
            QuestionKey::RbacEnabled => &self.rbac_enabled,
            QuestionKey::AzureGovReady => &self.azure_gov_ready,
            QuestionKey::AzureSecretReady => &self.azure_secret_ready,
            QuestionKey::ChatHistory => &self.chat_history,
            QuestionKey::AzureServicesCount => &self.azure_services_count,
            QuestionKey::ArchitectureDiagramPresent => &self.architecture_diagram_present,
            QuestionKey::DifferentiatorsFromAsksage => &self.differentiators_from_asksage,
            QuestionKey::DifferentiatorsFromNiprgpt => &self.differentiators_from_niprgpt,
            QuestionKey::DifferentiatorsFromCamogpt => &self.differentiators_from_camogpt,
            QuestionKey::DeploymentMethod => &self.deployment_method,
            QuestionKey::CostsEstimate => &self.costs_estimate,
            QuestionKey::Notes => &self.notes,
        }
    }

    /// Answers in report order
    pub fn iter(&self) -> impl Iterator<Item = (QuestionKey, &AnswerField)> + '_ {
        QuestionKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_shape() {
        let sentinel = AnalysisResult::sentinel();
        let encoded = serde_json::to_value(&sentinel).unwrap();
        let object = encoded.as_object().unwrap();

        assert_eq!(object.len(), 12);
        for key in QuestionKey::ALL {
            assert_eq!(object[key.as_str()]["confidence"], "low");
        }
        assert_eq!(object["notes"]["value"], "Error processing repository data");
        assert_eq!(object["rbac_enabled"]["value"], "Unknown");
    }

    #[test]
    fn test_answer_accepts_answer_alias() {
        let field: AnswerField = serde_json::from_value(json!({
            "answer": true,
            "explanation": "Entra ID roles gate uploads",
            "confidence": "High"
        })).unwrap();

        assert_eq!(field.value, json!(true));
        assert_eq!(field.confidence, Confidence::High);
        assert_eq!(field.display_value(), "true");
    }

    #[test]
    fn test_answer_lenient_fields() {
        let field: AnswerField = serde_json::from_value(json!({
            "value": 7,
            "explanation": null,
            "confidence": 0.9
        })).unwrap();

        assert_eq!(field.value, json!(7));
        assert_eq!(field.explanation, "");
        assert_eq!(field.confidence, Confidence::Low);
    }

    #[test]
    fn test_bare_answer() {
        let field: AnswerField = serde_json::from_value(json!("Bicep templates")).unwrap();
        assert_eq!(field.display_value(), "Bicep templates");
        assert_eq!(field.confidence, Confidence::Low);
    }

    #[test]
    fn test_missing_key_fails() {
        let mut value = serde_json::to_value(AnalysisResult::sentinel()).unwrap();
        value.as_object_mut().unwrap().remove("notes");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
    }

    #[test]
    fn test_iter_order_matches_keys() {
        let sentinel = AnalysisResult::sentinel();
        let keys: Vec<&str> = sentinel.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys.first(), Some(&"rbac_enabled"));
        assert_eq!(keys.last(), Some(&"notes"));
        assert_eq!(keys.len(), 12);
    }
}
