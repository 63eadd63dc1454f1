use crate::Context;
use serde::Serialize;

/// Body of a single evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub flag_key: String,
    pub namespace_key: String,
    pub context: Context,
    pub entity_id: String,
}

impl EvaluationRequest {
    /// Builds the request from the client defaults and the per-call values.
    ///
    /// The call context is merged over the default one. A call entity id wins
    /// when it's present and non-empty.
    pub fn new(
        flag_key: &str,
        namespace: &str,
        default_context: &Context,
        context: Option<&Context>,
        default_entity_id: &str,
        entity_id: Option<&str>,
    ) -> Self {
        Self {
            flag_key: flag_key.to_owned(),
            namespace_key: namespace.to_owned(),
            context: match context {
                Some(ctx) => default_context.merged_with(ctx),
                None => default_context.clone(),
            },
            entity_id: match entity_id {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => default_entity_id.to_owned(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
