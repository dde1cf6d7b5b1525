use serde_json::{json, Value};

/// Columns requested from `_cat/indices`
pub const CAT_INDICES_COLUMNS: &str = "health,index";

/// Columns requested from `_cat/aliases`
pub const CAT_ALIASES_COLUMNS: &str = "alias,index";

/// Actions the proxy may run against the cluster
///
/// Each variant carries the parameters of one action in the fixed
/// vocabulary; [`ClusterAction::name`] gives its wire name.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterAction {
    Search { index: String, size: u64, body: Value },
    CatIndices { index: Option<String> },
    CatAliases { alias: Option<String> },
    CreateIndex { index: String, body: Option<Value> },
    DeleteIndex { index: String },
    GetMapping { index: Option<String> },
    Bulk { body: Value },
}

impl ClusterAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::CatIndices { .. } => "cat.indices",
            Self::CatAliases { .. } => "cat.aliases",
            Self::CreateIndex { .. } => "indices.create",
            Self::DeleteIndex { .. } => "indices.delete",
            Self::GetMapping { .. } => "indices.getMapping",
            Self::Bulk { .. } => "bulk",
        }
    }

    /// Parameter object as the cluster client receives it
    pub fn params(&self) -> Value {
        match self {
            Self::Search { index, size, body } => json!({
                "index": index,
                "size": size,
                "body": body,
            }),
            Self::CatIndices { index } => json!({
                "index": index,
                "format": "json",
                "h": CAT_INDICES_COLUMNS,
            }),
            Self::CatAliases { alias } => json!({
                "alias": alias,
                "format": "json",
                "h": CAT_ALIASES_COLUMNS,
            }),
            Self::CreateIndex { index, body } => json!({ "index": index, "body": body }),
            Self::DeleteIndex { index } => json!({ "index": index }),
            Self::GetMapping { index } => json!({ "index": index }),
            Self::Bulk { body } => json!({ "body": body }),
        }
    }
}
