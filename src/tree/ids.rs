//! Node identifier generation

use crate::tree::node::NodeKind;
use crate::types::NodeId;
use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Generate a fresh identifier: `<kind>-<unix millis>-<random suffix>`.
pub fn generate_node_id(kind: NodeKind) -> NodeId {
    let prefix = match kind {
        NodeKind::File => "file",
        NodeKind::Folder => "folder",
    };
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &random[..SUFFIX_LEN]
    )
}
