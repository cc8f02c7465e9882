//! Built-in demonstration catalog
//!
//! A six-step web application compromise, from SQL injection to data theft,
//! with ATT&CK references and example CVSS scores.

use super::{GraphDocument, GraphSource, SourceResult};
use crate::models::{AttackEdge, AttackNode, Category, Severity};

/// The demonstration graph as a source
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn document() -> GraphDocument {
        let nodes = vec![
            AttackNode::new("1", Category::Entry, Severity::High, 8.1)
                .with_label("Initial Access (SQL Injection)")
                .with_description("Gain a foothold through a SQL injection flaw")
                .with_technique("T1190")
                .with_metadata("tactic", "initial-access")
                .with_remediation("Fix the injection point and use parameterized queries"),
            AttackNode::new("2", Category::Vulnerability, Severity::Medium, 5.3)
                .with_label("Discovery (User Enumeration)")
                .with_description("Enumerate database users and their privileges")
                .with_technique("T1087")
                .with_metadata("tactic", "discovery")
                .with_remediation("Restrict database account privileges and enable audit logging"),
            AttackNode::new("3", Category::PrivilegeEscalation, Severity::Critical, 9.8)
                .with_label("Privilege Escalation (Database Admin)")
                .with_description("Abuse a database misconfiguration to become administrator")
                .with_technique("T1068")
                .with_metadata("tactic", "privilege-escalation")
                .with_remediation("Harden database configuration and apply least privilege"),
            AttackNode::new("4", Category::Exploit, Severity::High, 7.5)
                .with_label("Lateral Movement (Internal Scan)")
                .with_description("Scan the internal network for further targets")
                .with_technique("T1018")
                .with_metadata("tactic", "discovery")
                .with_remediation("Segment the network and deploy intrusion detection"),
            AttackNode::new("5", Category::Persistence, Severity::Critical, 8.8)
                .with_label("Persistence (Backdoor)")
                .with_description("Plant a backdoor to keep access")
                .with_technique("T1053")
                .with_metadata("tactic", "persistence")
                .with_remediation("Scan regularly and monitor for unexpected processes"),
            AttackNode::new("6", Category::Exfiltration, Severity::Critical, 9.1)
                .with_label("Exfiltration (Sensitive Data)")
                .with_description("Steal sensitive data and move it off the network")
                .with_technique("T1041")
                .with_metadata("tactic", "exfiltration")
                .with_remediation("Encrypt data at rest and monitor outbound traffic"),
        ];

        let edges = vec![
            AttackEdge::new("e1", "1", "2", 0.95)
                .with_weight(1.0)
                .with_condition("injection point reachable from the internet"),
            AttackEdge::new("e2", "2", "3", 0.80)
                .with_weight(1.2)
                .with_condition("database account has excessive privileges"),
            AttackEdge::new("e3", "3", "4", 0.90)
                .with_weight(1.1)
                .with_condition("database host can reach the internal network"),
            AttackEdge::new("e4", "4", "5", 0.75)
                .with_weight(1.3)
                .with_condition("unpatched internal service found"),
            AttackEdge::new("e5", "5", "6", 0.85)
                .with_weight(1.2)
                .with_condition("outbound traffic is not filtered"),
        ];

        GraphDocument { nodes, edges }
    }
}

impl GraphSource for SampleCatalog {
    fn describe(&self) -> String {
        "built-in sample catalog".to_string()
    }

    fn load_document(&self) -> SourceResult<GraphDocument> {
        Ok(Self::document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LoadOptions;

    #[test]
    fn test_sample_is_valid() {
        let doc = SampleCatalog::document();
        assert!(doc.issues().is_empty());
        assert_eq!(doc.nodes.len(), 6);
        assert_eq!(doc.edges.len(), 5);
        assert_eq!(doc.edges[0].label, "95%");
        assert!(doc.edges.iter().all(|e| e.conditions.len() == 1));
        assert_eq!(doc.nodes[0].metadata["tactic"], "initial-access");
        assert_eq!(doc.nodes[5].metadata["tactic"], "exfiltration");
    }

    #[test]
    fn test_sample_loads() {
        let graph = SampleCatalog.load(&LoadOptions::default()).expect("load sample");
        assert_eq!(graph.nodes_by_category(Category::Entry), vec!["1"]);
        assert_eq!(graph.nodes_by_category(Category::Exfiltration), vec!["6"]);
    }
}
