use super::assembly::{DepartmentNode, OrgChart, SubfunctionNode};
use super::view_state::CollapseState;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Organization,
    Department,
    Subfunction,
    TeamLead,
    TeamMember,
}

/// One visible card of the chart. Descendants of a collapsed node are not
/// generated at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub kind: NodeKind,
    pub id: Option<Uuid>,
    pub name: String,
    pub title: String,
    pub initials: String,
    /// True iff the node has at least one visible child and is not itself
    /// collapsed, i.e. whether a connecting edge should be drawn below it.
    pub show_connector: bool,
    pub children: Vec<RenderNode>,
}

/// First letter of each whitespace-separated token, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn render(chart: &OrgChart, state: &CollapseState) -> RenderNode {
    let organization = &chart.organization;
    let children = if state.is_collapsed() {
        Vec::new()
    } else {
        chart
            .departments
            .iter()
            .map(|node| render_department(node, state))
            .collect()
    };

    RenderNode {
        kind: NodeKind::Organization,
        id: Some(organization.org_id),
        name: organization.ceo_name.clone(),
        title: "CEO".to_string(),
        initials: initials(&organization.ceo_name),
        show_connector: !children.is_empty(),
        children,
    }
}

fn render_department(node: &DepartmentNode, state: &CollapseState) -> RenderNode {
    let department = &node.department;
    let collapsed = state.is_department_collapsed(department.dept_id);
    let children = if collapsed {
        Vec::new()
    } else {
        node.subfunctions.iter().map(render_subfunction).collect()
    };

    RenderNode {
        kind: NodeKind::Department,
        id: Some(department.dept_id),
        name: department.hod_name.clone(),
        title: department.role.clone(),
        initials: initials(&department.hod_name),
        show_connector: !children.is_empty(),
        children,
    }
}

fn render_subfunction(node: &SubfunctionNode) -> RenderNode {
    let members: Vec<RenderNode> = node
        .members
        .iter()
        .map(|member| RenderNode {
            kind: NodeKind::TeamMember,
            id: Some(member.member_id),
            name: member.name.clone(),
            title: "Team Member".to_string(),
            initials: initials(&member.name),
            show_connector: false,
            children: Vec::new(),
        })
        .collect();

    // Members hang off the lead when one exists, otherwise directly off the
    // subfunction card.
    let children = match &node.lead {
        Some(lead) => vec![RenderNode {
            kind: NodeKind::TeamLead,
            id: Some(lead.member_id),
            name: lead.name.clone(),
            title: "Team Lead".to_string(),
            initials: initials(&lead.name),
            show_connector: !members.is_empty(),
            children: members,
        }],
        None => members,
    };

    RenderNode {
        kind: NodeKind::Subfunction,
        id: None,
        name: node.name.clone(),
        title: node.details.clone().unwrap_or_default(),
        initials: initials(&node.name),
        show_connector: !children.is_empty(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::assembly::{assemble, OrphanPolicy};
    use crate::chart::view_state::RebuildPolicy;
    use crate::entities::departments::{Subfunction, Subfunctions};
    use crate::entities::team_members::MemberRole;
    use crate::entities::{departments, organizations, team_members};

    fn ts() -> chrono::NaiveDateTime {
        chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc()
    }

    fn org() -> organizations::Model {
        organizations::Model {
            org_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(100),
            name: "Acme".into(),
            ceo_name: "Jane Doe".into(),
            ceo_email: "jane@acme.test".into(),
            ceo_pic: None,
            industry: "Software".into(),
            company_size: None,
            city: None,
            country: None,
            year_founded: None,
            organization_type: None,
            work_model: None,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn dept(id: u128, names: &[&str]) -> departments::Model {
        departments::Model {
            dept_id: Uuid::from_u128(id),
            org_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(100),
            department_name: "Eng".into(),
            hod_name: "Hod Person".into(),
            hod_email: "hod@acme.test".into(),
            hod_pic: None,
            role: "VP Engineering".into(),
            department_details: None,
            subfunctions: Subfunctions(
                names
                    .iter()
                    .map(|name| Subfunction {
                        name: (*name).into(),
                        details: None,
                    })
                    .collect(),
            ),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn lead(id: u128, dept: u128, name: &str) -> team_members::Model {
        team_members::Model {
            member_id: Uuid::from_u128(id),
            org_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(100),
            department_id: Uuid::from_u128(dept),
            subfunction_index: 0,
            name: name.into(),
            email: "al@acme.test".into(),
            role: MemberRole::TeamLead,
            invited: true,
            profile_pic: None,
            report_to: None,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn expanded_state(chart: &OrgChart) -> CollapseState {
        let mut state = CollapseState::new();
        state.rebuild(&chart.department_ids(), RebuildPolicy::Reset);
        state
    }

    #[test]
    fn initials_take_first_letter_of_each_token() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("Al Lee"), "AL");
        assert_eq!(initials("plato"), "P");
        assert_eq!(initials("  "), "");
    }

    #[test]
    fn renders_lead_under_subfunction() {
        let chart = assemble(
            org(),
            vec![dept(2, &["Backend"])],
            vec![lead(10, 2, "Al Lee")],
            OrphanPolicy::Drop,
        )
        .unwrap();
        let root = render(&chart, &expanded_state(&chart));

        assert_eq!(root.kind, NodeKind::Organization);
        assert_eq!(root.name, "Jane Doe");
        assert!(root.show_connector);

        let dept_node = &root.children[0];
        assert_eq!(dept_node.kind, NodeKind::Department);
        assert!(dept_node.show_connector);

        let sub = &dept_node.children[0];
        assert_eq!(sub.kind, NodeKind::Subfunction);
        assert_eq!(sub.name, "Backend");
        assert!(sub.show_connector);

        let lead_node = &sub.children[0];
        assert_eq!(lead_node.kind, NodeKind::TeamLead);
        assert_eq!(lead_node.name, "Al Lee");
        assert_eq!(lead_node.initials, "AL");
        assert!(!lead_node.show_connector);
        assert!(lead_node.children.is_empty());
    }

    #[test]
    fn global_collapse_keeps_only_the_organization_card() {
        let chart = assemble(
            org(),
            vec![dept(2, &["Backend"])],
            vec![],
            OrphanPolicy::Drop,
        )
        .unwrap();
        let mut state = expanded_state(&chart);
        state.toggle_all();

        let root = render(&chart, &state);
        assert_eq!(root.kind, NodeKind::Organization);
        assert!(root.children.is_empty());
        assert!(!root.show_connector);
    }

    #[test]
    fn department_collapse_hides_only_its_own_subtree() {
        let chart = assemble(
            org(),
            vec![dept(2, &["Backend"]), dept(3, &["Ops"])],
            vec![],
            OrphanPolicy::Drop,
        )
        .unwrap();
        let mut state = expanded_state(&chart);
        state.toggle_department(Uuid::from_u128(2));

        let root = render(&chart, &state);
        let first = &root.children[0];
        let second = &root.children[1];

        assert!(first.children.is_empty());
        assert!(!first.show_connector);
        assert_eq!(second.children.len(), 1);
        assert!(second.show_connector);
    }

    #[test]
    fn empty_department_draws_no_connector() {
        let chart = assemble(org(), vec![dept(2, &[])], vec![], OrphanPolicy::Drop).unwrap();
        let root = render(&chart, &expanded_state(&chart));
        assert!(!root.children[0].show_connector);
    }

    #[test]
    fn node_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&NodeKind::TeamLead).unwrap(),
            "\"team-lead\""
        );
        assert_eq!(
            serde_json::to_string(&NodeKind::Organization).unwrap(),
            "\"organization\""
        );
    }
}
