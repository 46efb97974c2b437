use crate::entities::{departments, organizations, team_members};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What to do with an invited team member whose `(department_id,
/// subfunction_index)` pair matches no existing subfunction position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the member out of the tree without comment.
    #[default]
    Drop,
    /// Leave the member out of the tree, but log a warning per orphan.
    Warn,
    /// Fail assembly on the first orphan.
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error(
        "team member {member_id} references missing subfunction {subfunction_index} of department {department_id}"
    )]
    OrphanMember {
        member_id: Uuid,
        department_id: Uuid,
        subfunction_index: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgChart {
    pub organization: organizations::Model,
    pub departments: Vec<DepartmentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentNode {
    pub department: departments::Model,
    pub subfunctions: Vec<SubfunctionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubfunctionNode {
    pub index: i32,
    pub name: String,
    pub details: Option<String>,
    pub lead: Option<team_members::Model>,
    pub members: Vec<team_members::Model>,
}

impl OrgChart {
    pub fn department_ids(&self) -> Vec<Uuid> {
        self.departments
            .iter()
            .map(|node| node.department.dept_id)
            .collect()
    }
}

/// Joins the three flat collections into the nested chart tree.
///
/// Departments keep their input order and subfunctions their positional
/// order, so identical inputs always produce structurally equal trees. At
/// most one lead is placed per subfunction; when several members with the
/// `Team Lead` role match the same position, the one with the lowest
/// `member_id` wins and the rest are left out, the same way the chart view
/// only ever renders a single lead card.
pub fn assemble(
    organization: organizations::Model,
    departments: Vec<departments::Model>,
    members: Vec<team_members::Model>,
    on_orphan: OrphanPolicy,
) -> Result<OrgChart, AssemblyError> {
    let mut matched = vec![false; members.len()];
    let mut department_nodes = Vec::with_capacity(departments.len());

    for department in departments {
        let mut subfunctions = Vec::with_capacity(department.subfunctions.0.len());

        for (index, subfunction) in department.subfunctions.0.iter().enumerate() {
            let index = index as i32;
            let mut lead: Option<&team_members::Model> = None;
            let mut subordinate_indexes = Vec::new();

            for (pos, member) in members.iter().enumerate() {
                if member.department_id != department.dept_id
                    || member.subfunction_index != index
                {
                    continue;
                }
                matched[pos] = true;
                match member.role {
                    team_members::MemberRole::TeamLead => {
                        let replace = lead
                            .map(|current| member.member_id < current.member_id)
                            .unwrap_or(true);
                        if replace {
                            lead = Some(member);
                        }
                    }
                    team_members::MemberRole::TeamMember => subordinate_indexes.push(pos),
                }
            }

            subfunctions.push(SubfunctionNode {
                index,
                name: subfunction.name.clone(),
                details: subfunction.details.clone(),
                lead: lead.cloned(),
                members: subordinate_indexes
                    .into_iter()
                    .map(|pos| members[pos].clone())
                    .collect(),
            });
        }

        department_nodes.push(DepartmentNode {
            department,
            subfunctions,
        });
    }

    for (pos, member) in members.iter().enumerate() {
        if matched[pos] {
            continue;
        }
        match on_orphan {
            OrphanPolicy::Drop => {}
            OrphanPolicy::Warn => tracing::warn!(
                member_id = %member.member_id,
                department_id = %member.department_id,
                subfunction_index = member.subfunction_index,
                "team member references a missing subfunction, excluded from chart"
            ),
            OrphanPolicy::Error => {
                return Err(AssemblyError::OrphanMember {
                    member_id: member.member_id,
                    department_id: member.department_id,
                    subfunction_index: member.subfunction_index,
                })
            }
        }
    }

    Ok(OrgChart {
        organization,
        departments: department_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::departments::{Subfunction, Subfunctions};
    use crate::entities::team_members::MemberRole;

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

    fn dept(id: u128, subfunction_names: &[&str]) -> departments::Model {
        departments::Model {
            dept_id: Uuid::from_u128(id),
            org_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(100),
            department_name: "Engineering".into(),
            hod_name: "Hod Person".into(),
            hod_email: "hod@acme.test".into(),
            hod_pic: None,
            role: "VP Engineering".into(),
            department_details: None,
            subfunctions: Subfunctions(
                subfunction_names
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

    fn member(id: u128, dept: u128, index: i32, role: MemberRole) -> team_members::Model {
        team_members::Model {
            member_id: Uuid::from_u128(id),
            org_id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(100),
            department_id: Uuid::from_u128(dept),
            subfunction_index: index,
            name: "Al Lee".into(),
            email: "al@acme.test".into(),
            role,
            invited: true,
            profile_pic: None,
            report_to: None,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[test]
    fn assembles_lead_and_members_by_position() {
        let members = vec![
            member(10, 2, 0, MemberRole::TeamLead),
            member(11, 2, 0, MemberRole::TeamMember),
            member(12, 2, 1, MemberRole::TeamMember),
        ];
        let chart = assemble(
            org(),
            vec![dept(2, &["Backend", "Frontend"])],
            members,
            OrphanPolicy::Drop,
        )
        .unwrap();

        let subs = &chart.departments[0].subfunctions;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].name, "Backend");
        assert_eq!(subs[0].lead.as_ref().unwrap().member_id, Uuid::from_u128(10));
        assert_eq!(subs[0].members.len(), 1);
        assert!(subs[1].lead.is_none());
        assert_eq!(subs[1].members.len(), 1);
    }

    #[test]
    fn assembly_is_deterministic() {
        let departments = vec![dept(2, &["Backend"]), dept(3, &["Ops", "Support"])];
        let members = vec![
            member(10, 2, 0, MemberRole::TeamLead),
            member(11, 3, 1, MemberRole::TeamMember),
            member(12, 3, 0, MemberRole::TeamMember),
        ];

        let first = assemble(
            org(),
            departments.clone(),
            members.clone(),
            OrphanPolicy::Drop,
        )
        .unwrap();
        let second = assemble(org(), departments, members, OrphanPolicy::Drop).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lowest_member_id_wins_among_competing_leads() {
        let members = vec![
            member(40, 2, 0, MemberRole::TeamLead),
            member(20, 2, 0, MemberRole::TeamLead),
            member(30, 2, 0, MemberRole::TeamLead),
        ];
        let chart = assemble(org(), vec![dept(2, &["Backend"])], members, OrphanPolicy::Drop)
            .unwrap();

        let sub = &chart.departments[0].subfunctions[0];
        assert_eq!(sub.lead.as_ref().unwrap().member_id, Uuid::from_u128(20));
        assert!(sub.members.is_empty());
    }

    #[test]
    fn orphans_are_dropped_by_default() {
        let members = vec![
            member(10, 2, 5, MemberRole::TeamMember),
            member(11, 99, 0, MemberRole::TeamMember),
        ];
        let chart = assemble(org(), vec![dept(2, &["Backend"])], members, OrphanPolicy::Drop)
            .unwrap();

        let sub = &chart.departments[0].subfunctions[0];
        assert!(sub.lead.is_none());
        assert!(sub.members.is_empty());
    }

    #[test]
    fn orphan_policy_error_fails_assembly() {
        let members = vec![member(10, 2, 5, MemberRole::TeamMember)];
        let err = assemble(
            org(),
            vec![dept(2, &["Backend"])],
            members,
            OrphanPolicy::Error,
        )
        .unwrap_err();

        match err {
            AssemblyError::OrphanMember {
                member_id,
                subfunction_index,
                ..
            } => {
                assert_eq!(member_id, Uuid::from_u128(10));
                assert_eq!(subfunction_index, 5);
            }
        }
    }

    #[test]
    fn department_without_subfunctions_has_no_grandchildren() {
        let chart = assemble(org(), vec![dept(2, &[])], vec![], OrphanPolicy::Drop).unwrap();
        assert!(chart.departments[0].subfunctions.is_empty());
    }
}
