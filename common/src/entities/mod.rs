pub mod departments;
pub mod organizations;
pub mod prelude;
pub mod team_members;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Related;

    #[test]
    fn member_role_serializes_as_display_strings() {
        fn assert_roundtrip<T>(value: &T, expected: &str)
        where
            T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
        {
            let encoded = serde_json::to_string(value).unwrap();
            assert_eq!(encoded, format!("\"{}\"", expected));
            let decoded: T = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, *value);
        }

        assert_roundtrip(&team_members::MemberRole::TeamLead, "Team Lead");
        assert_roundtrip(&team_members::MemberRole::TeamMember, "Team Member");
    }

    #[test]
    fn subfunction_details_default_to_none() {
        let sub: departments::Subfunction =
            serde_json::from_str(r#"{"name":"Backend"}"#).unwrap();
        assert_eq!(sub.name, "Backend");
        assert_eq!(sub.details, None);
    }

    #[test]
    fn relation_definitions_are_accessible() {
        let _ = <departments::Entity as Related<organizations::Entity>>::to();
        let _ = <departments::Entity as Related<team_members::Entity>>::to();
        let _ = <organizations::Entity as Related<departments::Entity>>::to();
        let _ = <organizations::Entity as Related<team_members::Entity>>::to();
        let _ = <team_members::Entity as Related<organizations::Entity>>::to();
        let _ = <team_members::Entity as Related<departments::Entity>>::to();
    }
}
