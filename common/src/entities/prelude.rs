pub use super::departments::Entity as Departments;
pub use super::organizations::Entity as Organizations;
pub use super::team_members::Entity as TeamMembers;
