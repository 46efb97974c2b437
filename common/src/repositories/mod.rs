pub mod departments;
pub mod organizations;
pub mod team_members;

pub use departments::{DepartmentRepository, DepartmentRepositoryImpl};
pub use organizations::{OrganizationRepository, OrganizationRepositoryImpl};
pub use team_members::{TeamMemberRepository, TeamMemberRepositoryImpl};
