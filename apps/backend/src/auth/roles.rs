//! Role model for ministry staff accounts.
//!
//! A closed enumeration stored as its wire string in the database and in
//! token claims. The numeric hierarchy drives the permission helpers that
//! route handlers use for their own authorization checks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMINISTRATOR")]
    Administrator,
    #[sea_orm(string_value = "ZONE")]
    Zone,
    #[sea_orm(string_value = "PROVINCIAL")]
    Provincial,
    #[sea_orm(string_value = "PROVINCIAL_DIRECTOR")]
    ProvincialDirector,
    #[sea_orm(string_value = "DEPARTMENT")]
    Department,
    #[sea_orm(string_value = "DISTRICT_DIRECTOR")]
    DistrictDirector,
    #[sea_orm(string_value = "CLUSTER")]
    Cluster,
    #[sea_orm(string_value = "DIRECTOR")]
    Director,
    #[sea_orm(string_value = "MENTOR")]
    Mentor,
    #[sea_orm(string_value = "TEACHER")]
    Teacher,
    #[sea_orm(string_value = "OFFICER")]
    Officer,
}

impl Role {
    /// Position in the management hierarchy. Directors and mentors share
    /// a level; officers sit alongside teachers at the bottom.
    pub fn level(self) -> u8 {
        match self {
            Role::Administrator => 9,
            Role::Zone => 8,
            Role::Provincial => 7,
            Role::ProvincialDirector => 6,
            Role::Department => 5,
            Role::DistrictDirector => 4,
            Role::Cluster => 3,
            Role::Director => 2,
            Role::Mentor => 2,
            Role::Teacher => 1,
            Role::Officer => 1,
        }
    }

    /// True when this role is at least as privileged as `required`.
    pub fn has_permission(self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// True when this role may manage accounts holding `target`.
    /// Management requires a strictly higher hierarchy level.
    pub fn can_manage(self, target: Role) -> bool {
        self.level() > target.level()
    }

    /// All roles this role may assign or manage.
    pub fn manageable_roles(self) -> Vec<Role> {
        use sea_orm::Iterable;
        Role::iter().filter(|r| self.can_manage(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn administrator_outranks_everyone() {
        use sea_orm::Iterable;
        for role in Role::iter() {
            assert!(Role::Administrator.has_permission(role));
        }
    }

    #[test]
    fn mentor_and_director_are_peers() {
        assert!(Role::Mentor.has_permission(Role::Director));
        assert!(Role::Director.has_permission(Role::Mentor));
        assert!(!Role::Mentor.can_manage(Role::Director));
    }

    #[test]
    fn teacher_manages_nobody() {
        assert!(Role::Teacher.manageable_roles().is_empty());
        assert!(Role::Officer.manageable_roles().is_empty());
    }

    #[test]
    fn cluster_manages_the_school_level() {
        let manageable = Role::Cluster.manageable_roles();
        assert!(manageable.contains(&Role::Director));
        assert!(manageable.contains(&Role::Mentor));
        assert!(manageable.contains(&Role::Teacher));
        assert!(!manageable.contains(&Role::Cluster));
        assert!(!manageable.contains(&Role::Provincial));
    }

    #[test]
    fn serializes_to_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Role::ProvincialDirector).unwrap(),
            "\"PROVINCIAL_DIRECTOR\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"TEACHER\"").unwrap(),
            Role::Teacher
        );
    }

    #[test]
    fn legacy_admin_alias_is_rejected() {
        // The pre-rewrite system accepted 'ADMIN' in a few code paths; the
        // closed enum does not, so tokens carrying it fail decoding.
        assert!(serde_json::from_str::<Role>("\"ADMIN\"").is_err());
    }
}
