//! 按角色生成的导航菜单

use crate::models::{has_role, Role, RoleRecord, Session};

/// 菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
}

impl MenuEntry {
    const fn new(label: &'static str, path: &'static str) -> Self {
        Self { label, path }
    }
}

/// 未登录时的跳转目标
pub const LOGIN_PATH: &str = "/login";

const USER_ALWAYS: [MenuEntry; 2] = [
    MenuEntry::new("My Profile", "/userdashboard/user-profile"),
    MenuEntry::new("Active Roles", "/userdashboard/roles"),
];

const USER_BY_ROLE: [(Role, MenuEntry); 3] = [
    (
        Role::Organizer,
        MenuEntry::new("Organizer Panel", "/userdashboard/organizer-dashboard"),
    ),
    (
        Role::Reviewer,
        MenuEntry::new("Reviewer Panel", "/userdashboard/reviewer-dashboard"),
    ),
    (
        Role::Author,
        MenuEntry::new("Author Panel", "/userdashboard/author-dashboard"),
    ),
];

const ADMIN: [MenuEntry; 5] = [
    MenuEntry::new("Profile", "/admindashboard/profile"),
    MenuEntry::new("Approved", "/admindashboard/all-conferences"),
    MenuEntry::new("Rejected", "/admindashboard/rejected-conferences"),
    MenuEntry::new("Requests", "/admindashboard/pending-requests"),
    MenuEntry::new("Edit Conf", "/admindashboard/update-conference"),
];

/// 用户面板菜单：个人资料与角色页始终存在，其余按持有的角色出现
pub fn user_menu(roles: &[RoleRecord]) -> Vec<MenuEntry> {
    USER_ALWAYS
        .into_iter()
        .chain(
            USER_BY_ROLE
                .into_iter()
                .filter(|(role, _)| has_role(roles, *role))
                .map(|(_, entry)| entry),
        )
        .collect()
}

pub fn admin_menu() -> Vec<MenuEntry> {
    ADMIN.to_vec()
}

/// 登录后的默认面板
pub fn dashboard_path(session: &Session) -> &'static str {
    if session.user.is_admin() {
        "/admindashboard/admin-dashboard"
    } else {
        "/userdashboard/user-dashboard"
    }
}

pub fn menu_for(session: &Session) -> Vec<MenuEntry> {
    if session.user.is_admin() {
        admin_menu()
    } else {
        user_menu(&session.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;

    fn session(access_level: u8, roles: Vec<RoleRecord>) -> Session {
        Session {
            token: "tok".into(),
            user: SessionUser {
                id: "u1".into(),
                access_level,
                ..SessionUser::default()
            },
            roles,
        }
    }

    #[test]
    fn plain_user_sees_profile_and_roles_only() {
        let labels: Vec<_> = user_menu(&[]).iter().map(|e| e.label).collect();
        assert_eq!(labels, ["My Profile", "Active Roles"]);
    }

    #[test]
    fn role_sections_follow_held_roles() {
        let roles = vec![
            RoleRecord::for_conference(Role::Author, "c1"),
            RoleRecord::for_conference(Role::Organizer, "c2"),
        ];
        let paths: Vec<_> = user_menu(&roles).iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            [
                "/userdashboard/user-profile",
                "/userdashboard/roles",
                "/userdashboard/organizer-dashboard",
                "/userdashboard/author-dashboard",
            ]
        );
    }

    #[test]
    fn admins_get_the_admin_dashboard() {
        let admin = session(1, Vec::new());
        assert_eq!(dashboard_path(&admin), "/admindashboard/admin-dashboard");
        assert_eq!(menu_for(&admin).len(), 5);

        let user = session(0, vec![RoleRecord::new(Role::Reviewer)]);
        assert_eq!(dashboard_path(&user), "/userdashboard/user-dashboard");
        assert_eq!(menu_for(&user).last().map(|e| e.label), Some("Reviewer Panel"));
    }
}
