//! Role-gated member roster for the admin surface.

use tatame_common::models::member::Member;

/// Members an administrator may review and act on. Admins administer others,
/// not themselves, so admin records are dropped; order is the store's.
pub fn manageable(members: Vec<Member>) -> Vec<Member> {
    members.into_iter().filter(|m| !m.role.is_admin()).collect()
}

/// Case-insensitive substring filter on full name OR nickname. An empty query
/// returns the input unchanged.
pub fn filter_by_query(members: Vec<Member>, query: &str) -> Vec<Member> {
    if query.is_empty() {
        return members;
    }
    let needle = query.to_lowercase();
    members
        .into_iter()
        .filter(|m| {
            m.full_name.to_lowercase().contains(&needle)
                || m.nickname.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tatame_common::models::member::{Belt, PaymentStatus, Role};

    fn member(uid: &str, full_name: &str, nickname: &str, role: Role) -> Member {
        Member {
            uid: uid.into(),
            full_name: full_name.into(),
            nickname: nickname.into(),
            email: format!("{uid}@example.com"),
            belt: Belt::White,
            birth_year: 1990,
            birth_month: 1,
            birth_day: 1,
            role,
            payment_status: PaymentStatus::Unset,
            payment_date: None,
        }
    }

    #[test]
    fn excludes_admins() {
        let roster = manageable(vec![
            member("u1", "Ana Silva", "Tubarão", Role::Student),
            member("u2", "Mestre Carlos", "Mestre", Role::Admin),
            member("u3", "Bruno Costa", "Gigante", Role::Student),
        ]);
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|m| !m.role.is_admin()));
    }

    #[test]
    fn filter_matches_nickname_case_insensitively() {
        let members = vec![member("u1", "Ana Silva", "Tubarão", Role::Student)];
        let hits = filter_by_query(members, "tuba");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nickname, "Tubarão");
    }

    #[test]
    fn filter_matches_full_name() {
        let members = vec![
            member("u1", "Ana Silva", "Tubarão", Role::Student),
            member("u2", "Bruno Costa", "Gigante", Role::Student),
        ];
        let hits = filter_by_query(members, "SILVA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].uid, "u1");
    }

    #[test]
    fn empty_query_is_identity() {
        let members = vec![
            member("u1", "Ana Silva", "Tubarão", Role::Student),
            member("u2", "Bruno Costa", "Gigante", Role::Student),
        ];
        let out = filter_by_query(members.clone(), "");
        assert_eq!(out, members);
    }

    #[test]
    fn filter_with_no_hits_is_empty() {
        let members = vec![member("u1", "Ana Silva", "Tubarão", Role::Student)];
        assert!(filter_by_query(members, "zzz").is_empty());
    }
}
