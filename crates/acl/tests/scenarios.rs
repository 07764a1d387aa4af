use acl::{Ability, Grant, PermissionCatalog, RuleDeriver, UserRecord, derive_grants};
use serde_json::json;

const CATALOG: &str = r#"[
    {"id": 1, "action": "read", "subject": "user"},
    {"id": 4, "action": "manage", "subject": "category"},
    {"id": 7, "action": "read", "subject": "report"},
    {"id": 9, "action": "delete", "subject": "report"}
]"#;

fn catalog() -> PermissionCatalog {
    PermissionCatalog::from_json(CATALOG).unwrap()
}

fn ability_for(user: serde_json::Value) -> Ability {
    let user = UserRecord::from_value(user).unwrap();
    Ability::for_user(&user, &catalog())
}

#[test]
fn staff_with_report_permission() {
    let user = UserRecord::from_value(json!({ "role": [{ "permissionID": [7] }] })).unwrap();
    let catalog = PermissionCatalog::from_json(
        r#"[{ "id": 7, "action": "read", "subject": "report" }]"#,
    )
    .unwrap();

    let grants = derive_grants(&user, &catalog);
    assert_eq!(
        grants,
        vec![
            Grant::new("read", "analytics"),
            Grant::new("read", "report"),
            Grant::new("read", "view-post"),
        ]
    );

    let ability = Ability::new(grants);
    assert!(ability.can("read", "report"));
    assert!(ability.cannot("delete", "report"));
    assert!(ability.can("read", "view-post"));
}

#[test]
fn member_pages() {
    let ability = ability_for(json!({ "_id": "m1", "email": "m@example.com", "role": "member" }));
    assert!(ability.can("read", "member-page"));
    assert!(ability.can("read", "view-post"));
    assert!(ability.cannot("update", "member-page"));
    assert!(ability.cannot("read", "analytics"));
    assert!(ability.cannot("read", "user"));
}

#[test]
fn staff_always_reads_analytics() {
    for role in [
        json!([{ "permissionID": [] }]),
        json!([{ "name": "no-permissions" }]),
        json!([{ "permissionID": [404] }]),
        json!([{ "permissionID": [1] }, { "permissionID": [9] }]),
        json!([{ "permissionID": [-1] }]),
        json!([{ "permissionID": [5_000_000_000u64] }]),
        json!([{ "permissionID": [u64::MAX] }]),
        json!([{ "permissionID": [7.0] }]),
        json!([{ "permissionID": [7.5] }]),
        json!([{ "permissionID": [7] }, { "permissionID": [-1] }]),
    ] {
        let ability = ability_for(json!({ "role": role.clone() }));
        assert!(ability.can("read", "analytics"), "role {role}");
    }
}

#[test]
fn unmatchable_ids_do_not_drop_sibling_grants() {
    let ability = ability_for(json!({
        "role": [
            { "permissionID": [7] },
            { "permissionID": [-1, 5_000_000_000u64, 2.5] },
            { "permissionID": [1.0] }
        ]
    }));
    assert!(ability.can("read", "analytics"));
    assert!(ability.can("read", "report"));
    assert!(ability.can("read", "view-post"));
    assert!(ability.can("read", "user"));
    assert!(ability.cannot("delete", "report"));
    assert_eq!(ability.grants().len(), 4);
}

#[test]
fn users_without_usable_role_get_nothing() {
    for user in [
        json!({}),
        json!({ "role": null }),
        json!({ "role": [] }),
        json!({ "role": "guest" }),
        json!({ "role": { "permissionID": [7] } }),
        json!({ "role": 3 }),
    ] {
        let ability = ability_for(user.clone());
        assert!(ability.grants().is_empty(), "user {user}");
        for (action, subject) in [
            ("read", "analytics"),
            ("read", "member-page"),
            ("manage", "all"),
            ("read", "all"),
        ] {
            assert!(ability.cannot(action, subject), "user {user}: {action} {subject}");
        }
    }
}

#[test]
fn every_report_permission_implies_view_post() {
    let catalog = catalog();
    for permission in catalog.iter().filter(|p| p.subject.as_str() == "report") {
        let user = UserRecord::from_value(json!({ "role": [{ "permissionID": [permission.id] }] }))
            .unwrap();
        let grants = derive_grants(&user, &catalog);
        assert!(grants.contains(&permission.grant()));
        assert!(grants.contains(&Grant::new("read", "view-post")));
    }
}

#[test]
fn manage_permission_covers_all_actions_on_subject() {
    let ability = ability_for(json!({ "role": [{ "permissionID": [4] }] }));
    assert!(ability.can("create", "category"));
    assert!(ability.can("delete", &json!({ "type": "category", "_id": "c1" })));
    assert!(ability.cannot("read", "report"));
}

#[test]
fn derivation_is_stable_across_calls() {
    let user = UserRecord::from_value(json!({
        "role": [{ "permissionID": [9, 7, 1, 7] }, { "permissionID": [4] }]
    }))
    .unwrap();
    let deriver = RuleDeriver::default();
    let catalog = catalog();

    let first = deriver.derive(&user, &catalog);
    let second = deriver.derive(&user, &catalog);
    assert_eq!(first, second);
    assert_eq!(first.len(), 9);
}

#[test]
fn object_subjects_match_their_type_tag() {
    let ability = ability_for(json!({ "role": "member" }));
    assert!(ability.can("read", &json!({ "type": "member-page" })));
    assert!(ability.cannot("read", &json!({})));
    assert!(ability.cannot("read", &json!({ "type": null })));
}
