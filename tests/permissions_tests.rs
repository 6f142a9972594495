use aerodesk::config::Config;
use aerodesk::core::permissions::{Action, Operator, allowed_roles, is_allowed};
use aerodesk::errors::AppError;
use aerodesk::models::role::Role;

const ALL_ACTIONS: [Action; 9] = [
    Action::ManageReference,
    Action::EditLogbook,
    Action::EditClosedLogbook,
    Action::CloseLogbookMonth,
    Action::IssueReceipt,
    Action::ViewFinancials,
    Action::SendMessage,
    Action::ExportData,
    Action::ManageDatabase,
];

#[test]
fn test_admin_can_do_everything() {
    for action in ALL_ACTIONS {
        assert!(is_allowed(&[Role::Admin], action), "{action:?}");
    }
}

#[test]
fn test_pilot_edits_logbook_but_not_money() {
    let pilot = [Role::Pilot];
    assert!(is_allowed(&pilot, Action::EditLogbook));
    assert!(is_allowed(&pilot, Action::SendMessage));
    assert!(!is_allowed(&pilot, Action::IssueReceipt));
    assert!(!is_allowed(&pilot, Action::ViewFinancials));
    assert!(!is_allowed(&pilot, Action::CloseLogbookMonth));
    assert!(!is_allowed(&pilot, Action::EditClosedLogbook));
}

#[test]
fn test_financial_issues_receipts() {
    let fin = [Role::Financial];
    assert!(is_allowed(&fin, Action::IssueReceipt));
    assert!(is_allowed(&fin, Action::ViewFinancials));
    assert!(!is_allowed(&fin, Action::EditLogbook));
}

#[test]
fn test_roles_combine() {
    let roles = [Role::Pilot, Role::Financial];
    assert!(is_allowed(&roles, Action::EditLogbook));
    assert!(is_allowed(&roles, Action::IssueReceipt));
}

#[test]
fn test_no_roles_no_access() {
    for action in ALL_ACTIONS {
        assert!(!is_allowed(&[], action), "{action:?}");
    }
}

#[test]
fn test_database_is_admin_only() {
    assert!(allowed_roles(Action::ManageDatabase).is_empty());
    assert!(!is_allowed(&[Role::Director], Action::ManageDatabase));
}

#[test]
fn test_operator_require_reports_action() {
    let op = Operator::new("joao", vec![Role::Mechanic]);
    match op.require(Action::IssueReceipt) {
        Err(AppError::PermissionDenied(msg)) => assert!(msg.contains("issue receipts")),
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
    assert!(op.can(Action::SendMessage));
}

#[test]
fn test_role_codes() {
    assert_eq!(Role::from_code(" Financial "), Some(Role::Financial));
    assert_eq!(Role::from_code("pilot"), Some(Role::Pilot));
    assert_eq!(Role::from_code("captain"), None);
    assert!(Role::parse_all(&["admin", "captain"]).is_err());
    assert_eq!(
        Role::parse_all(&["director", "pilot"]).expect("valid roles"),
        vec![Role::Director, Role::Pilot]
    );
}

#[test]
fn test_role_override_only_narrows_configured_roles() {
    let cfg = Config {
        operator: "carla".into(),
        operator_roles: vec!["financial".into(), "pilot".into()],
        ..Config::default()
    };

    let op = Operator::resolve(&cfg, &["pilot".to_string()]).expect("configured role");
    assert_eq!(op.roles, vec![Role::Pilot]);

    for escalation in ["admin", "director"] {
        assert!(matches!(
            Operator::resolve(&cfg, &[escalation.to_string()]),
            Err(AppError::PermissionDenied(_))
        ));
    }

    let op = Operator::resolve(&cfg, &[]).expect("configured roles");
    assert_eq!(op.roles, vec![Role::Financial, Role::Pilot]);
}

#[test]
fn test_admin_may_act_as_any_role() {
    let cfg = Config::default();
    let op = Operator::resolve(&cfg, &["director".to_string()]).expect("admin narrows");
    assert_eq!(op.roles, vec![Role::Director]);
    assert!(!op.can(Action::ManageDatabase));
}
