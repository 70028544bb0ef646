//! Tests for user drafts, identifiers and the serialised record shape.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn draft_accepts_valid_input() {
    let draft = UserDraft::new("Ada", "ada@x.io").expect("valid draft");
    assert_eq!(draft.name(), "Ada");
    assert_eq!(draft.email(), "ada@x.io");
}

#[rstest]
#[case("", "ada@x.io", UserValidationError::EmptyName)]
#[case("   ", "ada@x.io", UserValidationError::EmptyName)]
#[case("Ada", "", UserValidationError::EmptyEmail)]
#[case("Ada", "ada", UserValidationError::MalformedEmail)]
#[case("Ada", "@x.io", UserValidationError::MalformedEmail)]
#[case("Ada", "ada@", UserValidationError::MalformedEmail)]
#[case("Ada", "ada@x@io", UserValidationError::MalformedEmail)]
#[case("Ada", "ada lovelace@x.io", UserValidationError::MalformedEmail)]
fn draft_rejects_invalid_input(
    #[case] name: &str,
    #[case] email: &str,
    #[case] expected: UserValidationError,
) {
    assert_eq!(UserDraft::new(name, email), Err(expected));
}

#[rstest]
fn draft_rejects_overlong_fields() {
    let long_name = "a".repeat(NAME_MAX + 1);
    assert_eq!(
        UserDraft::new(long_name, "ada@x.io"),
        Err(UserValidationError::NameTooLong { max: NAME_MAX })
    );

    let long_email = format!("{}@x.io", "a".repeat(EMAIL_MAX));
    assert_eq!(
        UserDraft::new("Ada", long_email),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn into_user_binds_identity() {
    let user = UserDraft::new("Ada", "ada@x.io")
        .expect("valid draft")
        .into_user(UserId::new(7));
    assert_eq!(user.id(), UserId::new(7));
    assert_eq!(user.name(), "Ada");
    assert_eq!(user.email(), "ada@x.io");
}

#[rstest]
#[case(UserId::UNASSIGNED, false)]
#[case(UserId::new(1), true)]
#[case(UserId::new(-3), true)]
fn unassigned_sentinel_is_zero(#[case] id: UserId, #[case] assigned: bool) {
    assert_eq!(id.is_assigned(), assigned);
    assert_eq!(UserId::default(), UserId::UNASSIGNED);
}

#[rstest]
fn record_serialises_with_flat_integer_id() {
    let user = User::from_parts(UserId::new(1), "Ada", "ada@x.io");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({"id": 1, "name": "Ada", "email": "ada@x.io"}));

    let parsed: User = serde_json::from_value(value).expect("deserialise user");
    assert_eq!(parsed, user);
}
