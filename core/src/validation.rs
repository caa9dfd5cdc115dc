//! Input payloads and their validation.
//!
//! Payloads are deserialized leniently (missing strings become empty) so that
//! every problem can be reported at once as a [`FieldError`] instead of failing
//! on the first missing key.

use crate::types::{
    Contact, EventCategory, EventDetails, EventId, EventPatch, GroupMember, NewRegistration,
    RegistrationKind, YesNo,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Minimum number of characters for names and college names.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Maximum number of digits in a phone number (E.164).
pub const MAX_PHONE_DIGITS: usize = 15;

/// Largest participant count accepted from the admin API.
///
/// Counters are stored as `INTEGER` in `PostgreSQL`.
pub const MAX_PARTICIPANT_COUNT: u32 = i32::MAX.unsigned_abs();

// ============================================================================
// Errors
// ============================================================================

/// A problem with one input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field path, e.g. `email` or `eventIds[1]`
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field error found in one payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed with {} field error(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record an error for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns `true` if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The recorded errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `true` if an error was recorded for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// `Ok(value)` if no errors were recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

// ============================================================================
// Field rules
// ============================================================================

/// Validate an email address shape.
///
/// Requires exactly one `@`, a non-empty local part, and a dotted domain
/// without empty labels.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    let valid_local_chars =
        |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_');
    let valid_domain_chars = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-');

    if !local.chars().all(valid_local_chars) || !domain.chars().all(valid_domain_chars) {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}

/// Validate a phone number.
///
/// Digits, spaces, `+`, `-` and parentheses are allowed. The number must
/// contain between 10 and 15 digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    if !phone.chars().all(allowed) {
        return false;
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// JSON field names for the contact block of each registration type.
struct ContactFields {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    college: &'static str,
}

const SOLO_FIELDS: ContactFields = ContactFields {
    name: "name",
    email: "email",
    phone: "phone",
    college: "college",
};

const GROUP_FIELDS: ContactFields = ContactFields {
    name: "groupLeaderName",
    email: "groupLeaderEmail",
    phone: "groupLeaderPhone",
    college: "groupLeaderCollege",
};

fn check_contact(errors: &mut ValidationErrors, fields: &ContactFields, contact: &Contact) {
    if !has_min_chars(&contact.name, MIN_NAME_LEN) {
        errors.push(fields.name, "Name must be at least 2 characters");
    }
    if !is_valid_email(contact.email.trim()) {
        errors.push(fields.email, "Invalid email address");
    }
    if !is_valid_phone(contact.phone.trim()) {
        errors.push(fields.phone, "Phone number must have at least 10 digits");
    }
    if !has_min_chars(&contact.college, MIN_NAME_LEN) {
        errors.push(fields.college, "College name must be at least 2 characters");
    }
}

/// Parse the submitted event ids, keeping their order.
fn check_event_ids(errors: &mut ValidationErrors, raw: &[String]) -> Vec<EventId> {
    if raw.is_empty() {
        errors.push("eventIds", "Please select at least one event");
        return Vec::new();
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut ids = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        match value.parse::<EventId>() {
            Ok(id) if !seen.insert(id) => {
                errors.push(format!("eventIds[{index}]"), "Event selected more than once");
            }
            Ok(id) => ids.push(id),
            Err(_) => {
                errors.push(format!("eventIds[{index}]"), "Not a valid event id");
            }
        }
    }
    ids
}

fn check_members(errors: &mut ValidationErrors, members: &[GroupMember]) {
    if members.is_empty() {
        errors.push("groupMembers", "Add at least one group member");
        return;
    }

    for (index, member) in members.iter().enumerate() {
        if member.name.trim().is_empty() {
            errors.push(format!("groupMembers[{index}].name"), "Member name is required");
        }
        if member.roll_number.trim().is_empty() {
            errors.push(
                format!("groupMembers[{index}].rollNumber"),
                "Roll number is required",
            );
        }
    }
}

// ============================================================================
// Registration payloads
// ============================================================================

/// Registration form as submitted, tagged by `registrationType`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "registrationType", rename_all = "lowercase")]
pub enum RegistrationPayload {
    /// Individual registration
    Solo(SoloPayload),
    /// Team registration
    Group(GroupPayload),
}

/// Fields of a solo registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoloPayload {
    /// Participant name
    pub name: String,
    /// Participant email
    pub email: String,
    /// Participant phone
    pub phone: String,
    /// Participant college
    pub college: String,
    /// Selected event ids
    pub event_ids: Vec<String>,
    /// Accommodation requested
    pub accommodation: YesNo,
    /// Transportation requested
    pub transportation: YesNo,
}

/// Fields of a group registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupPayload {
    /// Leader name
    pub group_leader_name: String,
    /// Leader email
    pub group_leader_email: String,
    /// Leader phone
    pub group_leader_phone: String,
    /// Leader college
    pub group_leader_college: String,
    /// Team roster, in order
    pub group_members: Vec<GroupMember>,
    /// Selected event ids
    pub event_ids: Vec<String>,
    /// Accommodation requested
    pub accommodation: YesNo,
    /// Transportation requested
    pub transportation: YesNo,
}

impl RegistrationPayload {
    /// Which registration type was submitted.
    #[must_use]
    pub const fn kind(&self) -> RegistrationKind {
        match self {
            Self::Solo(_) => RegistrationKind::Solo,
            Self::Group(_) => RegistrationKind::Group,
        }
    }

    /// Validate every field and normalize into a [`NewRegistration`].
    ///
    /// Group leader fields become the contact fields. Values are kept exactly
    /// as submitted.
    ///
    /// # Errors
    ///
    /// Returns every [`FieldError`] found.
    pub fn validate(self) -> Result<NewRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let registration = match self {
            Self::Solo(solo) => {
                let contact = Contact {
                    name: solo.name,
                    email: solo.email,
                    phone: solo.phone,
                    college: solo.college,
                };
                check_contact(&mut errors, &SOLO_FIELDS, &contact);
                let event_ids = check_event_ids(&mut errors, &solo.event_ids);

                NewRegistration {
                    kind: RegistrationKind::Solo,
                    contact,
                    event_ids,
                    group_members: None,
                    accommodation: solo.accommodation,
                    transportation: solo.transportation,
                }
            }
            Self::Group(group) => {
                let contact = Contact {
                    name: group.group_leader_name,
                    email: group.group_leader_email,
                    phone: group.group_leader_phone,
                    college: group.group_leader_college,
                };
                check_contact(&mut errors, &GROUP_FIELDS, &contact);
                check_members(&mut errors, &group.group_members);
                let event_ids = check_event_ids(&mut errors, &group.event_ids);

                NewRegistration {
                    kind: RegistrationKind::Group,
                    contact,
                    event_ids,
                    group_members: Some(group.group_members),
                    accommodation: group.accommodation,
                    transportation: group.transportation,
                }
            }
        };

        errors.into_result(registration)
    }
}

// ============================================================================
// Event payloads
// ============================================================================

/// Event creation form as submitted by an admin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category label
    pub category: String,
    /// Department
    pub department: Option<String>,
    /// Display date
    pub date: Option<String>,
    /// Display time
    pub time: Option<String>,
    /// Prize text
    pub prize: String,
    /// Icon label
    pub icon: Option<String>,
}

impl EventDraft {
    /// Validate into [`EventDetails`].
    ///
    /// # Errors
    ///
    /// Returns every [`FieldError`] found.
    pub fn validate(self) -> Result<EventDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required(&mut errors, "title", &self.title);
        check_required(&mut errors, "description", &self.description);
        check_required(&mut errors, "prize", &self.prize);
        let category = check_category(&mut errors, &self.category);

        match category {
            Some(category) if errors.is_empty() => Ok(EventDetails {
                title: self.title,
                description: self.description,
                category,
                department: self.department,
                date: self.date,
                time: self.time,
                prize: self.prize,
                icon: self.icon,
            }),
            _ => Err(errors),
        }
    }
}

/// Partial event update as submitted by an admin.
///
/// Absent fields are left untouched. For `department`, `date`, `time` and
/// `icon`, an explicit `null` clears the value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventPatchDraft {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category label
    pub category: Option<String>,
    /// New or cleared department
    #[serde(deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
    /// New or cleared display date
    #[serde(deserialize_with = "nullable")]
    pub date: Option<Option<String>>,
    /// New or cleared display time
    #[serde(deserialize_with = "nullable")]
    pub time: Option<Option<String>>,
    /// New prize text
    pub prize: Option<String>,
    /// New or cleared icon
    #[serde(deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    /// Counter override
    pub participant_count: Option<u32>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl EventPatchDraft {
    /// Validate into an [`EventPatch`].
    ///
    /// # Errors
    ///
    /// Returns every [`FieldError`] found.
    pub fn validate(self) -> Result<EventPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = &self.title {
            check_required(&mut errors, "title", title);
        }
        if let Some(description) = &self.description {
            check_required(&mut errors, "description", description);
        }
        if let Some(prize) = &self.prize {
            check_required(&mut errors, "prize", prize);
        }
        let category = self
            .category
            .as_deref()
            .and_then(|label| check_category(&mut errors, label));
        if self.participant_count.is_some_and(|count| count > MAX_PARTICIPANT_COUNT) {
            errors.push(
                "participantCount",
                format!("participantCount must be at most {MAX_PARTICIPANT_COUNT}"),
            );
        }

        errors.into_result(EventPatch {
            title: self.title,
            description: self.description,
            category,
            department: self.department,
            date: self.date,
            time: self.time,
            prize: self.prize,
            icon: self.icon,
            participant_count: self.participant_count,
        })
    }
}

fn check_required(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{field} is required"));
    }
}

fn check_category(errors: &mut ValidationErrors, label: &str) -> Option<EventCategory> {
    let category = EventCategory::parse(label);
    if category.is_none() {
        errors.push("category", "Category must be Technical, Cultural or Sports");
    }
    category
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn solo_json(event_ids: &[String]) -> serde_json::Value {
        json!({
            "registrationType": "solo",
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+91 98765-43210",
            "college": "JNTU",
            "eventIds": event_ids,
        })
    }

    fn parse(value: serde_json::Value) -> RegistrationPayload {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+fest@mail.college.edu"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn phone_rules() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 (987) 654-3210"));
        assert!(!is_valid_phone("98765"));
        assert!(!is_valid_phone("98765abcde12"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn solo_payload_keeps_submitted_values() {
        let id = EventId::new().to_string();
        let registration = parse(solo_json(&[id.clone()])).validate().unwrap();

        assert_eq!(registration.kind, RegistrationKind::Solo);
        assert_eq!(registration.contact.name, "Asha Rao");
        assert_eq!(registration.contact.phone, "+91 98765-43210");
        assert_eq!(registration.event_ids[0].to_string(), id);
        assert_eq!(registration.group_members, None);
        assert_eq!(registration.accommodation, YesNo::No);
    }

    #[test]
    fn group_leader_becomes_contact() {
        let payload = parse(json!({
            "registrationType": "group",
            "groupLeaderName": "Ravi",
            "groupLeaderEmail": "ravi@example.com",
            "groupLeaderPhone": "9876543210",
            "groupLeaderCollege": "VNR",
            "groupMembers": [
                {"name": "Kiran", "rollNumber": "21CS010"},
                {"name": "Meena", "rollNumber": "21CS011"}
            ],
            "eventIds": [EventId::new().to_string()],
            "accommodation": "Yes",
        }));

        let registration = payload.validate().unwrap();
        assert_eq!(registration.kind, RegistrationKind::Group);
        assert_eq!(registration.contact.name, "Ravi");
        assert_eq!(registration.contact.college, "VNR");
        let members = registration.group_members.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].roll_number, "21CS011");
        assert_eq!(registration.accommodation, YesNo::Yes);
    }

    #[test]
    fn collects_every_error() {
        let payload = parse(json!({
            "registrationType": "solo",
            "name": "A",
            "email": "nope",
            "phone": "123",
            "college": "",
            "eventIds": [],
        }));

        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        for field in ["name", "email", "phone", "college", "eventIds"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn group_errors_use_leader_field_names() {
        let payload = parse(json!({
            "registrationType": "group",
            "groupLeaderName": "",
            "groupMembers": [{"name": "Kiran", "rollNumber": ""}],
            "eventIds": [EventId::new().to_string()],
        }));

        let errors = payload.validate().unwrap_err();
        assert!(errors.has_field("groupLeaderName"));
        assert!(errors.has_field("groupLeaderEmail"));
        assert!(errors.has_field("groupMembers[0].rollNumber"));
        assert!(!errors.has_field("groupMembers[0].name"));
        assert!(!errors.has_field("name"));
    }

    #[test]
    fn group_without_members_is_rejected() {
        let payload = parse(json!({
            "registrationType": "group",
            "groupLeaderName": "Ravi",
            "groupLeaderEmail": "ravi@example.com",
            "groupLeaderPhone": "9876543210",
            "groupLeaderCollege": "VNR",
            "eventIds": [EventId::new().to_string()],
        }));

        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("groupMembers"));
    }

    #[test]
    fn malformed_and_duplicate_event_ids() {
        let id = EventId::new().to_string();
        let payload = parse(solo_json(&[id.clone(), "not-a-uuid".to_string(), id]));

        let errors = payload.validate().unwrap_err();
        assert!(errors.has_field("eventIds[1]"));
        assert!(errors.has_field("eventIds[2]"));
        assert!(!errors.has_field("eventIds[0]"));
    }

    #[test]
    fn unknown_registration_type_fails_to_deserialize() {
        let result = serde_json::from_value::<RegistrationPayload>(json!({
            "registrationType": "team",
            "name": "Asha",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn event_draft_requires_fields_and_known_category() {
        let errors = EventDraft {
            category: "Gaming".to_string(),
            ..EventDraft::default()
        }
        .validate()
        .unwrap_err();

        for field in ["title", "description", "prize", "category"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn event_draft_accepts_lowercase_category() {
        let details = EventDraft {
            title: "Robo Wars".to_string(),
            description: "Battle of bots".to_string(),
            category: "technical".to_string(),
            prize: "₹60,000".to_string(),
            ..EventDraft::default()
        }
        .validate()
        .unwrap();

        assert_eq!(details.category, EventCategory::Technical);
        assert_eq!(details.department, None);
    }

    #[test]
    fn patch_draft_distinguishes_null_from_absent() {
        let draft: EventPatchDraft =
            serde_json::from_value(json!({"icon": null, "prize": "₹10,000"})).unwrap();
        let patch = draft.validate().unwrap();

        assert_eq!(patch.icon, Some(None));
        assert_eq!(patch.department, None);
        assert_eq!(patch.prize.as_deref(), Some("₹10,000"));
    }

    #[test]
    fn patch_draft_rejects_blank_title() {
        let draft: EventPatchDraft = serde_json::from_value(json!({"title": "  "})).unwrap();
        let errors = draft.validate().unwrap_err();
        assert!(errors.has_field("title"));
    }

    #[test]
    fn patch_draft_bounds_participant_count() {
        let draft: EventPatchDraft =
            serde_json::from_value(json!({"participantCount": 3_000_000_000u64})).unwrap();
        let errors = draft.validate().unwrap_err();
        assert!(errors.has_field("participantCount"));

        let draft: EventPatchDraft =
            serde_json::from_value(json!({"participantCount": i32::MAX})).unwrap();
        let patch = draft.validate().unwrap();
        assert_eq!(patch.participant_count, Some(MAX_PARTICIPANT_COUNT));
    }

    #[test]
    fn contact_values_are_stored_as_submitted() {
        let mut body = solo_json(&[EventId::new().to_string()]);
        body["email"] = json!(" asha@example.com ");
        body["phone"] = json!(" 9876543210 ");

        let registration = parse(body).validate().unwrap();
        assert_eq!(registration.contact.email, " asha@example.com ");
        assert_eq!(registration.contact.phone, " 9876543210 ");
    }

    proptest! {
        #[test]
        fn solo_contact_round_trips(
            name in "[A-Za-z]{2,20}( [A-Za-z]{1,20})?",
            local in "[a-z0-9]{1,12}",
            digits in "[0-9]{10,15}",
            college in "[A-Za-z ]{2,30}",
        ) {
            prop_assume!(college.trim().chars().count() >= 2);
            let email = format!("{local}@fest.example.org");
            let payload = RegistrationPayload::Solo(SoloPayload {
                name: name.clone(),
                email: email.clone(),
                phone: digits.clone(),
                college: college.clone(),
                event_ids: vec![EventId::new().to_string()],
                ..SoloPayload::default()
            });

            let registration = payload.validate().unwrap();
            prop_assert_eq!(registration.contact.name, name);
            prop_assert_eq!(registration.contact.email, email);
            prop_assert_eq!(registration.contact.phone, digits);
            prop_assert_eq!(registration.contact.college, college);
        }

        #[test]
        fn short_phones_always_rejected(digits in "[0-9]{0,9}") {
            prop_assert!(!is_valid_phone(&digits));
        }

        #[test]
        fn group_members_keep_order(rolls in proptest::collection::vec("[0-9]{2}[A-Z]{2}[0-9]{3}", 1..8)) {
            let members: Vec<GroupMember> = rolls
                .iter()
                .enumerate()
                .map(|(index, roll)| GroupMember {
                    name: format!("Member {index}"),
                    roll_number: roll.clone(),
                })
                .collect();
            let payload = RegistrationPayload::Group(GroupPayload {
                group_leader_name: "Leader".to_string(),
                group_leader_email: "leader@example.com".to_string(),
                group_leader_phone: "9876543210".to_string(),
                group_leader_college: "JNTU".to_string(),
                group_members: members.clone(),
                event_ids: vec![EventId::new().to_string()],
                ..GroupPayload::default()
            });

            let registration = payload.validate().unwrap();
            prop_assert_eq!(registration.group_members, Some(members));
        }
    }
}
