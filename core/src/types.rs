//! Domain types for the festival catalog and registrations.
//!
//! All types serialize to the camelCase JSON contract used by the festival
//! frontend (`participantCount`, `registrationType`, `eventIds`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a festival event
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Unique identifier for a registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Creates a new random `RegistrationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `RegistrationId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Events
// ============================================================================

/// Festival track an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Coding, hardware and engineering competitions
    Technical,
    /// Performing arts, literary and fine arts
    Cultural,
    /// Tournaments and athletics
    Sports,
}

impl EventCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Technical, Self::Cultural, Self::Sports];

    /// Label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Cultural => "Cultural",
            Self::Sports => "Sports",
        }
    }

    /// Parse a category label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive fields of an event (everything except identity and counter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Event title
    pub title: String,
    /// Event description
    pub description: String,
    /// Festival track
    pub category: EventCategory,
    /// Organizing department (e.g. "CSE", "Sports")
    #[serde(default)]
    pub department: Option<String>,
    /// Display date, free text (e.g. "December 17, 2025")
    #[serde(default)]
    pub date: Option<String>,
    /// Display time, free text (e.g. "10:00 AM - 1:00 PM")
    #[serde(default)]
    pub time: Option<String>,
    /// Prize text (e.g. "₹50,000")
    pub prize: String,
    /// Icon label used by the frontend
    #[serde(default)]
    pub icon: Option<String>,
}

/// A festival event with its participation counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event ID
    pub id: EventId,
    /// Descriptive fields
    #[serde(flatten)]
    pub details: EventDetails,
    /// Number of registrations naming this event
    pub participant_count: u32,
}

impl Event {
    /// Creates a new event with a zero participation counter.
    #[must_use]
    pub const fn new(id: EventId, details: EventDetails) -> Self {
        Self {
            id,
            details,
            participant_count: 0,
        }
    }

    /// Whether this event passes the given listing filter.
    #[must_use]
    pub fn matches(&self, filter: &EventFilter) -> bool {
        if filter
            .category
            .is_some_and(|category| category != self.details.category)
        {
            return false;
        }

        match (&filter.department, &self.details.department) {
            (None, _) => true,
            (Some(wanted), Some(department)) => wanted.trim().eq_ignore_ascii_case(department.trim()),
            (Some(_), None) => false,
        }
    }
}

/// Optional constraints for listing events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Only events of this category
    pub category: Option<EventCategory>,
    /// Only events of this department (case-insensitive)
    pub department: Option<String>,
}

impl EventFilter {
    /// Filter that accepts every event.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            category: None,
            department: None,
        }
    }
}

/// Validated partial update of an event.
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<EventCategory>,
    /// New or cleared department
    pub department: Option<Option<String>>,
    /// New or cleared display date
    pub date: Option<Option<String>>,
    /// New or cleared display time
    pub time: Option<Option<String>>,
    /// New prize text
    pub prize: Option<String>,
    /// New or cleared icon
    pub icon: Option<Option<String>>,
    /// Administrative override of the counter
    pub participant_count: Option<u32>,
}

impl EventPatch {
    /// Apply the patch to an event in place.
    pub fn apply(self, event: &mut Event) {
        let details = &mut event.details;
        if let Some(title) = self.title {
            details.title = title;
        }
        if let Some(description) = self.description {
            details.description = description;
        }
        if let Some(category) = self.category {
            details.category = category;
        }
        if let Some(department) = self.department {
            details.department = department;
        }
        if let Some(date) = self.date {
            details.date = date;
        }
        if let Some(time) = self.time {
            details.time = time;
        }
        if let Some(prize) = self.prize {
            details.prize = prize;
        }
        if let Some(icon) = self.icon {
            details.icon = icon;
        }
        if let Some(count) = self.participant_count {
            event.participant_count = count;
        }
    }
}

// ============================================================================
// Registrations
// ============================================================================

/// Form answer for the accommodation and transportation questions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    /// Requested
    Yes,
    /// Not requested
    #[default]
    No,
}

/// Discriminator between individual and team registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    /// One participant
    Solo,
    /// A leader plus a member roster
    Group,
}

impl RegistrationKind {
    /// Label used on the wire, in storage and as a metric label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a group roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupMember {
    /// Member name
    pub name: String,
    /// College roll number
    pub roll_number: String,
}

/// Contact details stored on every registration.
///
/// For group registrations these are the leader's details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// College name
    pub college: String,
}

/// A validated, normalized registration that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRegistration {
    /// Solo or group
    pub kind: RegistrationKind,
    /// Contact details (leader's details for groups)
    pub contact: Contact,
    /// Selected events, in submission order
    pub event_ids: Vec<EventId>,
    /// Roster, only for groups
    pub group_members: Option<Vec<GroupMember>>,
    /// Accommodation requested
    pub accommodation: YesNo,
    /// Transportation requested
    pub transportation: YesNo,
}

impl NewRegistration {
    /// Turn into a stored record with the identity assigned by the store.
    #[must_use]
    pub fn into_registration(self, id: RegistrationId, registered_at: DateTime<Utc>) -> Registration {
        Registration {
            id,
            registration_type: self.kind,
            contact: self.contact,
            event_ids: self.event_ids,
            group_members: self.group_members,
            accommodation: self.accommodation,
            transportation: self.transportation,
            registered_at,
        }
    }
}

/// A persisted registration. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Registration ID
    pub id: RegistrationId,
    /// Solo or group
    pub registration_type: RegistrationKind,
    /// Contact details
    #[serde(flatten)]
    pub contact: Contact,
    /// Selected events, in submission order
    pub event_ids: Vec<EventId>,
    /// Roster, only for groups
    pub group_members: Option<Vec<GroupMember>>,
    /// Accommodation requested
    pub accommodation: YesNo,
    /// Transportation requested
    pub transportation: YesNo,
    /// When the store accepted the registration
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Whether this registration names the given event.
    #[must_use]
    pub fn includes_event(&self, event_id: &EventId) -> bool {
        self.event_ids.contains(event_id)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn details() -> EventDetails {
        EventDetails {
            title: "Code Sprint".to_string(),
            description: "Competitive programming marathon".to_string(),
            category: EventCategory::Technical,
            department: Some("CSE".to_string()),
            date: Some("December 17, 2025".to_string()),
            time: Some("9:00 AM - 5:00 PM".to_string()),
            prize: "₹75,000".to_string(),
            icon: Some("Code".to_string()),
        }
    }

    #[test]
    fn category_parse_ignores_case() {
        assert_eq!(EventCategory::parse("technical"), Some(EventCategory::Technical));
        assert_eq!(EventCategory::parse(" SPORTS "), Some(EventCategory::Sports));
        assert_eq!(EventCategory::parse("Gaming"), None);
    }

    #[test]
    fn event_serializes_flat_camel_case() {
        let event = Event::new(EventId::new(), details());
        let json = serde_json::to_value(&event).expect("serializable");

        assert_eq!(json["title"], "Code Sprint");
        assert_eq!(json["category"], "Technical");
        assert_eq!(json["participantCount"], 0);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn filter_matches_category_and_department() {
        let event = Event::new(EventId::new(), details());

        assert!(event.matches(&EventFilter::all()));
        assert!(event.matches(&EventFilter {
            category: Some(EventCategory::Technical),
            department: Some("cse".to_string()),
        }));
        assert!(!event.matches(&EventFilter {
            category: Some(EventCategory::Cultural),
            department: None,
        }));
        assert!(!event.matches(&EventFilter {
            category: None,
            department: Some("ECE".to_string()),
        }));
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let mut event = Event::new(EventId::new(), details());
        let patch = EventPatch {
            title: Some("Code Sprint 2.0".to_string()),
            icon: Some(None),
            participant_count: Some(12),
            ..EventPatch::default()
        };

        patch.apply(&mut event);

        assert_eq!(event.details.title, "Code Sprint 2.0");
        assert_eq!(event.details.icon, None);
        assert_eq!(event.details.department.as_deref(), Some("CSE"));
        assert_eq!(event.participant_count, 12);
    }

    #[test]
    fn registration_wire_format() {
        let registration = NewRegistration {
            kind: RegistrationKind::Group,
            contact: Contact {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9876543210".to_string(),
                college: "JNTU".to_string(),
            },
            event_ids: vec![EventId::new()],
            group_members: Some(vec![GroupMember {
                name: "Ravi".to_string(),
                roll_number: "21CS001".to_string(),
            }]),
            accommodation: YesNo::Yes,
            transportation: YesNo::No,
        }
        .into_registration(RegistrationId::new(), Utc::now());

        let json = serde_json::to_value(&registration).expect("serializable");
        assert_eq!(json["registrationType"], "group");
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["groupMembers"][0]["rollNumber"], "21CS001");
        assert_eq!(json["accommodation"], "Yes");

        let back: Registration = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, registration);
    }
}
