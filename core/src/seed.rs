//! Built-in festival catalog loaded at startup.
//!
//! Fifteen technical, fifteen cultural and ten sports events. Counters always
//! start at zero.

use crate::store::{FestivalStore, StoreError};
use crate::types::{EventCategory, EventDetails, EventFilter};

struct SeedEvent {
    title: &'static str,
    description: &'static str,
    category: EventCategory,
    department: &'static str,
    date: &'static str,
    time: &'static str,
    prize: &'static str,
    icon: &'static str,
}

impl SeedEvent {
    fn details(&self) -> EventDetails {
        EventDetails {
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category,
            department: Some(self.department.to_string()),
            date: Some(self.date.to_string()),
            time: Some(self.time.to_string()),
            prize: self.prize.to_string(),
            icon: Some(self.icon.to_string()),
        }
    }
}

const CATALOG: &[SeedEvent] = &[
    SeedEvent {
        title: "Techno Fiesta",
        description: "Technical paper presentation and project exhibition showcasing innovative ideas and cutting-edge technology",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 17, 2025",
        time: "10:00 AM - 1:00 PM",
        prize: "₹50,000",
        icon: "Laptop",
    },
    SeedEvent {
        title: "Brain Blast",
        description: "Ultimate technical quiz competition testing knowledge across computer science, electronics, and emerging technologies",
        category: EventCategory::Technical,
        department: "ECE",
        date: "December 17, 2025",
        time: "2:00 PM - 4:00 PM",
        prize: "₹30,000",
        icon: "Brain",
    },
    SeedEvent {
        title: "Code Sprint",
        description: "Intense competitive programming marathon featuring algorithmic challenges and real-world problem solving",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 17, 2025",
        time: "9:00 AM - 5:00 PM",
        prize: "₹75,000",
        icon: "Code",
    },
    SeedEvent {
        title: "Innoverse",
        description: "Innovation challenge for building working prototypes and presenting groundbreaking project ideas",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 18, 2025",
        time: "10:00 AM - 3:00 PM",
        prize: "₹100,000",
        icon: "Lightbulb",
    },
    SeedEvent {
        title: "Tech Quest",
        description: "Technical treasure hunt combining coding challenges, hardware debugging, and puzzle solving across campus",
        category: EventCategory::Technical,
        department: "IT & MCA",
        date: "December 17, 2025",
        time: "11:00 AM - 2:00 PM",
        prize: "₹25,000",
        icon: "Search",
    },
    SeedEvent {
        title: "ElectroVolts",
        description: "Electronics circuit design competition with focus on power systems and embedded applications",
        category: EventCategory::Technical,
        department: "EEE",
        date: "December 17, 2025",
        time: "1:00 PM - 4:00 PM",
        prize: "₹40,000",
        icon: "Zap",
    },
    SeedEvent {
        title: "Robo Wars",
        description: "Battle of autonomous robots in an arena - design, build, and fight!",
        category: EventCategory::Technical,
        department: "MECH",
        date: "December 18, 2025",
        time: "11:00 AM - 5:00 PM",
        prize: "₹60,000",
        icon: "Bot",
    },
    SeedEvent {
        title: "Web Wizardry",
        description: "24-hour web development hackathon to create innovative web applications",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 17-18, 2025",
        time: "6:00 PM - 6:00 PM",
        prize: "₹50,000",
        icon: "Globe",
    },
    SeedEvent {
        title: "AI Challenge",
        description: "Machine learning and AI model development competition with real-world datasets",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 18, 2025",
        time: "9:00 AM - 4:00 PM",
        prize: "₹80,000",
        icon: "Cpu",
    },
    SeedEvent {
        title: "Poota Preso",
        description: "Technical poster presentation showcasing research and innovative project concepts",
        category: EventCategory::Technical,
        department: "EEE",
        date: "December 17, 2025",
        time: "10:00 AM - 2:00 PM",
        prize: "₹20,000",
        icon: "FileText",
    },
    SeedEvent {
        title: "Circuit IQ",
        description: "Circuit debugging and analysis competition testing electronics fundamentals",
        category: EventCategory::Technical,
        department: "ECE",
        date: "December 17, 2025",
        time: "3:00 PM - 5:00 PM",
        prize: "₹25,000",
        icon: "CircuitBoard",
    },
    SeedEvent {
        title: "CAD Master",
        description: "Computer-aided design competition for mechanical and civil engineering students",
        category: EventCategory::Technical,
        department: "MECH & CIVIL",
        date: "December 18, 2025",
        time: "10:00 AM - 1:00 PM",
        prize: "₹30,000",
        icon: "Ruler",
    },
    SeedEvent {
        title: "Cyber Security CTF",
        description: "Capture the flag cybersecurity competition with hacking challenges",
        category: EventCategory::Technical,
        department: "CSE",
        date: "December 18, 2025",
        time: "2:00 PM - 6:00 PM",
        prize: "₹45,000",
        icon: "Shield",
    },
    SeedEvent {
        title: "IoT Innovation",
        description: "Internet of Things project showcase and competition for smart solutions",
        category: EventCategory::Technical,
        department: "ECE",
        date: "December 18, 2025",
        time: "11:00 AM - 3:00 PM",
        prize: "₹35,000",
        icon: "Wifi",
    },
    SeedEvent {
        title: "Data Science Derby",
        description: "Data analysis and visualization competition with complex datasets",
        category: EventCategory::Technical,
        department: "CSE & IT",
        date: "December 17, 2025",
        time: "1:00 PM - 5:00 PM",
        prize: "₹40,000",
        icon: "BarChart",
    },
    SeedEvent {
        title: "Dance Fusion",
        description: "Electrifying solo and group dance performances across classical, contemporary, and fusion genres",
        category: EventCategory::Cultural,
        department: "ChE",
        date: "December 17, 2025",
        time: "5:00 PM - 8:00 PM",
        prize: "₹40,000",
        icon: "Music",
    },
    SeedEvent {
        title: "Melodic Voices",
        description: "Vocal competition featuring solo and group singing in Indian classical, western, and film music",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "4:00 PM - 7:00 PM",
        prize: "₹35,000",
        icon: "Mic",
    },
    SeedEvent {
        title: "Fashion Fiesta",
        description: "Runway fashion show with creative themes, designer wear, and sustainable fashion showcase",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "6:00 PM - 9:00 PM",
        prize: "₹50,000",
        icon: "Sparkles",
    },
    SeedEvent {
        title: "Street Play",
        description: "Powerful street drama performances on social awareness and contemporary themes",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "3:00 PM - 6:00 PM",
        prize: "₹30,000",
        icon: "Theater",
    },
    SeedEvent {
        title: "Art Odyssey",
        description: "Fine arts exhibition featuring painting, sketching, digital art, and sculpture",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17-18, 2025",
        time: "All Day",
        prize: "₹25,000",
        icon: "Palette",
    },
    SeedEvent {
        title: "Battle of Bands",
        description: "Live band performance battle with original compositions and cover songs",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "7:00 PM - 10:00 PM",
        prize: "₹60,000",
        icon: "Guitar",
    },
    SeedEvent {
        title: "Stand-Up Comedy",
        description: "Open mic comedy night for aspiring comedians to showcase their talent",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "8:00 PM - 10:00 PM",
        prize: "₹20,000",
        icon: "Laugh",
    },
    SeedEvent {
        title: "Short Film Festival",
        description: "Screening and competition for student-made short films and documentaries",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "2:00 PM - 5:00 PM",
        prize: "₹45,000",
        icon: "Film",
    },
    SeedEvent {
        title: "Photography Contest",
        description: "Themed photography competition capturing moments, nature, and creative concepts",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17-18, 2025",
        time: "All Day",
        prize: "₹15,000",
        icon: "Camera",
    },
    SeedEvent {
        title: "Poetry Slam",
        description: "Spoken word poetry competition in English, Hindi, and Telugu",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "2:00 PM - 4:00 PM",
        prize: "₹10,000",
        icon: "BookOpen",
    },
    SeedEvent {
        title: "Classical Dance",
        description: "Traditional Indian classical dance forms - Bharatanatyam, Kuchipudi, Kathak showcase",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "4:00 PM - 6:00 PM",
        prize: "₹30,000",
        icon: "Wind",
    },
    SeedEvent {
        title: "DJ Night",
        description: "Electronic music production and live DJ performance battle",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "9:00 PM - 12:00 AM",
        prize: "₹35,000",
        icon: "Disc3",
    },
    SeedEvent {
        title: "Debate Competition",
        description: "Parliamentary debate on contemporary issues and global topics",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "10:00 AM - 1:00 PM",
        prize: "₹15,000",
        icon: "MessageSquare",
    },
    SeedEvent {
        title: "Rangoli & Mehendi",
        description: "Traditional art forms competition - rangoli designs and mehendi patterns",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 17, 2025",
        time: "9:00 AM - 12:00 PM",
        prize: "₹10,000",
        icon: "Flower",
    },
    SeedEvent {
        title: "Mime Act",
        description: "Silent storytelling through expressive mime and body language performances",
        category: EventCategory::Cultural,
        department: "Literary & Cultural",
        date: "December 18, 2025",
        time: "3:00 PM - 5:00 PM",
        prize: "₹12,000",
        icon: "Drama",
    },
    SeedEvent {
        title: "Cricket Tournament",
        description: "Box cricket championship with fast-paced exciting matches and playoffs",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "8:00 AM - 6:00 PM",
        prize: "₹40,000",
        icon: "Target",
    },
    SeedEvent {
        title: "Football League",
        description: "5-a-side football tournament with league format and knockout rounds",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "7:00 AM - 5:00 PM",
        prize: "₹35,000",
        icon: "CircleDot",
    },
    SeedEvent {
        title: "Volleyball Championship",
        description: "Inter-college volleyball tournament with competitive team matches",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "9:00 AM - 4:00 PM",
        prize: "₹30,000",
        icon: "Circle",
    },
    SeedEvent {
        title: "Basketball Slam",
        description: "3-on-3 basketball tournament with exciting street-style gameplay",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "8:00 AM - 5:00 PM",
        prize: "₹35,000",
        icon: "Trophy",
    },
    SeedEvent {
        title: "Badminton Open",
        description: "Singles and doubles badminton championship for all skill levels",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "7:00 AM - 2:00 PM",
        prize: "₹25,000",
        icon: "Wind",
    },
    SeedEvent {
        title: "Table Tennis Pro",
        description: "Fast-paced table tennis singles and doubles tournament",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "9:00 AM - 4:00 PM",
        prize: "₹20,000",
        icon: "Disc",
    },
    SeedEvent {
        title: "Chess Championship",
        description: "Strategic chess tournament with classical time control",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "10:00 AM - 6:00 PM",
        prize: "₹15,000",
        icon: "Crown",
    },
    SeedEvent {
        title: "Athletics Meet",
        description: "Track and field events - 100m, 200m, relay races, long jump, shot put",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17, 2025",
        time: "6:00 AM - 12:00 PM",
        prize: "₹30,000",
        icon: "Flame",
    },
    SeedEvent {
        title: "Carrom Tournament",
        description: "Singles and doubles carrom board championship",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 17-18, 2025",
        time: "10:00 AM - 5:00 PM",
        prize: "₹10,000",
        icon: "Square",
    },
    SeedEvent {
        title: "Tug of War",
        description: "Traditional strength competition with team battles",
        category: EventCategory::Sports,
        department: "Sports",
        date: "December 18, 2025",
        time: "11:00 AM - 2:00 PM",
        prize: "₹15,000",
        icon: "Anchor",
    },
];

/// The built-in catalog, in display order.
#[must_use]
pub fn festival_catalog() -> Vec<EventDetails> {
    CATALOG.iter().map(SeedEvent::details).collect()
}

/// Load the built-in catalog into `store` unless it already holds events.
///
/// Returns the number of events created.
///
/// # Errors
///
/// Returns [`StoreError`] if the store fails while listing or creating events.
pub async fn seed_catalog(store: &dyn FestivalStore) -> Result<usize, StoreError> {
    if !store.list_events(EventFilter::all()).await?.is_empty() {
        tracing::info!("Event catalog already populated, skipping seed");
        return Ok(0);
    }

    for details in festival_catalog() {
        store.create_event(details).await?;
    }

    tracing::info!(events = CATALOG.len(), "Seeded event catalog");
    Ok(CATALOG.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::InMemoryFestivalStore;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_forty_events_across_three_tracks() {
        let catalog = festival_catalog();
        assert_eq!(catalog.len(), 40);

        let count = |category| catalog.iter().filter(|e| e.category == category).count();
        assert_eq!(count(EventCategory::Technical), 15);
        assert_eq!(count(EventCategory::Cultural), 15);
        assert_eq!(count(EventCategory::Sports), 10);
    }

    #[test]
    fn catalog_titles_are_unique() {
        let titles: HashSet<_> = CATALOG.iter().map(|e| e.title).collect();
        assert_eq!(titles.len(), CATALOG.len());
    }

    #[tokio::test]
    async fn seeding_is_skipped_when_events_exist() {
        let store = InMemoryFestivalStore::new();

        assert_eq!(seed_catalog(&store).await.unwrap(), 40);
        assert_eq!(seed_catalog(&store).await.unwrap(), 0);

        let events = store.list_events(EventFilter::all()).await.unwrap();
        assert_eq!(events.len(), 40);
        assert_eq!(events[0].details.title, "Techno Fiesta");
    }
}
