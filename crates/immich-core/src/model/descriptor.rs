use std::collections::HashSet;

use immich_api::PeopleSnapshot;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// The fixed set of library-wide readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StaticReading {
    TotalImages,
    TotalVideos,
    TotalAssets,
    FavoriteAssets,
    TotalPeople,
    HiddenPeople,
}

impl StaticReading {
    pub fn key(self) -> &'static str {
        self.into()
    }

    fn display_name(self) -> &'static str {
        match self {
            Self::TotalImages => "Immich: Total Images",
            Self::TotalVideos => "Immich: Total Videos",
            Self::TotalAssets => "Immich: Total Assets",
            Self::FavoriteAssets => "Immich: Favorite Assets",
            Self::TotalPeople => "Immich: Total People",
            Self::HiddenPeople => "Immich: Hidden People",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Self::TotalImages => "images",
            Self::TotalVideos => "videos",
            Self::TotalAssets | Self::FavoriteAssets => "assets",
            Self::TotalPeople | Self::HiddenPeople => "people",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::TotalImages => "mdi:image",
            Self::TotalVideos => "mdi:video",
            Self::TotalAssets => "mdi:folder",
            Self::FavoriteAssets => "mdi:heart",
            Self::TotalPeople => "mdi:account-group",
            Self::HiddenPeople => "mdi:account-off",
        }
    }

    pub fn descriptor(self) -> ReadingDescriptor {
        ReadingDescriptor {
            key: self.key().to_owned(),
            name: self.display_name().to_owned(),
            unit: self.unit(),
            icon: self.icon(),
            kind: ReadingKind::Static(self),
        }
    }
}

/// Where a reading's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingKind {
    Static(StaticReading),
    /// Discovered from the people list. `person_name` is the name exactly
    /// as the server reported it at discovery time.
    PerPerson { person_name: String },
}

/// Immutable definition of one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingDescriptor {
    /// Unique within a registry.
    pub key: String,
    pub name: String,
    pub unit: &'static str,
    pub icon: &'static str,
    pub kind: ReadingKind,
}

impl ReadingDescriptor {
    /// Stable identifier for the host runtime.
    pub fn unique_id(&self) -> String {
        format!("immich_{}", self.key)
    }

    fn person(key: String, person_name: &str) -> Self {
        Self {
            key,
            name: format!("Immich: Person {person_name} Assets"),
            unit: "assets",
            icon: "mdi:account",
            kind: ReadingKind::PerPerson {
                person_name: person_name.to_owned(),
            },
        }
    }
}

/// All static descriptors in display order.
pub fn static_descriptors() -> Vec<ReadingDescriptor> {
    StaticReading::iter().map(StaticReading::descriptor).collect()
}

/// Lower-case and replace spaces with underscores.
pub fn normalize_person_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// One descriptor per distinct, non-empty person name, in server order.
///
/// Identical names collapse into one descriptor. A different name that
/// normalizes to an already-used key gets a numeric suffix:
/// `person_jane_doe_assets`, `person_jane_doe_2_assets`, ...
pub fn person_descriptors(snapshot: &PeopleSnapshot) -> Vec<ReadingDescriptor> {
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut taken_keys: HashSet<String> = HashSet::new();
    let mut descriptors = Vec::new();

    for person in &snapshot.people {
        let name = person.name.as_str();
        if name.is_empty() || !seen_names.insert(name) {
            continue;
        }

        let base = format!("person_{}", normalize_person_name(name));
        let mut key = format!("{base}_assets");
        let mut n = 2;
        while taken_keys.contains(&key) {
            key = format!("{base}_{n}_assets");
            n += 1;
        }

        taken_keys.insert(key.clone());
        descriptors.push(ReadingDescriptor::person(key, name));
    }

    descriptors
}
