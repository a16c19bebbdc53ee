// ── Domain model ──
//
// Descriptors say *what* a reading is; readings carry its latest state.

pub mod descriptor;
pub mod reading;

pub use descriptor::{
    ReadingDescriptor, ReadingKind, StaticReading, normalize_person_name, person_descriptors,
    static_descriptors,
};
pub use reading::{Reading, ReadingState};
