use crate::models::SoundEntry;

/// Ambient tracks offered in the sound picker, in presentation order. Adding
/// a sound means dropping the file into `public/sounds` and listing it here.
const SOUNDS: [SoundEntry; 6] = [
    SoundEntry {
        display_name: "Fire",
        file_path: "fire.mp3",
        icon_id: "flame",
    },
    SoundEntry {
        display_name: "Rain",
        file_path: "rain.mp3",
        icon_id: "water",
    },
    SoundEntry {
        display_name: "Wind",
        file_path: "wind.mp3",
        icon_id: "cloud",
    },
    SoundEntry {
        display_name: "Forest",
        file_path: "forest.mp3",
        icon_id: "leaf",
    },
    SoundEntry {
        display_name: "Ocean",
        file_path: "ocean.mp3",
        icon_id: "water-outline",
    },
    SoundEntry {
        display_name: "Thunder",
        file_path: "thunder.mp3",
        icon_id: "flash",
    },
];

/// The fixed sound list. No I/O and no failure path.
pub fn list_sounds() -> &'static [SoundEntry] {
    &SOUNDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sounds_are_stable_across_calls() {
        assert_eq!(list_sounds(), list_sounds());
        let names: Vec<&str> = list_sounds().iter().map(|s| s.display_name).collect();
        assert_eq!(names, ["Fire", "Rain", "Wind", "Forest", "Ocean", "Thunder"]);
    }

    #[test]
    fn sound_files_are_unique() {
        let mut paths: Vec<&str> = list_sounds().iter().map(|s| s.file_path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), list_sounds().len());
    }
}
