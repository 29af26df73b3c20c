//! Domain models shared by the catalog scanner, the selection store and the
//! HTTP layer. These types stay plain data holders; discovery rules live in
//! `catalog` and persistence lives in `db`.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// How a background is rendered in the page: as a CSS image or a looping
/// `<video>` element.
pub enum MediaKind {
    /// Painted with CSS `background-image`.
    Image,
    /// Played muted and looped by the `<video>` element.
    Video,
}

impl MediaKind {
    /// Lowercase tag used in `data-bg-type` attributes and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// One selectable background discovered in the media directory.
pub struct BackgroundEntry {
    /// Base name with every underscore turned into a space. Two files may
    /// collide here after normalization; that ambiguity is accepted.
    pub display_name: String,
    /// File name without its extension. Unique within a single catalog build.
    pub base_name: String,
    /// File name the browser should request, relative to the backgrounds
    /// directory.
    pub media_path: String,
    /// Sibling preview image, only filled in by discovery modes that pair
    /// videos with thumbnails.
    pub thumbnail_path: Option<String>,
    /// Whether the page paints this entry as an image or plays it as a video.
    pub kind: MediaKind,
}

impl fmt::Display for BackgroundEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A hand-curated ambient sound. The list is static configuration, so the
/// fields borrow from `'static` data instead of owning strings.
pub struct SoundEntry {
    /// Label shown on the sound button.
    pub display_name: &'static str,
    /// File name inside `public/sounds`.
    pub file_path: &'static str,
    /// Ionicon name rendered next to the label.
    pub icon_id: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The only keys the selection store accepts. Keeping them as an enum means a
/// typo in a handler cannot create a stray row in the `settings` table.
pub enum SelectionKey {
    /// The background media file last picked in the gallery.
    Background,
    /// The sound file last started in the mixer.
    Sound,
}

impl SelectionKey {
    /// Value stored in the `key` column.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionKey::Background => "selectedBackground",
            SelectionKey::Sound => "selectedSound",
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
