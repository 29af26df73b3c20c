//! Server-side rendering of the single HTML page. The markup only has to carry
//! the ids, classes and `data-*` attributes that `public/app.js` looks up;
//! styling lives in `public/style.css`.

use std::fmt::Write;

use crate::models::{BackgroundEntry, MediaKind, SoundEntry};

/// URL prefix for background files, mirrored in `app.js`.
const BACKGROUNDS_URL: &str = "/public/bkgs";

/// Render the full page for the given catalog.
pub fn render_index(backgrounds: &[BackgroundEntry], sounds: &[SoundEntry]) -> String {
    let mut background_items = String::new();
    for entry in backgrounds {
        push_background_item(&mut background_items, entry);
    }
    if backgrounds.is_empty() {
        background_items.push_str(r#"<p class="empty-catalog">No backgrounds available.</p>"#);
    }

    let mut sound_items = String::new();
    for sound in sounds {
        push_sound_item(&mut sound_items, sound);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Ambient Room</title>
    <link rel="stylesheet" href="/public/style.css">
    <script type="module" src="https://unpkg.com/ionicons@7.1.0/dist/ionicons/ionicons.esm.js"></script>
</head>
<body>
    <div id="background" class="background"></div>
    <video id="backgroundVideo" class="background-video" autoplay loop muted playsinline style="display: none"></video>

    <nav class="controls">
        <button id="bgButton" class="control-button" title="Backgrounds"><ion-icon name="image-outline"></ion-icon></button>
        <button id="soundButton" class="control-button" title="Sounds"><ion-icon name="musical-notes-outline"></ion-icon></button>
    </nav>

    <div id="bgModal" class="modal">
        <div class="modal-content">
            <button id="closeModal" class="close-button"><ion-icon name="close"></ion-icon></button>
            <h2>Backgrounds</h2>
            <div class="bg-grid">
{background_items}            </div>
        </div>
    </div>

    <div id="soundModal" class="modal">
        <div class="modal-content">
            <button id="closeSoundModal" class="close-button"><ion-icon name="close"></ion-icon></button>
            <h2>Sounds</h2>
            <label class="volume">
                Volume
                <input id="globalVolumeSlider" type="range" min="0" max="100" value="50">
                <span id="globalVolumeValue">50%</span>
            </label>
            <div class="sound-grid">
{sound_items}            </div>
            <div id="activeSoundsContainer" class="active-sounds">
                <div id="activeSoundsList"></div>
            </div>
        </div>
    </div>

    <script src="/public/app.js"></script>
</body>
</html>
"#
    )
}

fn push_background_item(out: &mut String, entry: &BackgroundEntry) {
    let media = escape_html(&entry.media_path);
    let name = escape_html(&entry.display_name);

    let preview = match (&entry.thumbnail_path, entry.kind) {
        (Some(thumbnail), _) => format!(
            r#"<img src="{}" alt="{name}" loading="lazy">"#,
            background_url(thumbnail)
        ),
        (None, MediaKind::Image) => format!(
            r#"<img src="{}" alt="{name}" loading="lazy">"#,
            background_url(&entry.media_path)
        ),
        (None, MediaKind::Video) => format!(
            r#"<video src="{}" muted preload="metadata"></video>"#,
            background_url(&entry.media_path)
        ),
    };

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"                <div class="bg-grid-item" data-bg-path="{media}" data-bg-type="{}">{preview}<span class="bg-name">{name}</span></div>"#,
        entry.kind
    );
}

fn push_sound_item(out: &mut String, sound: &SoundEntry) {
    let name = escape_html(sound.display_name);
    let _ = writeln!(
        out,
        r#"                <button class="sound-button-grid" data-sound-path="{}" data-sound-name="{name}"><ion-icon name="{}"></ion-icon><span>{name}</span></button>"#,
        escape_html(sound.file_path),
        escape_html(sound.icon_id),
    );
}

/// URL for a file in the backgrounds directory, ready for an HTML attribute.
/// The name is one path segment, so `#`, `?`, `%` and spaces are encoded.
pub fn background_url(file_name: &str) -> String {
    escape_html(&format!("{BACKGROUNDS_URL}/{}", urlencoding::encode(file_name)))
}

/// Minimal escaping for text and double-quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_sounds;

    fn video(base: &str) -> BackgroundEntry {
        BackgroundEntry {
            display_name: base.replace('_', " "),
            base_name: base.to_string(),
            media_path: format!("{base}.mov"),
            thumbnail_path: Some(format!("{base}.webp")),
            kind: MediaKind::Video,
        }
    }

    #[test]
    fn renders_background_and_sound_hooks() {
        let html = render_index(&[video("River_Fire")], list_sounds());

        assert!(html.contains(r#"data-bg-path="River_Fire.mov" data-bg-type="video""#));
        assert!(html.contains(r#"<img src="/public/bkgs/River_Fire.webp""#));
        assert!(html.contains("River Fire"));
        assert!(html.contains(r#"data-sound-path="fire.mp3" data-sound-name="Fire""#));
        assert!(html.contains(r#"<ion-icon name="water-outline">"#));
        assert!(!html.contains("No backgrounds available"));
    }

    #[test]
    fn empty_catalog_still_renders() {
        let html = render_index(&[], &[]);

        assert!(html.contains("No backgrounds available."));
        assert!(html.contains(r#"id="bgModal""#));
    }

    #[test]
    fn background_urls_encode_reserved_characters() {
        assert_eq!(background_url("Rain#2.webp"), "/public/bkgs/Rain%232.webp");
        assert_eq!(background_url("Calm? Night.mov"), "/public/bkgs/Calm%3F%20Night.mov");
        assert_eq!(background_url("100%_Calm.webp"), "/public/bkgs/100%25_Calm.webp");

        let mut entry = video("Rain#2");
        entry.display_name = "Rain#2".to_string();
        let html = render_index(&[entry], &[]);

        assert!(html.contains(r#"data-bg-path="Rain#2.mov""#));
        assert!(html.contains(r#"src="/public/bkgs/Rain%232.webp""#));
        assert!(!html.contains("/public/bkgs/Rain#2"));
    }

    #[test]
    fn file_names_are_escaped() {
        let mut entry = video("a");
        entry.media_path = r#"x"><script>.png"#.to_string();
        entry.display_name = "<b>".to_string();
        entry.thumbnail_path = None;
        entry.kind = MediaKind::Image;

        let html = render_index(&[entry], &[]);

        assert!(!html.contains("<script>.png"));
        assert!(html.contains("x&quot;&gt;&lt;script&gt;.png"));
        assert!(html.contains("&lt;b&gt;"));
    }
}
