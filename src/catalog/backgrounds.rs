use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::{BackgroundEntry, MediaKind};

/// Extensions rendered as CSS background images.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Extensions rendered through the `<video>` element.
pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "webm", "mov", "avi", "mkv", "flv"];

/// Container used for every entry in `VideoWithThumbnail` mode.
const PAIRED_VIDEO_EXTENSION: &str = "mov";
/// Preview image expected next to each video in `VideoWithThumbnail` mode.
const PAIRED_THUMBNAIL_EXTENSION: &str = "webp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How files in the backgrounds directory map to catalog entries.
pub enum DiscoveryMode {
    /// Each recognised file is its own entry, served under its original name
    /// and typed by its extension.
    ByExtension,
    /// The directory holds `<name>.mov` videos with `<name>.webp` previews.
    /// All recognised files sharing a base name collapse into one video entry
    /// whose paths are rebuilt from the base name.
    #[default]
    VideoWithThumbnail,
}

/// Scan `dir` and build the background catalog.
///
/// Files are visited in filename order so repeated scans of an unchanged
/// directory return identical results. Subdirectories and unsupported
/// extensions are skipped silently. A directory that cannot be read is an
/// error here; deciding to show an empty catalog instead is up to the caller.
pub fn list_backgrounds(
    dir: &Path,
    mode: DiscoveryMode,
) -> Result<Vec<BackgroundEntry>, CatalogError> {
    let read_dir = fs::read_dir(dir).map_err(|source| CatalogError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut file_names: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    file_names.sort();

    let entries = build_catalog(file_names.iter().map(String::as_str), mode);
    tracing::debug!(dir = %dir.display(), count = entries.len(), "scanned backgrounds");
    Ok(entries)
}

/// Turn an ordered list of file names into catalog entries. Pure, so the
/// dedup and naming rules can be tested without touching the filesystem.
pub fn build_catalog<'a>(
    file_names: impl IntoIterator<Item = &'a str>,
    mode: DiscoveryMode,
) -> Vec<BackgroundEntry> {
    let candidates = file_names
        .into_iter()
        .filter_map(|name| classify(name, mode))
        .enumerate();

    // First occurrence of each base name wins; the index keeps listing order.
    let by_base = candidates.fold(HashMap::new(), |mut acc, (order, entry)| {
        acc.entry(entry.base_name.clone()).or_insert((order, entry));
        acc
    });

    let mut ordered: Vec<(usize, BackgroundEntry)> = by_base.into_values().collect();
    ordered.sort_by_key(|(order, _)| *order);
    ordered.into_iter().map(|(_, entry)| entry).collect()
}

/// Build the entry for one file, or `None` when its extension is not a
/// supported image or video type.
fn classify(file_name: &str, mode: DiscoveryMode) -> Option<BackgroundEntry> {
    let (base_name, extension) = split_extension(file_name)?;
    let kind = kind_for_extension(extension)?;
    let display_name = display_name(base_name);

    let entry = match mode {
        DiscoveryMode::ByExtension => BackgroundEntry {
            display_name,
            base_name: base_name.to_string(),
            media_path: file_name.to_string(),
            thumbnail_path: None,
            kind,
        },
        DiscoveryMode::VideoWithThumbnail => BackgroundEntry {
            display_name,
            base_name: base_name.to_string(),
            media_path: format!("{base_name}.{PAIRED_VIDEO_EXTENSION}"),
            thumbnail_path: Some(format!("{base_name}.{PAIRED_THUMBNAIL_EXTENSION}")),
            kind: MediaKind::Video,
        },
    };
    Some(entry)
}

/// Split at the last dot. Names without a dot, or whose only dot is the
/// leading one of a hidden file, have no extension.
fn split_extension(file_name: &str) -> Option<(&str, &str)> {
    let path = Path::new(file_name);
    let base = path.file_stem()?.to_str()?;
    let extension = path.extension()?.to_str()?;
    Some((base, extension))
}

/// Case-insensitive lookup in the extension tables.
pub fn kind_for_extension(extension: &str) -> Option<MediaKind> {
    let ext = extension.to_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Underscores become spaces; nothing else is touched.
pub fn display_name(base_name: &str) -> String {
    base_name.replace('_', " ")
}
