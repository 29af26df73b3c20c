//! Catalog builder: what the user can pick from. Backgrounds come from a
//! directory scan on every call; sounds are a fixed list.

mod backgrounds;
mod sounds;

pub use backgrounds::{
    build_catalog, display_name, kind_for_extension, list_backgrounds, DiscoveryMode,
    IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};
pub use sounds::list_sounds;
