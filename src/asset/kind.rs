//! Image kind detection by file extension.

use std::path::Path;

/// Image formats eligible for preloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExt {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Webp,
    Avif,
    Svg,
}

impl ImageExt {
    pub const ALL: [ImageExt; 7] = [
        Self::Png,
        Self::Jpg,
        Self::Jpeg,
        Self::Gif,
        Self::Webp,
        Self::Avif,
        Self::Svg,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Svg => "svg",
        }
    }

    /// Detect image kind from a file name suffix (case-insensitive).
    ///
    /// Only the text after the last `.` counts, so `photo.PNG` matches
    /// while `png` (no dot) and `photo.png.bak` do not.
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|kind| ext.eq_ignore_ascii_case(kind.as_str()))
    }

    /// Detect image kind from the file name component of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()?.to_str().and_then(Self::from_name)
    }
}

/// Check whether a file name passes the image extension allow-list.
#[inline]
pub fn is_image(name: &str) -> bool {
    ImageExt::from_name(name).is_some()
}
