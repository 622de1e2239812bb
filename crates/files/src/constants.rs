/// File name suffixes recognised as images by the album lister, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Separator used in every externally visible path, whatever the host platform uses.
pub const URL_SEPARATOR: char = '/';
