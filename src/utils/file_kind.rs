//! File kind classification
//!
//! Maps the MIME-like `type` tag of a record to the category the dashboards
//! draw an icon for. Unknown and missing types fall back to `Other`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    WordProcessing,
    Spreadsheet,
    Presentation,
    Archive,
    Code,
    Other,
}

impl FileKind {
    pub fn icon(&self) -> &'static str {
        match self {
            FileKind::Image => "🖼️",
            FileKind::Video => "🎥",
            FileKind::Audio => "🎵",
            FileKind::Document | FileKind::Other => "📄",
            FileKind::WordProcessing => "📝",
            FileKind::Spreadsheet => "📊",
            FileKind::Presentation => "📈",
            FileKind::Archive => "📦",
            FileKind::Code => "💻",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::WordProcessing => "word processing",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::Presentation => "presentation",
            FileKind::Archive => "archive",
            FileKind::Code => "code",
            FileKind::Other => "other",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies an exact MIME type. Matching is exact, like the icon table it
/// replaces: `image/png` is an image, `image/x-icon` is not.
pub fn file_kind(mime: Option<&str>) -> FileKind {
    let Some(mime) = mime else {
        return FileKind::Other;
    };

    match mime {
        "image/jpeg" | "image/jpg" | "image/png" | "image/gif" | "image/svg+xml"
        | "image/webp" => FileKind::Image,

        "video/mp4" | "video/avi" | "video/mov" | "video/wmv" | "video/webm" => FileKind::Video,

        "audio/mp3" | "audio/wav" | "audio/ogg" | "audio/m4a" => FileKind::Audio,

        "application/pdf" | "text/plain" | "application/octet-stream" => FileKind::Document,

        "application/msword"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            FileKind::WordProcessing
        }

        "application/vnd.ms-excel"
        | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        | "text/csv" => FileKind::Spreadsheet,

        "application/vnd.ms-powerpoint"
        | "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
            FileKind::Presentation
        }

        "application/zip"
        | "application/x-rar-compressed"
        | "application/x-7z-compressed"
        | "application/x-tar" => FileKind::Archive,

        "text/html" | "text/css" | "text/javascript" | "application/json" | "text/xml" => {
            FileKind::Code
        }

        _ => FileKind::Other,
    }
}
