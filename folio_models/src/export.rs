pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A downloadable rendition of the whole message archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveExport {
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
}
