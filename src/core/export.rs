use crate::domain::model::BulkTranslationItem;
use crate::utils::error::{Result, SofiaError};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const EXPORT_FILE_NAME: &str = "translations.csv";

pub const CSV_HEADER: [&str; 4] = [
    "Original",
    "Translated",
    "Domain Alignment",
    "Preserved Elements",
];

const LIST_SEPARATOR: &str = "; ";

/// Renders bulk results as CSV text.
///
/// Every cell is quoted, list fields are joined with `"; "`, and rows are
/// separated by `\n` with no trailing newline.
pub fn to_csv<'a, I>(items: I) -> Result<String>
where
    I: IntoIterator<Item = &'a BulkTranslationItem>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for item in items {
        writer.write_record([
            item.original.as_str(),
            item.translated.as_str(),
            item.domain_alignment.join(LIST_SEPARATOR).as_str(),
            item.preserved_elements.join(LIST_SEPARATOR).as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SofiaError::IoError(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| SofiaError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
