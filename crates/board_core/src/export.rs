use crate::ResultRecord;

pub const TSV_COLUMNS: [&str; 5] = ["Title", "URL", "Image URL", "Keyword", "Description"];

const DELIMITER: &str = "\t";

/// Renders records as tab-separated text for pasting into a spreadsheet.
///
/// The header line always comes first; rows follow in input order, one per
/// line, with absent fields written as `N/A`. There is no trailing newline.
pub fn to_tsv(results: &[ResultRecord]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(TSV_COLUMNS.join(DELIMITER));
    for record in results {
        let row = [
            record.title_or_na(),
            record.url_or_na(),
            record.image_or_na(),
            record.keyword_or_na(),
            record.description_or_na(),
        ];
        lines.push(row.join(DELIMITER));
    }
    lines.join("\n")
}

/// Every record's URL, one per line.
pub fn links_text(results: &[ResultRecord]) -> String {
    results
        .iter()
        .map(ResultRecord::url_or_na)
        .collect::<Vec<_>>()
        .join("\n")
}
