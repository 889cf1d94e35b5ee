// CSV import for panel tables

use std::io::Read;
use std::path::Path;

use tallyview_engine::table::Table;

/// Load a CSV file into a table. File-level errors (missing file,
/// unreadable) are the only failures; malformed content degrades row by
/// row instead of erroring.
pub fn load(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    Ok(parse(&content))
}

/// Parse raw CSV text into a header-indexed table.
///
/// First line is the header. Fields are tokenized respecting
/// double-quote-delimited fields containing commas; an escaped quote is a
/// backslash immediately preceding the quote character (not doubled-quote
/// escaping). Surrounding quotes are stripped. Rows with fewer than 2
/// fields are discarded — this guards against trailing blank lines. No
/// header validation: absent columns degrade via the header-index
/// contract.
pub fn parse(text: &str) -> Table {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .double_quote(false)
        .escape(Some(b'\\'))
        .from_reader(text.trim().as_bytes());

    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Untrusted exports: skip records the tokenizer rejects
        let Ok(record) = result else { continue };
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        if idx == 0 {
            header = fields;
        } else if fields.len() >= 2 {
            rows.push(fields);
        }
    }

    Table::new(header, rows)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252
/// exports from spreadsheet tools).
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
