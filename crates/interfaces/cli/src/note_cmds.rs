//! Plain-text tables for `note list` and `note info`.

use chrono::TimeZone;
use std::fmt::Display;

use note_store::Note;

const LIST_PADDING: usize = 4;
const INFO_PADDING: usize = 2;

pub(crate) fn list_lines<Tz>(notes: &[Note], tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if notes.is_empty() {
        return vec!["No notes found".to_string()];
    }

    let mut rows = vec![vec![
        "FILENAME".to_string(),
        "CREATED ON".to_string(),
        "LAST UPDATED".to_string(),
    ]];
    for note in notes {
        rows.push(vec![
            note.metadata.filename.clone(),
            note.metadata.created_at.with_timezone(tz).format("%Y-%m-%d").to_string(),
            note.metadata.updated_at.with_timezone(tz).format("%Y-%m-%d").to_string(),
        ]);
    }

    align_columns(&rows, LIST_PADDING)
}

pub(crate) fn info_lines<Tz>(note: &Note, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stamp = "%Y-%m-%d %H:%M:%S";
    let rows = vec![
        vec!["FILENAME".to_string(), note.metadata.filename.clone()],
        vec!["AUTHOR".to_string(), note.metadata.author.clone()],
        vec![
            "CREATED ON".to_string(),
            note.metadata.created_at.with_timezone(tz).format(stamp).to_string(),
        ],
        vec![
            "LAST UPDATED".to_string(),
            note.metadata.updated_at.with_timezone(tz).format(stamp).to_string(),
        ],
    ];

    align_columns(&rows, INFO_PADDING)
}

/// Left-align every column but the last to its widest cell plus `padding`.
fn align_columns(rows: &[Vec<String>], padding: usize) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (idx, cell) in row.iter().enumerate() {
                if idx + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{cell:<width$}", width = widths[idx] + padding));
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}
