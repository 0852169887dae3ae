//! FILENAME: core/persistence/src/writer.rs
//! PURPOSE: Encodes databases into the proprietary binary layouts.
//! CONTEXT: Output length is a pure function of the input shape (column
//! count, kinds, string byte lengths, row count); the golden tests pin the
//! exact byte counts. Encoding is infallible: the saved model is already
//! validated, and unencodable text degrades to replacements in `put_string`.

use crate::format::{
    cell_kind_tag, db_kind_tag, put_i32, put_string, put_u32, put_u8, CASES_LOAD_FILE,
    CASES_MANUAL, CASES_PLAIN, CASES_REFER, DATA_MAGIC, FILE_FOOTER, FORMAT_VERSION,
    MERGED_MAGIC, PROJECT_MAGIC,
};
use crate::{ColumnData, Database, SavedCaseSource, SavedValue, TypeData};

/// Encodes the type/schema ("project") layout: names, memos and per-column
/// settings, no row data.
pub fn encode_project(db: &Database) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&PROJECT_MAGIC);
    put_u32(&mut buf, FORMAT_VERSION);
    put_u8(&mut buf, db_kind_tag(db.kind));
    put_u32(&mut buf, db.types.len() as u32);
    for ty in &db.types {
        write_type_settings(&mut buf, ty);
    }
    put_u8(&mut buf, FILE_FOOTER);
    buf
}

/// Encodes the row-data layout. Kind tags are written inline so the file
/// decodes without its project counterpart.
pub fn encode_data(db: &Database) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&DATA_MAGIC);
    put_u32(&mut buf, FORMAT_VERSION);
    put_u8(&mut buf, db_kind_tag(db.kind));
    put_u32(&mut buf, db.types.len() as u32);
    for ty in &db.types {
        write_type_rows(&mut buf, ty);
    }
    put_u8(&mut buf, FILE_FOOTER);
    buf
}

/// Encodes the merged layout: the complete project file followed by the
/// complete data file, inside a merged frame.
pub fn encode_merged(db: &Database) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&MERGED_MAGIC);
    put_u32(&mut buf, FORMAT_VERSION);
    put_u8(&mut buf, db_kind_tag(db.kind));
    buf.extend_from_slice(&encode_project(db));
    buf.extend_from_slice(&encode_data(db));
    put_u8(&mut buf, FILE_FOOTER);
    buf
}

fn write_type_settings(buf: &mut Vec<u8>, ty: &TypeData) {
    put_string(buf, &ty.name);
    put_string(buf, &ty.memo);
    put_u32(buf, ty.columns.len() as u32);
    for col in &ty.columns {
        write_column(buf, col);
    }
}

fn write_column(buf: &mut Vec<u8>, col: &ColumnData) {
    put_string(buf, &col.name);
    put_u8(buf, cell_kind_tag(col.kind));
    match &col.cases {
        SavedCaseSource::Plain => {
            put_u8(buf, CASES_PLAIN);
        }
        SavedCaseSource::Manual(cases) => {
            put_u8(buf, CASES_MANUAL);
            put_u32(buf, cases.len() as u32);
            for case in cases {
                put_i32(buf, case.number);
                put_string(buf, &case.description);
            }
        }
        SavedCaseSource::ReferDatabase {
            kind,
            type_id,
            use_additional,
            additional,
        } => {
            put_u8(buf, CASES_REFER);
            put_u8(buf, db_kind_tag(*kind));
            put_u32(buf, *type_id);
            put_u8(buf, u8::from(*use_additional));
            for label in additional {
                put_string(buf, label);
            }
        }
        SavedCaseSource::LoadFile {
            folder,
            omit_folder_name,
        } => {
            put_u8(buf, CASES_LOAD_FILE);
            put_string(buf, folder);
            put_u8(buf, u8::from(*omit_folder_name));
        }
    }
}

fn write_type_rows(buf: &mut Vec<u8>, ty: &TypeData) {
    put_u32(buf, ty.columns.len() as u32);
    for col in &ty.columns {
        put_u8(buf, cell_kind_tag(col.kind));
    }
    put_u32(buf, ty.rows.len() as u32);
    for row in &ty.rows {
        for value in row {
            write_value(buf, value);
        }
    }
}

fn write_value(buf: &mut Vec<u8>, value: &SavedValue) {
    match value {
        SavedValue::Int(n) => put_i32(buf, *n),
        SavedValue::Text(s) => put_string(buf, s),
    }
}
