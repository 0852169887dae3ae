//! FILENAME: core/persistence/src/reader.rs
//! PURPOSE: Decodes the proprietary binary layouts back into databases.
//! CONTEXT: Exact inverse of `writer.rs`. Decoding is strict: bad magic,
//! unknown tags, truncation, version drift, a missing footer or trailing
//! bytes all fail, and counts are capped before any allocation so a corrupt
//! length field cannot balloon memory.

use engine::{ValueCase, MAX_CASES, MAX_COLUMNS, MAX_ROWS};

use crate::format::{
    cell_kind_from_tag, db_kind_from_tag, FieldReader, CASES_LOAD_FILE, CASES_MANUAL,
    CASES_PLAIN, CASES_REFER, DATA_MAGIC, FORMAT_VERSION, MAX_TYPES, MERGED_MAGIC,
    PROJECT_MAGIC,
};
use crate::{ColumnData, Database, PersistenceError, SavedCaseSource, SavedValue, TypeData};

/// Decodes a type/schema ("project") file. The result carries no row data.
pub fn decode_project(bytes: &[u8]) -> Result<Database, PersistenceError> {
    let mut reader = FieldReader::new(bytes);
    let db = read_project(&mut reader)?;
    ensure_consumed(&reader)?;
    Ok(db)
}

/// Decodes a row-data file. Columns come back with empty names and plain
/// case sources; the project file owns those settings.
pub fn decode_data(bytes: &[u8]) -> Result<Database, PersistenceError> {
    let mut reader = FieldReader::new(bytes);
    let db = read_data(&mut reader)?;
    ensure_consumed(&reader)?;
    Ok(db)
}

/// Decodes a merged file and re-joins its halves: column settings from the
/// project half, rows from the data half. The halves must agree on database
/// kind and shape.
pub fn decode_merged(bytes: &[u8]) -> Result<Database, PersistenceError> {
    let mut reader = FieldReader::new(bytes);
    reader.expect_magic(&MERGED_MAGIC, "merged database")?;
    check_version(reader.read_u32()?)?;
    let kind = db_kind_from_tag(reader.read_u8()?)?;

    let project = read_project(&mut reader)?;
    let data = read_data(&mut reader)?;
    reader.expect_footer()?;
    ensure_consumed(&reader)?;

    if project.kind != kind || data.kind != kind {
        return Err(PersistenceError::ShapeMismatch(
            "merged halves disagree on database kind".to_string(),
        ));
    }
    if project.types.len() != data.types.len() {
        return Err(PersistenceError::ShapeMismatch(format!(
            "project half has {} types, data half has {}",
            project.types.len(),
            data.types.len()
        )));
    }

    let mut types = Vec::with_capacity(project.types.len());
    for (index, (mut settings, rows)) in project
        .types
        .into_iter()
        .zip(data.types.into_iter())
        .enumerate()
    {
        let settings_kinds: Vec<_> = settings.columns.iter().map(|c| c.kind).collect();
        let data_kinds: Vec<_> = rows.columns.iter().map(|c| c.kind).collect();
        if settings_kinds != data_kinds {
            return Err(PersistenceError::ShapeMismatch(format!(
                "type {} column kinds differ between halves",
                index
            )));
        }
        settings.rows = rows.rows;
        types.push(settings);
    }
    Ok(Database { kind, types })
}

// ============================================================================
// SECTION READERS (shared with the merged layout)
// ============================================================================

fn read_project(reader: &mut FieldReader<'_>) -> Result<Database, PersistenceError> {
    reader.expect_magic(&PROJECT_MAGIC, "project")?;
    check_version(reader.read_u32()?)?;
    let kind = db_kind_from_tag(reader.read_u8()?)?;
    let type_count = read_count(reader, MAX_TYPES, "type")?;
    let mut types = Vec::with_capacity(type_count);
    for _ in 0..type_count {
        types.push(read_type_settings(reader)?);
    }
    reader.expect_footer()?;
    Ok(Database { kind, types })
}

fn read_data(reader: &mut FieldReader<'_>) -> Result<Database, PersistenceError> {
    reader.expect_magic(&DATA_MAGIC, "row-data")?;
    check_version(reader.read_u32()?)?;
    let kind = db_kind_from_tag(reader.read_u8()?)?;
    let type_count = read_count(reader, MAX_TYPES, "type")?;
    let mut types = Vec::with_capacity(type_count);
    for _ in 0..type_count {
        types.push(read_type_rows(reader)?);
    }
    reader.expect_footer()?;
    Ok(Database { kind, types })
}

fn read_type_settings(reader: &mut FieldReader<'_>) -> Result<TypeData, PersistenceError> {
    let name = reader.read_string()?;
    let memo = reader.read_string()?;
    let column_count = read_count(reader, MAX_COLUMNS, "column")?;
    let mut columns = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        columns.push(read_column(reader)?);
    }
    Ok(TypeData {
        name,
        memo,
        columns,
        rows: Vec::new(),
    })
}

fn read_column(reader: &mut FieldReader<'_>) -> Result<ColumnData, PersistenceError> {
    let name = reader.read_string()?;
    let kind = cell_kind_from_tag(reader.read_u8()?)?;
    let cases = match reader.read_u8()? {
        CASES_PLAIN => SavedCaseSource::Plain,
        CASES_MANUAL => {
            let case_count = read_count(reader, MAX_CASES, "case")?;
            let mut cases = Vec::with_capacity(case_count);
            for _ in 0..case_count {
                let number = reader.read_i32()?;
                let description = reader.read_string()?;
                cases.push(ValueCase {
                    number,
                    description,
                });
            }
            SavedCaseSource::Manual(cases)
        }
        CASES_REFER => {
            let db_kind = db_kind_from_tag(reader.read_u8()?)?;
            let type_id = reader.read_u32()?;
            let use_additional = read_flag(reader)?;
            let additional = [
                reader.read_string()?,
                reader.read_string()?,
                reader.read_string()?,
            ];
            SavedCaseSource::ReferDatabase {
                kind: db_kind,
                type_id,
                use_additional,
                additional,
            }
        }
        CASES_LOAD_FILE => {
            let folder = reader.read_string()?;
            let omit_folder_name = read_flag(reader)?;
            SavedCaseSource::LoadFile {
                folder,
                omit_folder_name,
            }
        }
        other => {
            return Err(PersistenceError::InvalidFormat(format!(
                "unknown case-source tag 0x{:02X}",
                other
            )))
        }
    };
    Ok(ColumnData { name, kind, cases })
}

fn read_type_rows(reader: &mut FieldReader<'_>) -> Result<TypeData, PersistenceError> {
    let column_count = read_count(reader, MAX_COLUMNS, "column")?;
    let mut columns = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        let kind = cell_kind_from_tag(reader.read_u8()?)?;
        columns.push(ColumnData {
            name: String::new(),
            kind,
            cases: SavedCaseSource::Plain,
        });
    }
    let row_count = read_count(reader, MAX_ROWS, "row")?;
    let mut rows = Vec::with_capacity(row_count);
    for _ in 0..row_count {
        let mut row = Vec::with_capacity(column_count);
        for col in &columns {
            row.push(match col.kind {
                engine::CellKind::Int => SavedValue::Int(reader.read_i32()?),
                engine::CellKind::Text => SavedValue::Text(reader.read_string()?),
            });
        }
        rows.push(row);
    }
    Ok(TypeData {
        name: String::new(),
        memo: String::new(),
        columns,
        rows,
    })
}

// ============================================================================
// SMALL HELPERS
// ============================================================================

fn check_version(version: u32) -> Result<(), PersistenceError> {
    if version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }
    Ok(())
}

fn read_count(
    reader: &mut FieldReader<'_>,
    max: usize,
    what: &str,
) -> Result<usize, PersistenceError> {
    let count = reader.read_u32()? as usize;
    if count > max {
        return Err(PersistenceError::InvalidFormat(format!(
            "{} count {} exceeds limit {}",
            what, count, max
        )));
    }
    Ok(count)
}

fn read_flag(reader: &mut FieldReader<'_>) -> Result<bool, PersistenceError> {
    match reader.read_u8()? {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(PersistenceError::InvalidFormat(format!(
            "flag byte must be 0x00 or 0x01, got 0x{:02X}",
            other
        ))),
    }
}

fn ensure_consumed(reader: &FieldReader<'_>) -> Result<(), PersistenceError> {
    if !reader.is_empty() {
        return Err(PersistenceError::InvalidFormat(format!(
            "{} trailing bytes after file footer",
            reader.remaining()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{encode_data, encode_merged, encode_project};
    use engine::DatabaseKind;

    fn minimal() -> Database {
        Database {
            kind: DatabaseKind::User,
            types: vec![TypeData {
                name: String::new(),
                memo: String::new(),
                columns: Vec::new(),
                rows: vec![Vec::new()],
            }],
        }
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let bytes = encode_project(&minimal());
        assert!(matches!(
            decode_data(&bytes),
            Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_version_drift_rejected() {
        let mut bytes = encode_data(&minimal());
        bytes[16] = 0x63; // version field sits right after the magic
        assert!(matches!(
            decode_data(&bytes),
            Err(PersistenceError::UnsupportedVersion(0x63))
        ));
    }

    #[test]
    fn test_truncated_file_rejected() {
        let bytes = encode_data(&minimal());
        assert!(matches!(
            decode_data(&bytes[..bytes.len() - 4]),
            Err(PersistenceError::UnexpectedEof { .. }) | Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_data(&minimal());
        bytes.push(0x00);
        assert!(matches!(
            decode_data(&bytes),
            Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unknown_database_kind_rejected() {
        let mut bytes = encode_data(&minimal());
        bytes[20] = 0x7F; // database-kind tag follows the version
        assert!(matches!(
            decode_data(&bytes),
            Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_merged_half_kind_mismatch_rejected() {
        // splice a changeable-kind data half into a user-kind merged frame
        let user = minimal();
        let mut changeable = minimal();
        changeable.kind = DatabaseKind::Changeable;

        let project = encode_project(&user);
        let data = encode_data(&changeable);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&crate::MERGED_MAGIC);
        bytes.extend_from_slice(&crate::FORMAT_VERSION.to_le_bytes());
        bytes.push(crate::DB_USER);
        bytes.extend_from_slice(&project);
        bytes.extend_from_slice(&data);
        bytes.push(crate::FILE_FOOTER);

        assert!(matches!(
            decode_merged(&bytes),
            Err(PersistenceError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_merged_roundtrip_smoke() {
        let db = minimal();
        let decoded = decode_merged(&encode_merged(&db)).unwrap();
        assert_eq!(decoded, db);
    }
}
