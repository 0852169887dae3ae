//! FILENAME: tests/golden.rs
//! Pinned byte counts and byte layouts for the proprietary file formats.
//!
//! These fixtures are the contract with the external tool: output length is
//! a pure function of the input shape, and any change to these numbers is a
//! format break that requires a version bump.

use engine::{CellKind, DatabaseKind, ValueCase};
use persistence::{
    encode_data, encode_merged, encode_project, ColumnData, Database, SavedCaseSource,
    SavedValue, TypeData, DATA_MAGIC,
};

/// The minimal database: one type, empty name and memo, zero columns, the
/// single seed row.
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
fn test_minimal_project_is_40_bytes() {
    // magic 16 + version 4 + kind 1 + type count 4
    //   + name 5 + memo 5 + column count 4
    //   + footer 1
    assert_eq!(encode_project(&minimal()).len(), 40);
}

#[test]
fn test_minimal_data_is_34_bytes() {
    // magic 16 + version 4 + kind 1 + type count 4
    //   + column count 4 + row count 4 (one row of zero cells)
    //   + footer 1
    assert_eq!(encode_data(&minimal()).len(), 34);
}

#[test]
fn test_minimal_merged_is_96_bytes() {
    // merged frame 22 (magic 16 + version 4 + kind 1 + footer 1)
    //   + complete project file 40 + complete data file 34
    assert_eq!(encode_merged(&minimal()).len(), 96);
}

#[test]
fn test_minimal_data_exact_bytes() {
    let mut expected = Vec::new();
    expected.extend_from_slice(&DATA_MAGIC);
    expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // version 1
    expected.push(0x01); // user database
    expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // 1 type
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // 0 columns
    expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // 1 row
    expected.push(0xC1); // footer
    assert_eq!(encode_data(&minimal()), expected);
}

/// A representative multi-column, multi-row database exercising every
/// case-source payload.
fn item_database() -> Database {
    Database {
        kind: DatabaseKind::User,
        types: vec![TypeData {
            name: "Items".to_string(),
            memo: "tools".to_string(),
            columns: vec![
                ColumnData {
                    name: "ID".to_string(),
                    kind: CellKind::Int,
                    cases: SavedCaseSource::Plain,
                },
                ColumnData {
                    name: "Name".to_string(),
                    kind: CellKind::Text,
                    cases: SavedCaseSource::Manual(vec![
                        ValueCase::new(1, "herb"),
                        ValueCase::new(2, "potion"),
                    ]),
                },
                ColumnData {
                    name: "Sprite".to_string(),
                    kind: CellKind::Text,
                    cases: SavedCaseSource::LoadFile {
                        folder: "Picture/Items".to_string(),
                        omit_folder_name: true,
                    },
                },
                ColumnData {
                    name: "Owner".to_string(),
                    kind: CellKind::Int,
                    cases: SavedCaseSource::ReferDatabase {
                        kind: DatabaseKind::User,
                        type_id: 5,
                        use_additional: true,
                        additional: [
                            "none".to_string(),
                            String::new(),
                            "all".to_string(),
                        ],
                    },
                },
            ],
            rows: vec![
                vec![
                    SavedValue::Int(1),
                    SavedValue::Text("herb".to_string()),
                    SavedValue::Text("h.png".to_string()),
                    SavedValue::Int(0),
                ],
                vec![
                    SavedValue::Int(2),
                    SavedValue::Text("potion".to_string()),
                    SavedValue::Text("p.png".to_string()),
                    SavedValue::Int(3),
                ],
            ],
        }],
    }
}

#[test]
fn test_item_database_project_is_174_bytes() {
    // header/footer 26
    //   type: name "Items" 10 + memo "tools" 10 + column count 4      = 24
    //   col ID:     name 7  + kind 1 + tag 1                          = 9
    //   col Name:   name 9  + kind 1 + tag 1 + count 4
    //               + case(4 + 9) + case(4 + 11)                      = 43
    //   col Sprite: name 11 + kind 1 + tag 1 + folder 18 + flag 1     = 32
    //   col Owner:  name 10 + kind 1 + tag 1 + db kind 1 + type id 4
    //               + flag 1 + labels 9 + 5 + 8                       = 40
    assert_eq!(encode_project(&item_database()).len(), 174);
}

#[test]
fn test_item_database_data_is_94_bytes() {
    // header/footer 26
    //   type: column count 4 + kind tags 4 + row count 4              = 12
    //   row 1: 4 + (4+4+1) + (4+5+1) + 4                              = 27
    //   row 2: 4 + (4+6+1) + (4+5+1) + 4                              = 29
    assert_eq!(encode_data(&item_database()).len(), 94);
}

#[test]
fn test_item_database_merged_is_290_bytes() {
    // merged frame 22 + project 174 + data 94
    assert_eq!(encode_merged(&item_database()).len(), 290);
}

#[test]
fn test_length_scales_linearly_with_rows() {
    let mut db = item_database();
    let one = encode_data(&db).len();
    let row = db.types[0].rows[0].clone();
    db.types[0].rows.push(row.clone());
    let two = encode_data(&db).len();
    db.types[0].rows.push(row);
    let three = encode_data(&db).len();
    assert_eq!(two - one, three - two);
}

#[test]
fn test_length_determined_by_shape_alone() {
    let db = item_database();
    assert_eq!(encode_merged(&db), encode_merged(&db.clone()));
}
