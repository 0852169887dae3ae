//! FILENAME: tests/roundtrip.rs
//! Decode-of-encode round trips for every file kind, through memory and
//! through the filesystem, plus property tests over arbitrary valid shapes.

use engine::{
    CaseDescriptor, CaseSourceKind, CellKind, CellValue, DatabaseKind, Grid, ValueCase,
};
use persistence::{
    decode_data, decode_merged, decode_project, encode_data, encode_merged, encode_project,
    load_database_file, save_database_file, ColumnData, Database, DbFileKind, SavedCaseSource,
    SavedValue, TypeData,
};
use proptest::prelude::*;

fn sample_database() -> Database {
    let mut grid = Grid::with_schema(&[CellKind::Int, CellKind::Text]).unwrap();
    grid.add_rows(2).unwrap();
    grid.set_cell(0, 0, CellValue::int(1)).unwrap();
    grid.set_cell(0, 1, CellValue::text("スライム")).unwrap();
    grid.set_cell(1, 0, CellValue::int(2)).unwrap();
    grid.set_cell(1, 1, CellValue::text("ゴブリン")).unwrap();
    grid.set_cell(2, 0, CellValue::int(3)).unwrap();
    grid.set_cell(2, 1, CellValue::text("ドラゴン")).unwrap();

    let mut element = CaseDescriptor::new();
    element
        .change_mode(
            CaseSourceKind::Manual,
            Some(vec![
                ValueCase::new(0, "なし"),
                ValueCase::new(1, "炎"),
                ValueCase::new(2, "水"),
            ]),
        )
        .unwrap();
    let descriptors = vec![CaseDescriptor::new(), element];

    let mut ty = TypeData::from_grid("敵キャラ", "enemy table", &grid, &descriptors).unwrap();
    ty.columns[0].name = "番号".to_string();
    ty.columns[1].name = "名前".to_string();

    let mut db = Database::new(DatabaseKind::Changeable);
    db.types.push(ty);
    db
}

#[test]
fn test_merged_roundtrip_preserves_everything() {
    let db = sample_database();
    let decoded = decode_merged(&encode_merged(&db)).unwrap();
    assert_eq!(decoded, db);
}

#[test]
fn test_project_roundtrip_preserves_settings() {
    let db = sample_database();
    let decoded = decode_project(&encode_project(&db)).unwrap();
    assert_eq!(decoded.kind, db.kind);
    assert_eq!(decoded.types.len(), 1);
    assert_eq!(decoded.types[0].name, db.types[0].name);
    assert_eq!(decoded.types[0].memo, db.types[0].memo);
    assert_eq!(decoded.types[0].columns, db.types[0].columns);
    assert!(decoded.types[0].rows.is_empty());
}

#[test]
fn test_data_roundtrip_preserves_rows_and_kinds() {
    let db = sample_database();
    let decoded = decode_data(&encode_data(&db)).unwrap();
    assert_eq!(decoded.kind, db.kind);
    assert_eq!(decoded.types[0].rows, db.types[0].rows);
    let kinds: Vec<CellKind> = decoded.types[0].columns.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![CellKind::Int, CellKind::Text]);
    // the data layout does not carry names or case settings
    assert!(decoded.types[0].columns.iter().all(|c| c.name.is_empty()));
}

#[test]
fn test_full_pipeline_grid_to_file_to_grid() {
    let db = sample_database();
    let decoded = decode_merged(&encode_merged(&db)).unwrap();
    let (grid, descriptors) = decoded.types[0].to_grid().unwrap();

    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.cell(1, 1), Some(&CellValue::text("ゴブリン")));
    assert_eq!(descriptors[1].mode(), CaseSourceKind::Manual);
    assert_eq!(
        descriptors[1].all_case_descriptions(),
        vec!["なし", "炎", "水"]
    );
}

#[test]
fn test_save_and_load_files() {
    let db = sample_database();
    let dir = tempfile::tempdir().unwrap();

    for kind in [DbFileKind::Project, DbFileKind::Data, DbFileKind::Merged] {
        let path = dir.path().join(format!("{:?}.fdb", kind));
        save_database_file(&db, kind, &path).unwrap();
        let loaded = load_database_file(kind, &path).unwrap();
        assert_eq!(loaded.kind, db.kind);
        assert_eq!(loaded.types.len(), db.types.len());
    }

    // a merged file on disk survives byte-for-byte
    let path = dir.path().join("full.fdb");
    save_database_file(&db, DbFileKind::Merged, &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), encode_merged(&db));
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

fn ascii_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _/-]{0,12}"
}

fn db_kind_strategy() -> impl Strategy<Value = DatabaseKind> {
    prop_oneof![
        Just(DatabaseKind::Changeable),
        Just(DatabaseKind::User),
        Just(DatabaseKind::System),
    ]
}

fn cell_kind_strategy() -> impl Strategy<Value = CellKind> {
    prop_oneof![Just(CellKind::Int), Just(CellKind::Text)]
}

fn value_case_strategy() -> impl Strategy<Value = ValueCase> {
    (any::<i32>(), ascii_string()).prop_map(|(number, description)| ValueCase {
        number,
        description,
    })
}

fn case_source_strategy() -> impl Strategy<Value = SavedCaseSource> {
    prop_oneof![
        Just(SavedCaseSource::Plain),
        proptest::collection::vec(value_case_strategy(), 0..4)
            .prop_map(SavedCaseSource::Manual),
        (
            db_kind_strategy(),
            any::<u32>(),
            any::<bool>(),
            [ascii_string(), ascii_string(), ascii_string()]
        )
            .prop_map(|(kind, type_id, use_additional, additional)| {
                SavedCaseSource::ReferDatabase {
                    kind,
                    type_id,
                    use_additional,
                    additional,
                }
            }),
        (ascii_string(), any::<bool>()).prop_map(|(folder, omit_folder_name)| {
            SavedCaseSource::LoadFile {
                folder,
                omit_folder_name,
            }
        }),
    ]
}

fn type_data_strategy() -> impl Strategy<Value = TypeData> {
    (
        ascii_string(),
        ascii_string(),
        proptest::collection::vec(
            (ascii_string(), cell_kind_strategy(), case_source_strategy()),
            0..4,
        ),
    )
        .prop_flat_map(|(name, memo, cols)| {
            let kinds: Vec<CellKind> = cols.iter().map(|(_, kind, _)| *kind).collect();
            let width = kinds.len();
            let row_strategy = proptest::collection::vec((any::<i32>(), ascii_string()), width..=width)
                .prop_map(move |cells| {
                    cells
                        .into_iter()
                        .zip(kinds.clone())
                        .map(|((n, s), kind)| match kind {
                            CellKind::Int => SavedValue::Int(n),
                            CellKind::Text => SavedValue::Text(s),
                        })
                        .collect::<Vec<SavedValue>>()
                });
            (
                Just(name),
                Just(memo),
                Just(cols),
                proptest::collection::vec(row_strategy, 0..3),
            )
        })
        .prop_map(|(name, memo, cols, rows)| TypeData {
            name,
            memo,
            columns: cols
                .into_iter()
                .map(|(name, kind, cases)| ColumnData { name, kind, cases })
                .collect(),
            rows,
        })
}

fn database_strategy() -> impl Strategy<Value = Database> {
    (
        db_kind_strategy(),
        proptest::collection::vec(type_data_strategy(), 0..3),
    )
        .prop_map(|(kind, types)| Database { kind, types })
}

proptest! {
    #[test]
    fn prop_merged_roundtrip(db in database_strategy()) {
        let decoded = decode_merged(&encode_merged(&db)).unwrap();
        prop_assert_eq!(decoded, db);
    }

    #[test]
    fn prop_project_roundtrip(db in database_strategy()) {
        let decoded = decode_project(&encode_project(&db)).unwrap();
        prop_assert_eq!(decoded.kind, db.kind);
        prop_assert_eq!(decoded.types.len(), db.types.len());
        for (decoded_ty, ty) in decoded.types.iter().zip(&db.types) {
            prop_assert_eq!(&decoded_ty.name, &ty.name);
            prop_assert_eq!(&decoded_ty.columns, &ty.columns);
            prop_assert!(decoded_ty.rows.is_empty());
        }
    }

    #[test]
    fn prop_data_roundtrip(db in database_strategy()) {
        let decoded = decode_data(&encode_data(&db)).unwrap();
        prop_assert_eq!(decoded.kind, db.kind);
        for (decoded_ty, ty) in decoded.types.iter().zip(&db.types) {
            prop_assert_eq!(&decoded_ty.rows, &ty.rows);
            let decoded_kinds: Vec<CellKind> =
                decoded_ty.columns.iter().map(|c| c.kind).collect();
            let kinds: Vec<CellKind> = ty.columns.iter().map(|c| c.kind).collect();
            prop_assert_eq!(decoded_kinds, kinds);
        }
    }

    #[test]
    fn prop_encoding_is_byte_stable(db in database_strategy()) {
        let bytes = encode_merged(&db);
        let reencoded = encode_merged(&decode_merged(&bytes).unwrap());
        prop_assert_eq!(reencoded, bytes);
    }
}
