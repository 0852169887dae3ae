//! FILENAME: core/engine/src/cases.rs
//! PURPOSE: Per-column case descriptors: how selectable labeled values
//! ("cases") are sourced for a database column.
//! CONTEXT: A column either exposes no cases (plain), a hand-entered list
//! (manual), the rows of another in-game database (refer-database), or the
//! contents of a file folder (load-file). Each mode carries its own fields,
//! held in one sum type so no stale cross-mode state can exist; calling a
//! mode-specific API while in another mode is an `InvalidModeOperation`.
//! `ArgCaseDescriptor` is the narrower sibling used for event-command
//! arguments (normal / refer-database / manual only).

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::{check_capacity, check_index, check_insert_index, check_range};
use crate::error::DbError;
use crate::events::{CasesChange, CasesChangeKind};

/// Maximum number of cases a manual case list may hold.
pub const MAX_CASES: usize = 10_000;

/// Case numbers of the synthetic additional cases a refer-database source
/// exposes, in slot order. The numbering is a fixed sentinel scheme; no
/// other numbers address an additional slot.
pub const ADDITIONAL_CASE_NUMBERS: [i32; 3] = [-1, -2, -3];

/// One selectable labeled value: an integer code plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCase {
    pub number: i32,
    pub description: String,
}

impl ValueCase {
    pub fn new(number: i32, description: impl Into<String>) -> Self {
        ValueCase {
            number,
            description: description.into(),
        }
    }
}

/// Which in-game database a refer-database source points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseKind {
    Changeable,
    User,
    System,
}

// ============================================================================
// CASE LIST (bounded)
// ============================================================================

/// An ordered, capacity-bounded list of cases. Owned exclusively by the
/// manual mode of a descriptor; the mutators below run after the descriptor
/// has gated the mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseList {
    cases: Vec<ValueCase>,
}

impl CaseList {
    pub fn new() -> Self {
        CaseList { cases: Vec::new() }
    }

    /// Builds a list from existing cases, enforcing the capacity bound.
    pub fn from_cases(cases: Vec<ValueCase>) -> Result<Self, DbError> {
        check_capacity("cases", cases.len(), 0, MAX_CASES)?;
        Ok(CaseList { cases })
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ValueCase> {
        self.cases.get(index)
    }

    pub fn cases(&self) -> &[ValueCase] {
        &self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueCase> {
        self.cases.iter()
    }

    fn insert_many(&mut self, index: usize, cases: &[ValueCase]) -> Result<(), DbError> {
        check_insert_index(index, self.cases.len())?;
        check_capacity(
            "cases",
            self.cases.len().saturating_add(cases.len()),
            0,
            MAX_CASES,
        )?;
        self.cases.splice(index..index, cases.iter().cloned());
        Ok(())
    }

    fn update(&mut self, index: usize, case: ValueCase) -> Result<ValueCase, DbError> {
        check_index(index, self.cases.len())?;
        Ok(std::mem::replace(&mut self.cases[index], case))
    }

    fn remove_many(&mut self, index: usize, count: usize) -> Result<Vec<ValueCase>, DbError> {
        check_range(index, count, self.cases.len())?;
        Ok(self.cases.drain(index..index + count).collect())
    }

    fn clear(&mut self) {
        self.cases.clear();
    }
}

// ============================================================================
// ITEM-LEVEL DESCRIPTOR
// ============================================================================

/// The four item-level sourcing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSourceKind {
    Plain,
    Manual,
    ReferDatabase,
    LoadFile,
}

impl CaseSourceKind {
    pub fn name(self) -> &'static str {
        match self {
            CaseSourceKind::Plain => "plain",
            CaseSourceKind::Manual => "manual",
            CaseSourceKind::ReferDatabase => "refer-database",
            CaseSourceKind::LoadFile => "load-file",
        }
    }
}

impl fmt::Display for CaseSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The mode-specific state of an item-level descriptor. One variant per
/// mode, carrying only that mode's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSource {
    Plain,
    Manual(CaseList),
    ReferDatabase {
        kind: DatabaseKind,
        type_id: u32,
        use_additional: bool,
        /// Labels of the synthetic additional cases, slot order matching
        /// `ADDITIONAL_CASE_NUMBERS`.
        additional: [String; 3],
    },
    LoadFile {
        folder: String,
        omit_folder_name: bool,
    },
}

impl CaseSource {
    pub fn mode(&self) -> CaseSourceKind {
        match self {
            CaseSource::Plain => CaseSourceKind::Plain,
            CaseSource::Manual(_) => CaseSourceKind::Manual,
            CaseSource::ReferDatabase { .. } => CaseSourceKind::ReferDatabase,
            CaseSource::LoadFile { .. } => CaseSourceKind::LoadFile,
        }
    }
}

/// Mode-gated state machine describing how one column's cases are sourced.
#[derive(Debug, Clone, Default)]
pub struct CaseDescriptor {
    source: CaseSource,
    changes: VecDeque<CasesChange>,
}

impl Default for CaseSource {
    fn default() -> Self {
        CaseSource::Plain
    }
}

impl From<CaseSource> for CaseDescriptor {
    fn from(source: CaseSource) -> Self {
        CaseDescriptor {
            source,
            changes: VecDeque::new(),
        }
    }
}

/// Equality covers the descriptor state; pending events are transient.
impl PartialEq for CaseDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl CaseDescriptor {
    /// A fresh descriptor starts in plain mode.
    pub fn new() -> Self {
        CaseDescriptor::from(CaseSource::Plain)
    }

    pub fn mode(&self) -> CaseSourceKind {
        self.source.mode()
    }

    /// The full mode-specific state, for pattern matching at the seams
    /// (persistence, editors). Read-only; mutation goes through the
    /// mode-gated operations.
    pub fn source(&self) -> &CaseSource {
        &self.source
    }

    /// Atomically discards all mode-specific state and re-initializes for
    /// `mode`. Seed rules: `Manual` turns the seed into the new case list
    /// (`None` means empty); `LoadFile` requires exactly one seed case whose
    /// description becomes the folder name; `Plain` and `ReferDatabase`
    /// reject any seed.
    pub fn change_mode(
        &mut self,
        mode: CaseSourceKind,
        seed: Option<Vec<ValueCase>>,
    ) -> Result<(), DbError> {
        let source = match mode {
            CaseSourceKind::Plain => {
                if seed.is_some() {
                    return Err(DbError::InvalidModeInit {
                        mode: "plain",
                        reason: "plain mode does not take a seed case list".to_string(),
                    });
                }
                CaseSource::Plain
            }
            CaseSourceKind::Manual => {
                let list = match seed {
                    Some(cases) => CaseList::from_cases(cases)?,
                    None => CaseList::new(),
                };
                CaseSource::Manual(list)
            }
            CaseSourceKind::ReferDatabase => {
                if seed.is_some() {
                    return Err(DbError::InvalidModeInit {
                        mode: "refer-database",
                        reason: "refer-database mode does not take a seed case list".to_string(),
                    });
                }
                CaseSource::ReferDatabase {
                    kind: DatabaseKind::Changeable,
                    type_id: 0,
                    use_additional: false,
                    additional: Default::default(),
                }
            }
            CaseSourceKind::LoadFile => {
                let mut cases = seed.ok_or_else(|| DbError::InvalidModeInit {
                    mode: "load-file",
                    reason: "load-file mode requires a one-case seed".to_string(),
                })?;
                if cases.len() != 1 {
                    return Err(DbError::InvalidModeInit {
                        mode: "load-file",
                        reason: format!(
                            "load-file mode requires exactly one seed case, got {}",
                            cases.len()
                        ),
                    });
                }
                let case = cases.remove(0);
                CaseSource::LoadFile {
                    folder: case.description,
                    omit_folder_name: false,
                }
            }
        };
        self.source = source;
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Manual mode
    // ------------------------------------------------------------------

    pub fn add_case(&mut self, case: ValueCase) -> Result<(), DbError> {
        let list = self.manual_mut()?;
        let index = list.len();
        list.insert_many(index, std::slice::from_ref(&case))?;
        self.emit(CasesChangeKind::Insert, index, 1);
        Ok(())
    }

    pub fn add_cases(&mut self, cases: &[ValueCase]) -> Result<(), DbError> {
        let list = self.manual_mut()?;
        let index = list.len();
        list.insert_many(index, cases)?;
        if !cases.is_empty() {
            self.emit(CasesChangeKind::Insert, index, cases.len());
        }
        Ok(())
    }

    pub fn insert_case(&mut self, index: usize, case: ValueCase) -> Result<(), DbError> {
        self.manual_mut()?
            .insert_many(index, std::slice::from_ref(&case))?;
        self.emit(CasesChangeKind::Insert, index, 1);
        Ok(())
    }

    pub fn insert_cases(&mut self, index: usize, cases: &[ValueCase]) -> Result<(), DbError> {
        self.manual_mut()?.insert_many(index, cases)?;
        if !cases.is_empty() {
            self.emit(CasesChangeKind::Insert, index, cases.len());
        }
        Ok(())
    }

    /// Replaces the case at `index`, returning the previous case.
    pub fn update_case(&mut self, index: usize, case: ValueCase) -> Result<ValueCase, DbError> {
        let old = self.manual_mut()?.update(index, case)?;
        self.emit(CasesChangeKind::Replace, index, 1);
        Ok(old)
    }

    pub fn remove_case(&mut self, index: usize) -> Result<ValueCase, DbError> {
        let mut removed = self.manual_mut()?.remove_many(index, 1)?;
        self.emit(CasesChangeKind::Remove, index, 1);
        Ok(removed.remove(0))
    }

    pub fn remove_cases(&mut self, index: usize, count: usize) -> Result<Vec<ValueCase>, DbError> {
        let removed = self.manual_mut()?.remove_many(index, count)?;
        if count > 0 {
            self.emit(CasesChangeKind::Remove, index, count);
        }
        Ok(removed)
    }

    pub fn clear_cases(&mut self) -> Result<(), DbError> {
        self.manual_mut()?.clear();
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Refer-database mode
    // ------------------------------------------------------------------

    pub fn database_kind(&self) -> Result<DatabaseKind, DbError> {
        let (kind, ..) = self.refer()?;
        Ok(kind)
    }

    pub fn set_database_kind(&mut self, new_kind: DatabaseKind) -> Result<(), DbError> {
        let (kind, ..) = self.refer_mut()?;
        *kind = new_kind;
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn referenced_type_id(&self) -> Result<u32, DbError> {
        let (_, type_id, ..) = self.refer()?;
        Ok(type_id)
    }

    pub fn set_referenced_type_id(&mut self, new_id: u32) -> Result<(), DbError> {
        let (_, type_id, ..) = self.refer_mut()?;
        *type_id = new_id;
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn use_additional_items(&self) -> Result<bool, DbError> {
        let (_, _, use_additional, _) = self.refer()?;
        Ok(use_additional)
    }

    pub fn set_use_additional_items(&mut self, flag: bool) -> Result<(), DbError> {
        let (_, _, use_additional, _) = self.refer_mut()?;
        *use_additional = flag;
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    /// Rewrites the label of one synthetic additional case. `case_number`
    /// must be one of the fixed sentinels (-1, -2, -3); anything else,
    /// including 0 and -4, is out of range.
    pub fn update_additional_case(
        &mut self,
        case_number: i32,
        description: impl Into<String>,
    ) -> Result<(), DbError> {
        let (_, _, _, additional) = self.refer_mut()?;
        let slot = additional_slot(case_number)?;
        additional[slot] = description.into();
        self.emit(CasesChangeKind::Replace, slot, 1);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Load-file mode
    // ------------------------------------------------------------------

    pub fn folder_name(&self) -> Result<&str, DbError> {
        match &self.source {
            CaseSource::LoadFile { folder, .. } => Ok(folder),
            other => Err(wrong_mode("load-file", other.mode())),
        }
    }

    pub fn set_folder_name(&mut self, name: impl Into<String>) -> Result<(), DbError> {
        match &mut self.source {
            CaseSource::LoadFile { folder, .. } => {
                *folder = name.into();
            }
            other => return Err(wrong_mode("load-file", other.mode())),
        }
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn omit_folder_name(&self) -> Result<bool, DbError> {
        match &self.source {
            CaseSource::LoadFile {
                omit_folder_name, ..
            } => Ok(*omit_folder_name),
            other => Err(wrong_mode("load-file", other.mode())),
        }
    }

    pub fn set_omit_folder_name(&mut self, flag: bool) -> Result<(), DbError> {
        match &mut self.source {
            CaseSource::LoadFile {
                omit_folder_name, ..
            } => {
                *omit_folder_name = flag;
            }
            other => return Err(wrong_mode("load-file", other.mode())),
        }
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Always available, never mutating, never notifying
    // ------------------------------------------------------------------

    /// Every case this descriptor currently exposes. Plain and load-file
    /// sources expose none; manual exposes its list; refer-database exposes
    /// the synthetic additional cases when the flag is set (the referenced
    /// database itself lives outside this subsystem).
    pub fn all_cases(&self) -> Vec<ValueCase> {
        match &self.source {
            CaseSource::Plain | CaseSource::LoadFile { .. } => Vec::new(),
            CaseSource::Manual(list) => list.cases().to_vec(),
            CaseSource::ReferDatabase {
                use_additional,
                additional,
                ..
            } => {
                if !use_additional {
                    return Vec::new();
                }
                ADDITIONAL_CASE_NUMBERS
                    .iter()
                    .zip(additional.iter())
                    .map(|(number, description)| ValueCase::new(*number, description.clone()))
                    .collect()
            }
        }
    }

    pub fn all_case_numbers(&self) -> Vec<i32> {
        self.all_cases().into_iter().map(|c| c.number).collect()
    }

    pub fn all_case_descriptions(&self) -> Vec<String> {
        self.all_cases().into_iter().map(|c| c.description).collect()
    }

    /// Drains the pending case-set changes, in emission order.
    pub fn take_cases_changes(&mut self) -> Vec<CasesChange> {
        self.changes.drain(..).collect()
    }

    // ------------------------------------------------------------------

    fn emit(&mut self, kind: CasesChangeKind, index: usize, count: usize) {
        self.changes.push_back(CasesChange { kind, index, count });
    }

    fn manual_mut(&mut self) -> Result<&mut CaseList, DbError> {
        match &mut self.source {
            CaseSource::Manual(list) => Ok(list),
            other => Err(wrong_mode("manual", other.mode())),
        }
    }

    fn refer(&self) -> Result<(DatabaseKind, u32, bool, &[String; 3]), DbError> {
        match &self.source {
            CaseSource::ReferDatabase {
                kind,
                type_id,
                use_additional,
                additional,
            } => Ok((*kind, *type_id, *use_additional, additional)),
            other => Err(wrong_mode("refer-database", other.mode())),
        }
    }

    fn refer_mut(
        &mut self,
    ) -> Result<(&mut DatabaseKind, &mut u32, &mut bool, &mut [String; 3]), DbError> {
        match &mut self.source {
            CaseSource::ReferDatabase {
                kind,
                type_id,
                use_additional,
                additional,
            } => Ok((kind, type_id, use_additional, additional)),
            other => Err(wrong_mode("refer-database", other.mode())),
        }
    }
}

fn wrong_mode(required: &'static str, actual: CaseSourceKind) -> DbError {
    DbError::InvalidModeOperation {
        required,
        actual: actual.name(),
    }
}

/// Maps an additional-case sentinel to its storage slot.
fn additional_slot(case_number: i32) -> Result<usize, DbError> {
    ADDITIONAL_CASE_NUMBERS
        .iter()
        .position(|n| *n == case_number)
        .ok_or(DbError::IndexOutOfRange {
            index: case_number as i64,
            len: ADDITIONAL_CASE_NUMBERS.len(),
        })
}

// ============================================================================
// ARGUMENT-LEVEL DESCRIPTOR
// ============================================================================

/// The three argument-level sourcing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgCaseSourceKind {
    Normal,
    Manual,
    ReferDatabase,
}

impl ArgCaseSourceKind {
    pub fn name(self) -> &'static str {
        match self {
            ArgCaseSourceKind::Normal => "normal",
            ArgCaseSourceKind::Manual => "manual",
            ArgCaseSourceKind::ReferDatabase => "refer-database",
        }
    }
}

impl fmt::Display for ArgCaseSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mode-specific state of an argument-level descriptor. No load-file mode
/// and no additional-items machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgCaseSource {
    Normal,
    Manual(CaseList),
    ReferDatabase { kind: DatabaseKind, type_id: u32 },
}

impl ArgCaseSource {
    pub fn mode(&self) -> ArgCaseSourceKind {
        match self {
            ArgCaseSource::Normal => ArgCaseSourceKind::Normal,
            ArgCaseSource::Manual(_) => ArgCaseSourceKind::Manual,
            ArgCaseSource::ReferDatabase { .. } => ArgCaseSourceKind::ReferDatabase,
        }
    }
}

impl Default for ArgCaseSource {
    fn default() -> Self {
        ArgCaseSource::Normal
    }
}

/// Narrower descriptor for event-command arguments.
#[derive(Debug, Clone, Default)]
pub struct ArgCaseDescriptor {
    source: ArgCaseSource,
    changes: VecDeque<CasesChange>,
}

impl From<ArgCaseSource> for ArgCaseDescriptor {
    fn from(source: ArgCaseSource) -> Self {
        ArgCaseDescriptor {
            source,
            changes: VecDeque::new(),
        }
    }
}

impl PartialEq for ArgCaseDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl ArgCaseDescriptor {
    pub fn new() -> Self {
        ArgCaseDescriptor::from(ArgCaseSource::Normal)
    }

    pub fn mode(&self) -> ArgCaseSourceKind {
        self.source.mode()
    }

    pub fn source(&self) -> &ArgCaseSource {
        &self.source
    }

    /// Atomically re-initializes for `mode`. Manual accepts a seed of any
    /// length (`None` means empty); normal and refer-database reject any
    /// seed.
    pub fn change_mode(
        &mut self,
        mode: ArgCaseSourceKind,
        seed: Option<Vec<ValueCase>>,
    ) -> Result<(), DbError> {
        let source = match mode {
            ArgCaseSourceKind::Normal => {
                if seed.is_some() {
                    return Err(DbError::InvalidModeInit {
                        mode: "normal",
                        reason: "normal mode does not take a seed case list".to_string(),
                    });
                }
                ArgCaseSource::Normal
            }
            ArgCaseSourceKind::Manual => {
                let list = match seed {
                    Some(cases) => CaseList::from_cases(cases)?,
                    None => CaseList::new(),
                };
                ArgCaseSource::Manual(list)
            }
            ArgCaseSourceKind::ReferDatabase => {
                if seed.is_some() {
                    return Err(DbError::InvalidModeInit {
                        mode: "refer-database",
                        reason: "refer-database mode does not take a seed case list".to_string(),
                    });
                }
                ArgCaseSource::ReferDatabase {
                    kind: DatabaseKind::Changeable,
                    type_id: 0,
                }
            }
        };
        self.source = source;
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn add_case(&mut self, case: ValueCase) -> Result<(), DbError> {
        let list = self.manual_mut()?;
        let index = list.len();
        list.insert_many(index, std::slice::from_ref(&case))?;
        self.emit(CasesChangeKind::Insert, index, 1);
        Ok(())
    }

    pub fn add_cases(&mut self, cases: &[ValueCase]) -> Result<(), DbError> {
        let list = self.manual_mut()?;
        let index = list.len();
        list.insert_many(index, cases)?;
        if !cases.is_empty() {
            self.emit(CasesChangeKind::Insert, index, cases.len());
        }
        Ok(())
    }

    pub fn insert_case(&mut self, index: usize, case: ValueCase) -> Result<(), DbError> {
        self.manual_mut()?
            .insert_many(index, std::slice::from_ref(&case))?;
        self.emit(CasesChangeKind::Insert, index, 1);
        Ok(())
    }

    pub fn insert_cases(&mut self, index: usize, cases: &[ValueCase]) -> Result<(), DbError> {
        self.manual_mut()?.insert_many(index, cases)?;
        if !cases.is_empty() {
            self.emit(CasesChangeKind::Insert, index, cases.len());
        }
        Ok(())
    }

    pub fn update_case(&mut self, index: usize, case: ValueCase) -> Result<ValueCase, DbError> {
        let old = self.manual_mut()?.update(index, case)?;
        self.emit(CasesChangeKind::Replace, index, 1);
        Ok(old)
    }

    pub fn remove_case(&mut self, index: usize) -> Result<ValueCase, DbError> {
        let mut removed = self.manual_mut()?.remove_many(index, 1)?;
        self.emit(CasesChangeKind::Remove, index, 1);
        Ok(removed.remove(0))
    }

    pub fn remove_cases(&mut self, index: usize, count: usize) -> Result<Vec<ValueCase>, DbError> {
        let removed = self.manual_mut()?.remove_many(index, count)?;
        if count > 0 {
            self.emit(CasesChangeKind::Remove, index, count);
        }
        Ok(removed)
    }

    pub fn clear_cases(&mut self) -> Result<(), DbError> {
        self.manual_mut()?.clear();
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn database_kind(&self) -> Result<DatabaseKind, DbError> {
        match &self.source {
            ArgCaseSource::ReferDatabase { kind, .. } => Ok(*kind),
            other => Err(arg_wrong_mode("refer-database", other.mode())),
        }
    }

    pub fn set_database_kind(&mut self, new_kind: DatabaseKind) -> Result<(), DbError> {
        match &mut self.source {
            ArgCaseSource::ReferDatabase { kind, .. } => {
                *kind = new_kind;
            }
            other => return Err(arg_wrong_mode("refer-database", other.mode())),
        }
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn referenced_type_id(&self) -> Result<u32, DbError> {
        match &self.source {
            ArgCaseSource::ReferDatabase { type_id, .. } => Ok(*type_id),
            other => Err(arg_wrong_mode("refer-database", other.mode())),
        }
    }

    pub fn set_referenced_type_id(&mut self, new_id: u32) -> Result<(), DbError> {
        match &mut self.source {
            ArgCaseSource::ReferDatabase { type_id, .. } => {
                *type_id = new_id;
            }
            other => return Err(arg_wrong_mode("refer-database", other.mode())),
        }
        self.emit(CasesChangeKind::Reset, 0, 0);
        Ok(())
    }

    pub fn all_cases(&self) -> Vec<ValueCase> {
        match &self.source {
            ArgCaseSource::Manual(list) => list.cases().to_vec(),
            ArgCaseSource::Normal | ArgCaseSource::ReferDatabase { .. } => Vec::new(),
        }
    }

    pub fn all_case_numbers(&self) -> Vec<i32> {
        self.all_cases().into_iter().map(|c| c.number).collect()
    }

    pub fn all_case_descriptions(&self) -> Vec<String> {
        self.all_cases().into_iter().map(|c| c.description).collect()
    }

    pub fn take_cases_changes(&mut self) -> Vec<CasesChange> {
        self.changes.drain(..).collect()
    }

    fn emit(&mut self, kind: CasesChangeKind, index: usize, count: usize) {
        self.changes.push_back(CasesChange { kind, index, count });
    }

    fn manual_mut(&mut self) -> Result<&mut CaseList, DbError> {
        match &mut self.source {
            ArgCaseSource::Manual(list) => Ok(list),
            other => Err(arg_wrong_mode("manual", other.mode())),
        }
    }
}

fn arg_wrong_mode(required: &'static str, actual: ArgCaseSourceKind) -> DbError {
    DbError::InvalidModeOperation {
        required,
        actual: actual.name(),
    }
}
