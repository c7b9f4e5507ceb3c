//! Per-unit bookkeeping of package references.
//!
//! Each rewrite is decided locally, but the import list is declared once per
//! unit. The ledger collects what the rewrites did so the import list can be
//! edited to match once every call site in the unit has been processed.

use crate::constants::{FORMAT_PACKAGE, NUMERIC_PACKAGE};

/// Import edits a unit needs after its rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportDelta {
    pub remove_original_facility_reference: bool,
    pub add_numeric_library_reference: bool,
}

impl ImportDelta {
    pub fn is_empty(&self) -> bool {
        !self.remove_original_facility_reference && !self.add_numeric_library_reference
    }

    /// Edits a declared import list in place. Entries the delta does not
    /// name keep their order; an added package goes to its sorted position.
    pub fn apply(&self, imports: &mut Vec<String>) {
        if self.is_empty() {
            return;
        }
        if self.remove_original_facility_reference {
            imports.retain(|import| import != FORMAT_PACKAGE);
        }
        if self.add_numeric_library_reference && !imports.iter().any(|i| i == NUMERIC_PACKAGE) {
            let at = imports.partition_point(|import| import.as_str() < NUMERIC_PACKAGE);
            imports.insert(at, NUMERIC_PACKAGE.to_owned());
        }
    }
}

/// Reference counts for one translation unit.
///
/// Owned by whoever processes the unit; every update goes through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    remaining_uses: usize,
    declares_original: bool,
    declares_numeric: bool,
    introduced_numeric: bool,
}

impl Ledger {
    /// Starts a ledger for a unit declaring `imports`.
    pub fn new<S: AsRef<str>>(imports: &[S]) -> Self {
        let declares = |package: &str| imports.iter().any(|import| import.as_ref() == package);
        Self {
            remaining_uses: 0,
            declares_original: declares(FORMAT_PACKAGE),
            declares_numeric: declares(NUMERIC_PACKAGE),
            introduced_numeric: false,
        }
    }

    /// Records one reference to the formatting package, rewritable or not.
    pub fn on_formatting_call_seen(&mut self) {
        self.remaining_uses += 1;
    }

    /// Records a successful rewrite of a reference previously seen.
    ///
    /// A rewrite with no matching reference leaves the count at zero.
    pub fn on_rewrite_succeeded(&mut self, introduced_numeric_dependency: bool) {
        self.remaining_uses = self.remaining_uses.saturating_sub(1);
        self.introduced_numeric |= introduced_numeric_dependency;
    }

    pub fn remaining_uses(&self) -> usize {
        self.remaining_uses
    }

    pub fn finalize(&self) -> ImportDelta {
        ImportDelta {
            remove_original_facility_reference: self.declares_original && self.remaining_uses == 0,
            add_numeric_library_reference: self.introduced_numeric && !self.declares_numeric,
        }
    }
}
