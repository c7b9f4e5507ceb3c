//! Well-known method sets a type may implement.
//!
//! A type has a capability when its method set contains the capability's
//! method with exactly the expected signature.

use crate::typeinfo::TypeDescriptor;
use crate::types::Capability;

struct CatalogEntry {
    capability: Capability,
    signature: &'static str,
}

/// Read-only table of the built-in capabilities.
pub struct CapabilityCatalog {
    entries: &'static [CatalogEntry],
}

/// The catalog shared by every resolution.
pub static CATALOG: CapabilityCatalog = CapabilityCatalog {
    entries: &[
        CatalogEntry {
            capability: Capability::Display,
            signature: "func() string",
        },
        CatalogEntry {
            capability: Capability::Error,
            signature: "func() string",
        },
    ],
};

impl CapabilityCatalog {
    pub fn has_capability(&self, ty: &TypeDescriptor, capability: Capability) -> bool {
        self.entries
            .iter()
            .filter(|entry| entry.capability == capability)
            .any(|entry| ty.has_method(capability.method_name(), entry.signature))
    }
}

/// Shorthand for [`CATALOG`]`.has_capability`.
#[inline]
pub fn has_capability(ty: &TypeDescriptor, capability: Capability) -> bool {
    CATALOG.has_capability(ty, capability)
}
