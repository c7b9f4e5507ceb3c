//! Resource limits, capacity hints and facility names used by the rewriter.
//!
//! Everything the engine treats as configuration lives here as a constant.

// ============================================================================
// Resource Limits
// ============================================================================

/// Maximum length of a template in bytes.
///
/// Longer templates are left untouched instead of being rewritten into a huge
/// concatenation.
pub const MAX_TEMPLATE_LEN: usize = 10_000;

/// Maximum number of segments (literals and placeholders) in one template.
pub const MAX_SEGMENTS: usize = 256;

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity hint for the segment vector.
///
/// Most templates have 2-4 segments, so this avoids initial reallocations.
pub const SEGMENTS_INITIAL_CAPACITY: usize = 4;

// ============================================================================
// Facility Names
// ============================================================================

/// Package providing the formatting call being replaced.
pub const FORMAT_PACKAGE: &str = "fmt";

/// Function of [`FORMAT_PACKAGE`] whose calls are rewritten.
pub const FORMAT_FUNCTION: &str = "Sprintf";

/// Package supplying integer and float conversions in rewritten code.
pub const NUMERIC_PACKAGE: &str = "strconv";

/// Radix passed to `strconv.FormatInt` and `strconv.FormatUint`.
pub const DECIMAL_BASE: u32 = 10;

/// Bit size passed to `strconv.FormatFloat`.
pub const FLOAT_BIT_SIZE: u32 = 64;
