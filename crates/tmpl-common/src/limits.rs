//! Centralized limits for the backend strategy layer.
//!
//! The IR is assumed well formed, but type definitions come from user code and
//! may contain cycles that the checker tolerated. Recursive walks over them
//! are bounded here.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of upper-bound hops followed when choosing a zero value for
/// a type formal.
///
/// A formal `<T extends U>` where `U` is itself a formal bounded by `T` would
/// otherwise loop forever. Past this depth the type is treated as having no
/// natural default.
pub const MAX_UPPER_BOUND_DEPTH: u32 = 32;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Initial capacity for a module's top-level list.
pub const TOP_LEVELS_INITIAL_CAPACITY: usize = 16;

/// Inline capacity for short statement runs before spilling to the heap.
pub const INLINE_STMTS: usize = 4;
