//! Shared constants for the layout engine
//!
//! This module centralizes the fixed numbers every consumer of a template
//! (interactive canvas, full-page preview, print) has to agree on.

// =============================================================================
// Render Scale
// =============================================================================

/// Pixels per millimeter at zoom 1. Shared by every render consumer so the
/// editor canvas, the full-page preview and the printed page line up.
pub const BASE_SCALE: f32 = 2.0;

/// Zoom of the interactive canvas and of print output
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Smallest zoom accepted by the editor
pub const MIN_ZOOM: f32 = 0.25;

/// Largest zoom accepted by the editor
pub const MAX_ZOOM: f32 = 8.0;

/// Granularity displayed and snapped positions are rounded to (mm)
pub const POSITION_STEP_MM: f32 = 0.5;

// =============================================================================
// Field Geometry
// =============================================================================

/// Distance kept free between a field origin and the right/bottom page edges (mm)
pub const EDGE_MARGIN_MM: f32 = 10.0;

/// Narrowest wrap width a resize can produce (mm)
pub const MIN_FIELD_WIDTH_MM: f32 = 20.0;

/// Wrap width assumed when a resizable field has none yet (mm)
pub const DEFAULT_FIELD_WIDTH_MM: f32 = 80.0;

/// Distance below which a dragged field snaps to another field's edge (mm)
pub const SNAP_THRESHOLD_MM: f32 = 1.5;

// =============================================================================
// Background
// =============================================================================

/// Smallest background scale (percent)
pub const MIN_BACKGROUND_SCALE: f32 = 50.0;

/// Largest background scale (percent)
pub const MAX_BACKGROUND_SCALE: f32 = 150.0;

// =============================================================================
// Print
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
