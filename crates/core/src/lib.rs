//! Generator for the accessibility role header.
//!
//! Reads `const unsigned long ROLE_<NAME> = <N>;` declarations from an IDL
//! file and writes a C++ header declaring the matching `enum Role`, plus a
//! `LAST_ROLE` sentinel aliasing the final entry. The IDL stays the single
//! source of truth; the header is rebuilt from it on every run.
//!
//! The main entry points are [`generate`] for streaming into any writer and
//! [`render_file`] + [`write_if_changed`] for publishing to disk.

/// Typed errors for generation runs.
pub mod error;
/// Header text emission.
pub mod header;
/// Names surrounding the generated enum.
pub mod layout;
/// Atomic output files and drift checks.
pub mod output;
/// Declaration scanning and the role table.
pub mod scan;

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

pub use error::GenError;
pub use header::{render_header, write_header};
pub use layout::{Layout, LayoutError, load_layout_from_str};
pub use output::{Freshness, WriteOutcome, check_up_to_date, write_if_changed};
pub use scan::{DeclarationScanner, RoleEntry, RoleTable, scan_declarations};

/// Input path used when no other is given, relative to the source root.
pub const DEFAULT_INPUT: &str = "accessible/interfaces/nsIAccessibleRole.idl";

/// Generate the role header from `input_path` into `out` using the default
/// layout.
pub fn generate<W: Write + ?Sized>(out: &mut W, input_path: &Path) -> Result<(), GenError> {
    generate_with_layout(out, input_path, &Layout::default())
}

/// Generate a header from `input_path` into `out` using `layout`.
///
/// The source is fully scanned and checked before the first byte is written,
/// so an empty or inconsistent source leaves `out` untouched.
pub fn generate_with_layout<W: Write + ?Sized>(
    out: &mut W,
    input_path: &Path,
    layout: &Layout,
) -> Result<(), GenError> {
    let table = load_table(input_path, layout)?;
    write_header(out, &table, layout).map_err(GenError::Write)
}

/// Generate the header for `input_path` as a string.
pub fn render_file(input_path: &Path, layout: &Layout) -> Result<String, GenError> {
    let table = load_table(input_path, layout)?;
    Ok(render_header(&table, layout))
}

/// Read and scan `input_path` into a checked [`RoleTable`].
pub fn load_table(input_path: &Path, layout: &Layout) -> Result<RoleTable, GenError> {
    layout.validate()?;
    let text = fs::read_to_string(input_path).map_err(|source| GenError::ReadSource {
        path: input_path.to_path_buf(),
        source,
    })?;
    debug!(path = %input_path.display(), bytes = text.len(), "read IDL source");
    RoleTable::from_source(&text, &layout.prefix, &input_path.display().to_string())
}
