//! Header rendering.
//!
//! Output is byte-stable: the same table and layout always produce the same
//! text, which is what lets build systems and drift checks compare files.

use std::io::{self, Write};

use crate::layout::Layout;
use crate::scan::RoleTable;

/// Write the complete header for `table` to `out`, in order.
///
/// Nothing is read back from `out`; a failed write leaves whatever was
/// already written in place.
pub fn write_header<W: Write + ?Sized>(
    out: &mut W,
    table: &RoleTable,
    layout: &Layout,
) -> io::Result<()> {
    writeln!(out, "/* THIS FILE IS AUTOGENERATED - DO NOT EDIT */")?;
    writeln!(
        out,
        "/* {} are defined in {} */",
        layout.subject, layout.defined_in
    )?;
    writeln!(out)?;

    writeln!(out, "#ifndef {}", layout.guard)?;
    writeln!(out, "#define {}", layout.guard)?;
    writeln!(out)?;

    for ns in &layout.namespaces {
        writeln!(out, "namespace {ns} {{")?;
    }
    writeln!(out)?;

    writeln!(out, "enum {} {{", layout.enum_name)?;
    for entry in table.entries() {
        writeln!(out, "  {} = {},", entry.name, entry.value)?;
    }
    writeln!(out, "  {} = {}", layout.sentinel, table.last().name)?;
    writeln!(out, "}};")?;
    writeln!(out)?;

    // The typedef sits between the innermost namespace and its parents.
    let (inner, outer) = match layout.namespaces.split_last() {
        Some((inner, outer)) => (Some(inner), outer),
        None => (None, &[][..]),
    };
    if let Some(inner) = inner {
        writeln!(out, "}}  // namespace {inner}")?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "typedef enum {} {};",
        layout.qualified_enum(),
        layout.alias
    )?;
    writeln!(out)?;
    for ns in outer.iter().rev() {
        writeln!(out, "}}  // namespace {ns}")?;
    }
    if !outer.is_empty() {
        writeln!(out)?;
    }

    writeln!(out, "#endif")?;
    out.flush()
}

/// Render the header into a `String`.
pub fn render_header(table: &RoleTable, layout: &Layout) -> String {
    let mut buf = Vec::new();
    write_header(&mut buf, table, layout).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("header is assembled from UTF-8 strings")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> RoleTable {
        RoleTable::from_source(text, "ROLE_", "test.idl").unwrap()
    }

    #[test]
    fn enum_body_lists_entries_then_sentinel() {
        let out = render_header(
            &table("const unsigned long ROLE_NOTHING = 0;\nconst unsigned long ROLE_TITLEBAR = 1;\n"),
            &Layout::default(),
        );
        assert!(out.contains(
            "enum Role {\n  NOTHING = 0,\n  TITLEBAR = 1,\n  LAST_ROLE = TITLEBAR\n};\n"
        ));
    }

    #[test]
    fn sentinel_has_no_trailing_comma() {
        let out = render_header(
            &table("const unsigned long ROLE_SOLO = 42;"),
            &Layout::default(),
        );
        assert!(out.contains("  SOLO = 42,\n  LAST_ROLE = SOLO\n};"));
    }

    #[test]
    fn values_are_copied_verbatim() {
        let out = render_header(
            &table("const unsigned long ROLE_PADDED = 007;"),
            &Layout::default(),
        );
        assert!(out.contains("  PADDED = 007,\n"));
    }

    #[test]
    fn single_namespace_layout() {
        let layout = Layout {
            namespaces: vec!["roles".into()],
            ..Default::default()
        };
        let out = render_header(&table("const unsigned long ROLE_A = 1;"), &layout);
        assert!(out.ends_with(
            "};\n\n}  // namespace roles\n\ntypedef enum roles::Role role;\n\n#endif\n"
        ));
    }

    #[test]
    fn custom_names_flow_through() {
        let layout = Layout {
            subject: "States".into(),
            defined_in: "states.idl".into(),
            guard: "_state_h_".into(),
            namespaces: vec!["app".into(), "states".into()],
            enum_name: "State".into(),
            sentinel: "LAST_STATE".into(),
            alias: "state".into(),
            ..Default::default()
        };
        let out = render_header(&table("const unsigned long ROLE_BUSY = 3;"), &layout);
        assert!(out.starts_with(
            "/* THIS FILE IS AUTOGENERATED - DO NOT EDIT */\n/* States are defined in states.idl */\n\n#ifndef _state_h_\n#define _state_h_\n\nnamespace app {\nnamespace states {\n\nenum State {\n"
        ));
        assert!(out.contains("  LAST_STATE = BUSY\n"));
        assert!(out.contains("typedef enum app::states::State state;\n\n}  // namespace app\n\n#endif\n"));
    }
}
