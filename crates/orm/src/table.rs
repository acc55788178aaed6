use crate::Record;

/// Resolves the table name for a record type.
///
/// An explicit declaration anywhere in the type's declaration chain wins,
/// most-derived first; otherwise the name derives from the type's simple
/// name via [`derived_table_name`]. Resolution is idempotent and never
/// fails.
#[must_use]
pub fn table_name<R: Record>() -> String {
    for declared in R::table_name_chain() {
        if let Some(name) = declared {
            return name.to_owned();
        }
    }
    derived_table_name(simple_type_name(std::any::type_name::<R>()))
}

/// Derives a default table name from a simple type name.
///
/// The rule is deliberately literal: lowercase the first character when it
/// is an ASCII uppercase letter, leave everything else untouched. So
/// `Player` becomes `player`, `HTTPRequest` becomes `hTTPRequest`, and
/// `TOEFL` becomes `tOEFL`. No Unicode case mapping is applied.
#[must_use]
pub fn derived_table_name(type_name: &str) -> String {
    let mut name = type_name.to_owned();
    if let Some(head) = name.get_mut(..1) {
        head.make_ascii_lowercase();
    }
    name
}

/// Strips enclosing module qualifiers and generic arguments from a full type
/// path, leaving the innermost name.
fn simple_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}
