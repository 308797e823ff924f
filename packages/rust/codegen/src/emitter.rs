//! Rust source emission for normalized icons.
//!
//! Output is a module tree wrapping one `pub const` per icon. Every string
//! goes through `Debug` formatting, which yields a valid Rust string literal
//! for any input, so attribute values and markup never break the syntax.

use std::borrow::Cow;

use iconforge_shared::{
    ContainerIdentity, Diagnostic, DiagnosticCode, IconRecord, RESERVED_WORDS, is_identifier,
};
use tracing::{debug, instrument};

use crate::writer::SourceWriter;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by iconforge. Do not edit by hand.";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Options for source emission.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Path of the support type, e.g. `crate::icon::Icon`.
    pub icon_type: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            icon_type: "crate::icon::Icon".into(),
        }
    }
}

/// Outcome of [`emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// No records: nothing should be written.
    Empty(Diagnostic),
    /// Generated source and the records it declares, in order.
    Source {
        text: String,
        icons: Vec<IconRecord>,
        /// Warnings about identifiers that had to be sanitized.
        diagnostics: Vec<Diagnostic>,
    },
}

impl Emission {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Emit Rust source declaring every record inside `container`.
///
/// Records are written in the order given. Identical input always produces
/// byte-identical output. Duplicate identifiers are all emitted; resolving
/// the collision is left to the compiler of the consuming crate.
#[instrument(skip_all, fields(container = %container, icons = records.len()))]
pub fn emit(
    records: Vec<IconRecord>,
    container: &ContainerIdentity,
    opts: &EmitOptions,
) -> Emission {
    if records.is_empty() {
        return Emission::Empty(Diagnostic::new(
            DiagnosticCode::NoIconsFound,
            format!("no icons found for `{container}`"),
        ));
    }

    let type_name = opts
        .icon_type
        .rsplit("::")
        .next()
        .unwrap_or(opts.icon_type.as_str());
    let namespace = container.namespace_segments();
    let mut diagnostics = Vec::new();
    let mut w = SourceWriter::new();

    w.line(GENERATED_HEADER);
    w.blank();

    for segment in &namespace {
        w.line(&format!("pub mod {segment} {{"));
        w.indent();
    }

    w.line("#[allow(non_upper_case_globals)]");
    w.line(&format!("pub mod {} {{", container.name));
    w.indent();

    if opts.icon_type.contains("::") {
        w.line(&format!("use {};", opts.icon_type));
        w.blank();
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            w.blank();
        }

        let ident = rust_identifier(&record.identifier);
        if let Cow::Owned(sanitized) = &ident {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::InvalidIdentifier,
                    format!(
                        "identifier `{}` derived from `{}` is not a valid Rust identifier; emitted as `{sanitized}`",
                        record.identifier, record.name
                    ),
                )
                .with_path(record.name.clone()),
            );
        }

        write_icon(&mut w, &ident, type_name, record);
    }

    w.dedent();
    w.line("}");

    for _ in &namespace {
        w.dedent();
        w.line("}");
    }

    let text = w.finish();
    debug!(bytes = text.len(), sanitized = diagnostics.len(), "emitted source");

    Emission::Source {
        text,
        icons: records,
        diagnostics,
    }
}

fn write_icon(w: &mut SourceWriter, ident: &str, type_name: &str, record: &IconRecord) {
    w.line(&format!("pub const {ident}: {type_name} = {type_name} {{"));
    w.indent();
    w.line(&format!("name: {:?},", record.name));

    if record.attributes.is_empty() {
        w.line("attributes: &[],");
    } else {
        w.line("attributes: &[");
        w.indent();
        for (key, value) in &record.attributes {
            w.line(&format!("({key:?}, {value:?}),"));
        }
        w.dedent();
        w.line("],");
    }

    w.line(&format!("inner: {:?},", record.inner));
    w.dedent();
    w.line("};");
}

/// Map a derived identifier onto a name usable for a Rust `const`.
///
/// Valid identifiers are returned untouched. Otherwise characters outside
/// `[A-Za-z0-9_]` become `_`, a leading digit or empty result gets a `_`
/// prefix, and reserved words get a `_` suffix.
pub fn rust_identifier(identifier: &str) -> Cow<'_, str> {
    if is_identifier(identifier) {
        return Cow::Borrowed(identifier);
    }

    let mut sanitized: String = identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    if sanitized == "_" || RESERVED_WORDS.contains(&sanitized.as_str()) {
        sanitized.push('_');
    }

    Cow::Owned(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconforge_shared::AttributeMap;

    fn record(identifier: &str, name: &str, attrs: &[(&str, &str)], inner: &str) -> IconRecord {
        IconRecord {
            identifier: identifier.into(),
            name: name.into(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<AttributeMap>(),
            inner: inner.into(),
        }
    }

    fn home() -> IconRecord {
        record(
            "IconHome",
            "icon-home",
            &[("width", "24"), ("height", "24"), ("viewBox", "0 0 24 24")],
            r#"<circle cx="12" cy="12" r="10" />"#,
        )
    }

    fn source(emission: Emission) -> (String, Vec<IconRecord>, Vec<Diagnostic>) {
        match emission {
            Emission::Source {
                text,
                icons,
                diagnostics,
            } => (text, icons, diagnostics),
            Emission::Empty(d) => panic!("unexpected empty emission: {d}"),
        }
    }

    #[test]
    fn empty_records_signal_empty() {
        let container = ContainerIdentity::new(None, "icons");
        let emission = emit(Vec::new(), &container, &EmitOptions::default());
        match emission {
            Emission::Empty(diag) => {
                assert_eq!(diag.code, DiagnosticCode::NoIconsFound);
                assert!(diag.message.contains("icons"));
            }
            other => panic!("expected empty, got {other:?}"),
        }
    }

    #[test]
    fn single_icon_exact_output() {
        let container = ContainerIdentity::new(None, "icons");
        let (text, icons, diagnostics) =
            source(emit(vec![home()], &container, &EmitOptions::default()));

        let expected = r#"// @generated by iconforge. Do not edit by hand.

#[allow(non_upper_case_globals)]
pub mod icons {
    use crate::icon::Icon;

    pub const IconHome: Icon = Icon {
        name: "icon-home",
        attributes: &[
            ("width", "24"),
            ("height", "24"),
            ("viewBox", "0 0 24 24"),
        ],
        inner: "<circle cx=\"12\" cy=\"12\" r=\"10\" />",
    };
}
"#;
        assert_eq!(text, expected);
        assert_eq!(icons, vec![home()]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn namespace_segments_nest_modules() {
        let container = ContainerIdentity::new(Some("ui::widgets".into()), "lucide");
        let opts = EmitOptions {
            icon_type: "icons_support::Icon".into(),
        };
        let (text, _, _) = source(emit(
            vec![record("X", "x", &[], "")],
            &container,
            &opts,
        ));

        let expected = r#"// @generated by iconforge. Do not edit by hand.

pub mod ui {
    pub mod widgets {
        #[allow(non_upper_case_globals)]
        pub mod lucide {
            use icons_support::Icon;

            pub const X: Icon = Icon {
                name: "x",
                attributes: &[],
                inner: "",
            };
        }
    }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn bare_type_name_skips_use() {
        let container = ContainerIdentity::new(None, "icons");
        let opts = EmitOptions {
            icon_type: "SvgIcon".into(),
        };
        let (text, _, _) = source(emit(vec![home()], &container, &opts));
        assert!(!text.contains("use "));
        assert!(text.contains("pub const IconHome: SvgIcon = SvgIcon {"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let container = ContainerIdentity::new(None, "icons");
        let tricky = record(
            "Tricky",
            "tricky",
            &[("data-test", "value with \"quotes\" and \\ back\nslash")],
            "<text>line1\nline2\t\"q\"</text>",
        );
        let (text, _, _) = source(emit(vec![tricky], &container, &EmitOptions::default()));

        assert!(text.contains(r#"("data-test", "value with \"quotes\" and \\ back\nslash"),"#));
        assert!(text.contains(r#"inner: "<text>line1\nline2\t\"q\"</text>","#));
        // One physical line per field: escapes kept newlines out of the output.
        assert!(text.lines().any(|l| l.trim_start().starts_with("inner: \"<text>line1")));
    }

    #[test]
    fn duplicate_identifiers_all_emitted() {
        let container = ContainerIdentity::new(None, "icons");
        let a = record("IconHome", "icon-home", &[], "<a />");
        let b = record("IconHome", "icon--home", &[], "<b />");
        let (text, icons, _) = source(emit(vec![a, b], &container, &EmitOptions::default()));

        assert_eq!(icons.len(), 2);
        assert_eq!(text.matches("pub const IconHome: Icon").count(), 2);
        assert_eq!(text.matches('{').count(), text.matches('}').count());
    }

    #[test]
    fn records_keep_input_order() {
        let container = ContainerIdentity::new(None, "icons");
        let records = vec![
            record("Zeta", "zeta", &[], ""),
            record("Alpha", "alpha", &[], ""),
        ];
        let (text, _, _) = source(emit(records, &container, &EmitOptions::default()));
        assert!(text.find("Zeta").unwrap() < text.find("Alpha").unwrap());
    }

    #[test]
    fn emission_is_deterministic() {
        let container = ContainerIdentity::new(Some("ui".into()), "icons");
        let records = vec![home(), record("Other", "other", &[("a", "b")], "<x />")];
        let first = emit(records.clone(), &container, &EmitOptions::default());
        let second = emit(records, &container, &EmitOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_identifiers_sanitized_with_warning() {
        let container = ContainerIdentity::new(None, "icons");
        let records = vec![
            record("3dBox", "3d-box", &[], ""),
            record("Icon.large", "icon.large", &[], ""),
        ];
        let (text, _, diagnostics) =
            source(emit(records, &container, &EmitOptions::default()));

        assert!(text.contains("pub const _3dBox: Icon"));
        assert!(text.contains("pub const Icon_large: Icon"));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.code == DiagnosticCode::InvalidIdentifier));
    }

    #[test]
    fn rust_identifier_rules() {
        assert_eq!(rust_identifier("IconHome"), "IconHome");
        assert!(matches!(rust_identifier("IconHome"), Cow::Borrowed(_)));
        assert_eq!(rust_identifier(""), "__");
        assert_eq!(rust_identifier("_"), "__");
        assert_eq!(rust_identifier("3d"), "_3d");
        assert_eq!(rust_identifier("Self"), "Self_");
        assert_eq!(rust_identifier("a-b c"), "a_b_c");
        assert_eq!(rust_identifier("Straße"), "Stra_e");
    }
}
