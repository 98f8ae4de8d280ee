//! End-to-end generation tests.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use protofwd_codegen::{
    Features, GenerateError, GenerateOutput, GeneratedFile, Generator, Options, Severity,
};
use protofwd_core::{CompilerVersion, Overwrite, Version};
use protofwd_descriptor::{DescriptorSet, GoImportPath, GoPackageName, ImportEdge, SchemaFile};

/// a.proto publicly imports b.proto, which publicly imports c.proto.
const FORWARD_CHAIN: &str = r#"
compiler_version = "3.21.12"

[[file]]
path = "a.proto"
go_package = "example.com/pkga"

[[file.imports]]
path = "b.proto"
public = true

[[file]]
path = "b.proto"
go_package = "example.com/pkgb"
messages = ["Widget"]

[[file.imports]]
path = "c.proto"
public = true

[[file.enums]]
name = "Color"
values = [{ name = "RED", number = 0 }, { name = "GREEN", number = 1 }]

[[file]]
path = "c.proto"
go_package = "example.com/pkgc"
messages = ["Gadget"]
"#;

fn options() -> Options {
    Options {
        tool_version: "0.1.0".to_string(),
        ..Options::default()
    }
}

fn schema(path: &str, package: &str) -> SchemaFile {
    SchemaFile::new(
        path,
        GoImportPath::new(format!("example.com/{}", package)),
        GoPackageName::new(package),
    )
}

fn run(set: DescriptorSet) -> GenerateOutput {
    Generator::new(set, options())
        .run()
        .unwrap_or_else(|e| panic!("generation failed: {}", e))
}

fn content<'a>(output: &'a GenerateOutput, filename: &str) -> &'a str {
    output
        .file(filename)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated", filename))
}

fn forward_chain() -> DescriptorSet {
    DescriptorSet::from_str(FORWARD_CHAIN).expect("Failed to parse descriptor set")
}

#[test]
fn test_forward_chain_snapshots() {
    let output = run(forward_chain());

    let names: Vec<&str> = output.files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["a.generated.go", "b.generated.go", "c.generated.go"]
    );

    insta::assert_snapshot!("forward_chain_a", content(&output, "a.generated.go"));
    insta::assert_snapshot!("forward_chain_b", content(&output, "b.generated.go"));
    insta::assert_snapshot!("forward_chain_c", content(&output, "c.generated.go"));
}

#[test]
fn test_forwarding_does_not_chain() {
    let output = run(forward_chain());
    let a = content(&output, "a.generated.go");

    // Gadget reaches b through a forward of its own; a only aliases b's declarations.
    assert!(!a.contains("Gadget"));
    assert!(!a.contains("example.com/pkgc"));
    assert!(content(&output, "b.generated.go").contains("type Gadget = pkgc.Gadget\n"));
}

#[test]
fn test_exported_type_forwarded_unexported_value_not() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb"));

    let output = Generator::new(set, options())
        .with_body(|g: &mut GeneratedFile, file: &SchemaFile| {
            if file.path == "b.proto" {
                g.line("type Widget struct{}").blank();
                g.line("var internalCounter = 0").blank();
            }
        })
        .run()
        .unwrap();

    let a = content(&output, "a.generated.go");
    assert!(a.contains(
        "// Symbols defined in public import of b.proto.\n\ntype Widget = pkgb.Widget\n"
    ));
    assert!(!a.contains("internalCounter"));
    assert!(a.contains("\tpkgb \"example.com/pkgb\"\n"));
}

#[test]
fn test_multi_name_value_specs() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb").dependency_only());

    let output = Generator::new(set, options())
        .with_body(|g: &mut GeneratedFile, file: &SchemaFile| {
            if file.path == "b.proto" {
                g.line("var First, second, Third = 1, 2, other.Third");
                g.line("var Fourth int");
                g.line("const (").indent();
                g.line("KindA Kind = iota");
                g.line("KindB");
                g.dedent().line(")");
                g.line("func Helper() int { return 1 }");
            }
        })
        .run()
        .unwrap();

    assert_eq!(output.files.len(), 1);
    let a = content(&output, "a.generated.go");
    let forwarded: Vec<&str> = a
        .lines()
        .skip_while(|l| !l.starts_with("// Symbols defined in public import"))
        .skip(2)
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(
        forwarded,
        vec![
            "var First = pkgb.First",
            "var Fourth = pkgb.Fourth",
            "const KindA = pkgb.KindA",
            "const KindB = pkgb.KindB",
        ]
    );
}

#[test]
fn test_generation_is_idempotent() {
    let first = run(forward_chain());
    let second = run(forward_chain());
    assert_eq!(first.files, second.files);
}

#[test]
fn test_import_rules() {
    let set = DescriptorSet::new()
        .with_file(
            schema("a.proto", "pkga")
                .with_import(ImportEdge::new("d.proto"))
                .with_import(ImportEdge::weak("w.proto"))
                .with_import(ImportEdge::public("a_extra.proto"))
                .with_import(ImportEdge::new("missing.proto")),
        )
        .with_file(schema("d.proto", "pkgd").dependency_only())
        .with_file(schema("w.proto", "pkgw").dependency_only())
        .with_file(
            SchemaFile::new(
                "a_extra.proto",
                GoImportPath::new("example.com/pkga"),
                GoPackageName::new("pkga"),
            )
            .with_message("Extra")
            .dependency_only(),
        );

    let output = run(set);
    let a = content(&output, "a.generated.go");

    // Normal imports are kept even when nothing references them
    assert!(a.contains("\t_ \"example.com/pkgd\"\n"));
    // Weak imports produce no import line
    assert!(!a.contains("example.com/pkgw"));
    // Same Go package: no import and no forwarding
    assert!(!a.contains("public import of a_extra.proto"));
    assert!(!a.contains("Extra"));

    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.location.as_deref(), Some("a.proto"));
    assert!(diagnostic.message.contains("missing.proto"));
    assert!(output.has_warnings());
}

#[test]
fn test_missing_dependency_reported_once() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb").with_import(ImportEdge::new("gone.proto")));

    let output = run(set);
    // b.proto is probed while generating a.proto; only its own run reports.
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].location.as_deref(), Some("b.proto"));
}

#[test]
fn test_version_markers_toggle() {
    let set = forward_chain();
    let options = Options {
        generate_version_markers: false,
        ..options()
    };
    let output = Generator::new(set, options).run().unwrap();
    let a = content(&output, "a.generated.go");

    assert!(!a.contains("// versions:"));
    assert!(!a.contains("EnforceVersion"));
    insta::assert_snapshot!("without_version_markers", a);
}

/// Remove the version comment, the protoimpl import and the assertion block.
fn strip_version_markers(text: &str) -> String {
    let mut kept = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        if line == "// versions:"
            || line.starts_with("// \t")
            || line.ends_with("\"google.golang.org/protobuf/runtime/protoimpl\"")
        {
            continue;
        }
        if line == "const (" && lines.peek().is_some_and(|next| next.contains("Verify that")) {
            for inner in lines.by_ref() {
                if inner == ")" {
                    break;
                }
            }
            if lines.peek() == Some(&"") {
                lines.next();
            }
            continue;
        }
        kept.push(line);
    }

    kept.join("\n") + "\n"
}

#[test]
fn test_version_markers_change_nothing_else() {
    let with_markers = run(forward_chain());
    let without_markers = Generator::new(
        forward_chain(),
        Options {
            generate_version_markers: false,
            ..options()
        },
    )
    .run()
    .unwrap();

    assert_eq!(with_markers.files.len(), without_markers.files.len());
    for (on, off) in with_markers.files.iter().zip(&without_markers.files) {
        assert_eq!(on.filename, off.filename);
        assert_ne!(on.content, off.content);
        assert_eq!(strip_version_markers(&on.content), off.content);
    }
}

#[test]
fn test_colliding_output_filenames_are_an_error() {
    let set = DescriptorSet::new()
        .with_file(schema("x.proto", "pkgx"))
        .with_file(schema("x.protodevel", "pkgy"));
    let generator = Generator::new(set, options());

    match generator.run() {
        Err(GenerateError::DuplicateOutput {
            file,
            first,
            filename,
            ..
        }) => {
            assert_eq!(file, "x.protodevel");
            assert_eq!(first, "x.proto");
            assert_eq!(filename, "x.generated.go");
        }
        Err(other) => panic!("expected a duplicate output error, got {}", other),
        Ok(output) => panic!("expected a duplicate output error, got {} files", output.files.len()),
    }

    let diagnostics = generator.check();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].location.as_deref(), Some("x.protodevel"));
}

#[test]
fn test_non_decimal_digit_in_path() {
    let set = DescriptorSet::new().with_file(schema("v².proto", "pkgv"));
    let output = run(set);

    let v = content(&output, "v².generated.go");
    assert!(v.contains("var File_v__proto protoreflect.FileDescriptor\n"));
}

#[test]
fn test_public_import_cycle() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb").with_import(ImportEdge::public("a.proto")));

    match Generator::new(set, options()).run() {
        Err(GenerateError::Cycle { file, chain }) => {
            assert_eq!(file, "a.proto");
            assert_eq!(chain.to_string(), "a.proto -> b.proto -> a.proto");
        }
        Err(other) => panic!("expected a cycle error, got {}", other),
        Ok(_) => panic!("expected a cycle error"),
    }
}

#[test]
fn test_check_reports_every_failing_file() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb").with_import(ImportEdge::public("a.proto")))
        .with_file(schema("c.proto", "pkgc").with_import(ImportEdge::new("gone.proto")));

    let diagnostics = Generator::new(set, options()).check();
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].location.as_deref(), Some("a.proto"));
    assert!(errors[0].message.contains("a.proto -> b.proto -> a.proto"));
    assert_eq!(errors[1].location.as_deref(), Some("b.proto"));
    assert!(errors[1].message.contains("b.proto -> a.proto -> b.proto"));

    let warnings: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].location.as_deref(), Some("c.proto"));
}

#[test]
fn test_longer_cycle_through_dependency_only_files() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(
            schema("b.proto", "pkgb")
                .with_import(ImportEdge::public("c.proto"))
                .dependency_only(),
        )
        .with_file(
            schema("c.proto", "pkgc")
                .with_import(ImportEdge::public("b.proto"))
                .dependency_only(),
        );

    let err = Generator::new(set, options()).run().err().unwrap();
    assert_eq!(err.file(), "b.proto");
    assert_eq!(
        err.chain().to_string(),
        "a.proto -> b.proto -> c.proto -> b.proto"
    );
}

#[test]
fn test_syntax_error_in_forwarded_file() {
    let set = DescriptorSet::new()
        .with_file(schema("a.proto", "pkga").with_import(ImportEdge::public("b.proto")))
        .with_file(schema("b.proto", "pkgb").dependency_only());

    let result = Generator::new(set, options())
        .with_body(|g: &mut GeneratedFile, file: &SchemaFile| {
            if file.path == "b.proto" {
                g.line("type = broken");
            }
        })
        .run();

    match result {
        Err(GenerateError::Syntax { file, chain, .. }) => {
            assert_eq!(file, "b.proto");
            assert_eq!(chain.to_string(), "a.proto -> b.proto");
        }
        Err(other) => panic!("expected a syntax error, got {}", other),
        Ok(_) => panic!("expected a syntax error"),
    }
}

#[test]
fn test_generate_single_file() {
    let set = forward_chain();
    let generator = Generator::new(set, options());
    let c = generator.descriptor_set().get("c.proto").unwrap();

    let output = generator.generate_file(c).unwrap();
    assert_eq!(output.filename, "c.generated.go");
    assert_eq!(output.source, "c.proto");
    assert_eq!(output, generator.run().unwrap().files[2]);
}

#[test]
fn test_unknown_compiler_version_and_features() {
    let set = DescriptorSet::new().with_file(schema("a.proto", "pkga").deprecated());
    let output = run(set);

    let a = content(&output, "a.generated.go");
    assert!(a.contains("// \tprotoc          (unknown)\n"));
    assert!(a.contains("// a.proto is a deprecated file.\n"));
    assert_eq!(output.supported_features, Features::PROTO3_OPTIONAL);
}

#[test]
fn test_compiler_version_suffix() {
    let set = DescriptorSet::new()
        .with_compiler_version(CompilerVersion::new(
            Version::new(4, 0, 0),
            Some("rc2".to_string()),
        ))
        .with_file(schema("nested/dir/a.proto", "pkga"));
    let output = run(set);

    let a = content(&output, "nested/dir/a.generated.go");
    assert!(a.contains("// \tprotoc          v4.0.0-rc2\n"));
    assert!(a.contains("var File_nested_dir_a_proto protoreflect.FileDescriptor\n"));
}

#[test]
fn test_write_outputs() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = run(forward_chain());

    output
        .write_all(temp_dir.path(), Overwrite::Always)
        .unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("b.generated.go")).unwrap();
    assert_eq!(written, content(&output, "b.generated.go"));
}
