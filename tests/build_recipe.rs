// tests/build_recipe.rs

//! Integration tests for recipe parsing and build hand-off
//!
//! These tests verify end-to-end behavior through the public API,
//! including file I/O and macro-file loading.

use specforge::{
    build_from_file, parse_recipe, DryRunAssembler, Error, MacroContext, PackageAssembler,
    PackageDescriptor,
};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

const HELLO_RECIPE: &str = "\
Name: hello
Version: 2.12.1
Release: 1
Summary: Prints a friendly greeting
License: GPL-3.0-or-later
URL: https://www.gnu.org/software/hello/
Source0: https://ftp.gnu.org/gnu/hello/hello-%{version}.tar.gz
Patch0: hello-reproducible-build.patch
BuildRequires: gcc make
Requires: glibc

%package doc
Summary: Documentation for %{name}

%prep
%setup -q
patch -p1 < ../hello-reproducible-build.patch

%build
./configure --prefix=/usr
make

%install
make install DESTDIR=$pkgdir

%files
/usr/bin/hello
";

fn write_recipe(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_full_recipe_round_trip() {
    let mut macros = MacroContext::new();
    let desc = parse_recipe(HELLO_RECIPE, &mut macros).unwrap();

    assert_eq!(desc.name, "hello");
    assert_eq!(desc.version, "2.12.1");
    assert_eq!(desc.summary, "Prints a friendly greeting");
    assert_eq!(desc.license, "GPL-3.0-or-later");
    assert_eq!(
        desc.sources,
        vec!["https://ftp.gnu.org/gnu/hello/hello-2.12.1.tar.gz"]
    );
    assert_eq!(desc.patches, vec!["hello-reproducible-build.patch"]);
    assert_eq!(desc.build_requires, vec!["gcc", "make"]);
    assert_eq!(desc.requires, vec!["glibc"]);

    // Subpackage metadata routed away from the top level, with the
    // %{name} macro resolved from the already-parsed Name field
    let doc = desc.subpackages.get("hello-doc").unwrap();
    assert_eq!(doc.name, "hello-doc");
    assert_eq!(doc.summary, "Documentation for hello");

    // Stage commands in source order, markers and %files content excluded
    assert_eq!(
        desc.commands.prepare,
        vec![
            "%setup -q",
            "patch -p1 < ../hello-reproducible-build.patch"
        ]
    );
    assert_eq!(desc.commands.build, vec!["./configure --prefix=/usr", "make"]);
    assert_eq!(desc.commands.install, vec!["make install DESTDIR=$pkgdir"]);
}

#[test]
fn test_build_from_file_end_to_end() {
    struct CollectingAssembler {
        names: Mutex<Vec<String>>,
    }

    impl PackageAssembler for CollectingAssembler {
        fn assemble(&self, descriptor: &PackageDescriptor) -> specforge::Result<()> {
            let mut names = self.names.lock().unwrap();
            names.push(descriptor.name.clone());
            names.extend(descriptor.subpackages.keys().cloned());
            Ok(())
        }
    }

    let recipe = write_recipe(HELLO_RECIPE);
    let assembler = CollectingAssembler {
        names: Mutex::new(Vec::new()),
    };
    let mut macros = MacroContext::new();

    build_from_file(recipe.path(), &mut macros, &assembler).unwrap();

    let names = assembler.names.lock().unwrap();
    assert_eq!(*names, vec!["hello", "hello-doc"]);
}

#[test]
fn test_macro_file_definitions_reach_recipe_values() {
    let mut macro_file = NamedTempFile::new().unwrap();
    writeln!(macro_file, "# site configuration").unwrap();
    writeln!(macro_file, "%_gnu_mirror https://ftp.gnu.org/gnu").unwrap();
    macro_file.flush().unwrap();

    let mut macros = MacroContext::new();
    macros.load_from_file(macro_file.path()).unwrap();

    let recipe = "\
Name: hello
Version: 2.12.1
Source0: %{_gnu_mirror}/hello/hello-%{version}.tar.gz
";
    let desc = parse_recipe(recipe, &mut macros).unwrap();
    assert_eq!(
        desc.sources,
        vec!["https://ftp.gnu.org/gnu/hello/hello-2.12.1.tar.gz"]
    );
}

#[test]
fn test_macro_table_snapshot_after_parse() {
    let mut macros = MacroContext::new();
    parse_recipe("Name: hello\nVersion: 1.0\nRelease: 2\n", &mut macros).unwrap();

    let dump = macros.dump();
    assert!(dump.contains(&("name".to_string(), "hello".to_string())));
    assert!(dump.contains(&("version".to_string(), "1.0".to_string())));
    assert!(dump.contains(&("release".to_string(), "2".to_string())));
}

#[test]
fn test_malformed_subpackage_reported_with_context() {
    let recipe = write_recipe("Name: foo\nVersion: 1.0\n%package\n");
    let mut macros = MacroContext::new();

    let err = build_from_file(recipe.path(), &mut macros, &DryRunAssembler).unwrap_err();
    match err {
        Error::MalformedSubpackage { line_number, line } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "%package");
        }
        other => panic!("expected MalformedSubpackage, got {:?}", other),
    }
}

#[test]
fn test_missing_recipe_file_is_io_error() {
    let mut macros = MacroContext::new();
    let err = build_from_file(
        Path::new("/no/such/recipe.spec"),
        &mut macros,
        &DryRunAssembler,
    )
    .unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn test_separate_invocations_do_not_share_macros() {
    let mut first = MacroContext::new();
    parse_recipe("Name: first\n", &mut first).unwrap();

    // A fresh context knows nothing about the previous build
    let mut second = MacroContext::new();
    let desc = parse_recipe("Summary: %{name}\nName: second\n", &mut second).unwrap();

    // %{name} was not yet committed when Summary was read, and the
    // previous invocation's "first" must not bleed through
    assert_eq!(desc.summary, "%{name}");
}
