use std::io::Write;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use zip::write::FileOptions;

use super::classes::*;

fn greeter() -> Vec<u8> {
    class_bytes(
        "com/example/Greeter",
        &[(ACC_PUBLIC | ACC_STATIC | ACC_FINAL, "DEFAULT", "Ljava/lang/String;")],
        &[
            (ACC_PUBLIC, "<init>", "()V"),
            (ACC_PUBLIC, "greet", "(Ljava/lang/String;I)Ljava/lang/String;"),
        ],
    )
}

const GREETER_STUB: &str = "package com.example;\n\
public class Greeter extends java.lang.Object{\n\
public final static java.lang.String DEFAULT;\n\
public Greeter(){}\n\
public java.lang.String greet(java.lang.String a0,int a1){}\n\
}";

fn write_jar(path: &std::path::Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::<()>::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn help_mentions_subcommands() {
    jstub().arg("--help").assert().success().stdout(
        predicate::str::contains("stub").and(predicate::str::contains("describe")),
    );
}

#[test]
fn prints_stub_for_class_file() {
    let temp = TempDir::new().unwrap();
    let class = temp.child("Greeter.class");
    class.write_binary(&greeter()).unwrap();

    jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(class.path())
        .assert()
        .success()
        .stdout(format!("{GREETER_STUB}\n"));
}

#[test]
fn writes_stubs_under_out_dir() {
    let temp = TempDir::new().unwrap();
    let jar = temp.child("lib.jar");
    let greeter = greeter();
    let util = class_bytes("org/sample/Util", &[], &[(ACC_PUBLIC | ACC_STATIC, "id", "(J)J")]);
    write_jar(
        jar.path(),
        &[
            ("META-INF/MANIFEST.MF", &b"Manifest-Version: 1.0\n"[..]),
            ("com/example/Greeter.class", greeter.as_slice()),
            ("org/sample/Util.class", util.as_slice()),
        ],
    );
    let out = temp.child("out");

    jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(jar.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Greeter.java").and(predicate::str::contains("Util.java")));

    out.child("com/example/Greeter.java").assert(GREETER_STUB);
    out.child("org/sample/Util.java")
        .assert(predicate::str::contains("public static long id(long a0){}\n"));
}

#[test]
fn json_output_lists_every_stub() {
    let temp = TempDir::new().unwrap();
    let classes = temp.child("classes");
    classes.create_dir_all().unwrap();
    classes
        .child("com/example/Greeter.class")
        .write_binary(&greeter())
        .unwrap();
    classes
        .child("Main.class")
        .write_binary(&class_bytes("Main", &[], &[]))
        .unwrap();

    let output = jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(classes.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stubs = v.as_array().unwrap();
    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0]["package"], "");
    assert_eq!(stubs[0]["class"], "Main");
    assert_eq!(stubs[0]["text"], "public class Main extends java.lang.Object{\n}");
    assert_eq!(stubs[1]["package"], "com.example");
    assert_eq!(stubs[1]["class"], "Greeter");
    assert_eq!(stubs[1]["text"], GREETER_STUB);
    assert!(stubs[1]["path"].as_str().unwrap().ends_with("Greeter.class"));
}

#[test]
fn unparsable_entries_are_skipped_with_exit_code_one() {
    let temp = TempDir::new().unwrap();
    let classes = temp.child("classes");
    classes
        .child("com/example/Greeter.class")
        .write_binary(&greeter())
        .unwrap();
    classes
        .child("com/example/Broken.class")
        .write_binary(b"\xCA\xFE\xBA\xBE\x00")
        .unwrap();

    jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(classes.path())
        .assert()
        .code(1)
        .stdout(format!("{GREETER_STUB}\n"))
        .stderr(predicate::str::contains("failed to parse classfile"));
}

#[test]
fn missing_input_is_fatal() {
    let temp = TempDir::new().unwrap();

    jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(temp.path().join("absent.jar"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read classes from"));
}

#[test]
fn config_excludes_and_drops_nested_classes() {
    let temp = TempDir::new().unwrap();
    temp.child("jstub.toml")
        .write_str(
            r#"
[logging]
level = "warn"

[stubs]
include_nested = false
exclude = ["org/sample/internal/**"]
"#,
        )
        .unwrap();
    let classes = temp.child("classes");
    classes
        .child("com/example/Greeter.class")
        .write_binary(&greeter())
        .unwrap();
    classes
        .child("com/example/Greeter$Inner.class")
        .write_binary(&class_bytes("com/example/Greeter$Inner", &[], &[]))
        .unwrap();
    classes
        .child("org/sample/internal/Hidden.class")
        .write_binary(&class_bytes("org/sample/internal/Hidden", &[], &[]))
        .unwrap();

    jstub()
        .current_dir(temp.path())
        .arg("stub")
        .arg(classes.path())
        .assert()
        .success()
        .stdout(format!("{GREETER_STUB}\n"));
}

#[test]
fn explicit_config_errors_are_fatal() {
    let temp = TempDir::new().unwrap();
    let config = temp.child("bad.toml");
    config.write_str("[stubs]\ninclude_nested = \"nope\"\n").unwrap();
    let class = temp.child("Greeter.class");
    class.write_binary(&greeter()).unwrap();

    jstub()
        .current_dir(temp.path())
        .arg("--config")
        .arg(config.path())
        .arg("stub")
        .arg(class.path())
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("failed to parse toml config")
                .and(predicate::str::contains("nope").not()),
        );
}
