use std::path::PathBuf;

use jstub_classfile::VirtualSource;

use super::fixtures::*;

#[test]
fn virtual_source_carries_package_and_class_name() {
    let bytes = ClassBuilder::new("org/sample/util/Strings")
        .access(ACC_PUBLIC | ACC_FINAL | ACC_SUPER)
        .method(ACC_PUBLIC | ACC_STATIC, "isBlank", "(Ljava/lang/CharSequence;)Z")
        .build();

    let source = VirtualSource::from_class_bytes(&bytes).expect("virtual source");
    assert_eq!(source.package_name, "org.sample.util");
    assert_eq!(source.class_name, "Strings");
    assert_eq!(
        source.relative_path(),
        PathBuf::from("org/sample/util/Strings.java")
    );
    assert!(source
        .text
        .contains("public static boolean isBlank(java.lang.CharSequence a0){}"));
}

#[test]
fn default_package_class_has_empty_package_name() {
    let bytes = ClassBuilder::new("Main").build();
    let source = VirtualSource::from_class_bytes(&bytes).expect("virtual source");
    assert_eq!(source.package_name, "");
    assert!(!source.text.contains("package"));
}
