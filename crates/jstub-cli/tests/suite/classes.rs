//! Tiny classfile writer for CLI fixtures.

use assert_cmd::Command;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SUPER: u16 = 0x0020;

pub fn jstub() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jstub"));
    cmd.env_remove("JSTUB_CONFIG_PATH").env_remove("RUST_LOG");
    cmd
}

/// A public class extending `java.lang.Object` with the given fields and methods.
pub fn class_bytes(
    internal_name: &str,
    fields: &[(u16, &str, &str)],
    methods: &[(u16, &str, &str)],
) -> Vec<u8> {
    let mut pool = Vec::new();
    let mut count: u16 = 1;
    let mut utf8 = |pool: &mut Vec<u8>, value: &str| -> u16 {
        pool.push(1);
        push_u16(pool, value.len() as u16);
        pool.extend_from_slice(value.as_bytes());
        count += 1;
        count - 1
    };

    let this_name = utf8(&mut pool, internal_name);
    let super_name = utf8(&mut pool, "java/lang/Object");
    let members: Vec<(u16, u16, u16)> = fields
        .iter()
        .chain(methods)
        .map(|(flags, name, desc)| (*flags, utf8(&mut pool, *name), utf8(&mut pool, *desc)))
        .collect();

    pool.push(7);
    push_u16(&mut pool, this_name);
    let this_class = count;
    pool.push(7);
    push_u16(&mut pool, super_name);
    let super_class = count + 1;
    count += 2;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xCAFEBABE_u32.to_be_bytes());
    push_u16(&mut bytes, 0);
    push_u16(&mut bytes, 52);
    push_u16(&mut bytes, count);
    bytes.extend_from_slice(&pool);

    push_u16(&mut bytes, ACC_PUBLIC | ACC_SUPER);
    push_u16(&mut bytes, this_class);
    push_u16(&mut bytes, super_class);
    push_u16(&mut bytes, 0);

    let (field_members, method_members) = members.split_at(fields.len());
    for group in [field_members, method_members] {
        push_u16(&mut bytes, group.len() as u16);
        for (flags, name, desc) in group {
            push_u16(&mut bytes, *flags);
            push_u16(&mut bytes, *name);
            push_u16(&mut bytes, *desc);
            push_u16(&mut bytes, 0);
        }
    }
    push_u16(&mut bytes, 0);
    bytes
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}
