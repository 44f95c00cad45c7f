//! Embeds the sql files in `migrations/` into the crate.
//!
//! Each migration consists of `<name>.up.sql` and `<name>.down.sql`.
//! Migrations are ordered by name.

use std::{
    collections::BTreeMap,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let migrations_rs = out_dir.join("migrations.rs");
    emit_migrations(&migrations_rs, &collect_migrations());
    println!("cargo::rustc-env=MIGRATIONS={}", migrations_rs.display());
}

#[derive(Default)]
struct Sql {
    up: String,
    down: String,
}

fn emit_migrations(path: &Path, migrations: &BTreeMap<String, Sql>) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = BufWriter::new(file);
    write!(&mut writer, "&[").unwrap();
    for (name, Sql { up, down }) in migrations {
        write!(
            &mut writer,
            "Migration{{name:{name:?},up:{up:?},down:{down:?}}},"
        )
        .unwrap();
    }
    write!(&mut writer, "]").unwrap();
    writer.flush().unwrap();
}

fn collect_migrations() -> BTreeMap<String, Sql> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");

    let mut out = BTreeMap::<String, Sql>::new();
    for file in dir.read_dir().unwrap() {
        let file = file.unwrap();
        let file_name = file.file_name().into_string().unwrap();

        let (name, is_up) = if let Some(name) = file_name.strip_suffix(".up.sql") {
            (name, true)
        } else if let Some(name) = file_name.strip_suffix(".down.sql") {
            (name, false)
        } else {
            continue;
        };

        let content = std::fs::read_to_string(file.path()).unwrap();
        let sql = out.entry(name.to_owned()).or_default();
        if is_up {
            sql.up = content;
        } else {
            sql.down = content;
        }
    }
    out
}
