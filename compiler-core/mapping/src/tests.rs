use std::path::{Path, PathBuf};

use crate::{
    MappingError, OutputLayout, RootDirectories, SourceMapping, SourceMappings, clean,
    replace_extension,
};

fn mappings() -> SourceMappings {
    SourceMappings::new(vec![
        SourceMapping::new("/project/src/main/assets/app/main.ts", "app/main.ts"),
        SourceMapping::new("/project/src/main/assets/app/util/strings.ts", "app/util/strings.ts"),
    ])
}

#[test]
fn find_declared_mapping() {
    let mappings = mappings();
    for mapping in mappings.mappings() {
        let found = mappings.find(mapping.normalized_absolute_path());
        assert_eq!(found, Some(mapping));
    }
}

#[test]
fn find_normalizes_compiler_path() {
    let mappings = mappings();
    let found = mappings.find("/project/src/main/assets/app/./util/../main.ts");
    assert_eq!(found.map(SourceMapping::relative_path), Some(Path::new("app/main.ts")));
}

#[test]
fn find_undeclared_is_none() {
    let mappings = mappings();
    assert_eq!(mappings.find("/usr/lib/node_modules/typescript/lib/lib.d.ts"), None);
    assert_eq!(mappings.find("app/main.ts"), None);
}

#[test]
fn find_by_declared_unnormalized_path() {
    let mappings = SourceMappings::new(vec![SourceMapping::new(
        "/project/src/main/assets/./app/../app/main.ts",
        "app/main.ts",
    )]);
    let found = mappings.find("/project/src/main/assets/app/main.ts");
    assert!(found.is_some());
}

#[test]
fn cached_paths_are_stable() {
    let mappings = mappings();
    let first = mappings.absolute_paths().as_ptr();
    let second = mappings.absolute_paths().as_ptr();
    assert_eq!(first, second);
    assert_eq!(
        mappings.relative_paths(),
        &[PathBuf::from("app/main.ts"), PathBuf::from("app/util/strings.ts")]
    );
}

#[test]
fn validate_rejects_duplicates() {
    let duplicated = SourceMappings::new(vec![
        SourceMapping::new("/project/a.ts", "a.ts"),
        SourceMapping::new("/project/./a.ts", "other/a.ts"),
    ]);
    assert_eq!(
        duplicated.validate(),
        Err(MappingError::DuplicateAbsolutePath(PathBuf::from("/project/a.ts")))
    );
    assert_eq!(mappings().validate(), Ok(()));
}

#[test]
fn output_path_replaces_extension() {
    let mapping = SourceMapping::new("/project/a/b.ts", "a/b.ts");
    let out_dir = Path::new("/out");
    assert_eq!(mapping.to_output_path(out_dir, ".js"), Path::new("/out/a/b.js"));
    assert_eq!(mapping.to_output_path(out_dir, ".d.ts"), Path::new("/out/a/b.d.ts"));
}

#[test]
fn output_path_keeps_dotted_segments() {
    let mapping = SourceMapping::new("/project/v1.2/b.spec.ts", "v1.2/b.spec.ts");
    let output = mapping.to_output_path(Path::new("/out"), ".js");
    assert_eq!(output, Path::new("/out/v1.2/b.spec.js"));
}

#[test]
fn output_path_cleans_relative_path() {
    let mapping = SourceMapping::new("/project/a/b.ts", "./a/../a/b.ts");
    let output = mapping.to_output_path(Path::new("/out"), ".js");
    assert_eq!(output, Path::new("/out/a/b.js"));
}

#[test]
fn replace_extension_edge_cases() {
    assert_eq!(replace_extension("a/b", ".js"), Path::new("a/b.js"));
    assert_eq!(replace_extension("a/b.tsx", "js"), Path::new("a/b.js"));
    assert_eq!(replace_extension("a/b.d.ts", ".js"), Path::new("a/b.d.js"));
}

#[test]
fn clean_relative() {
    assert_eq!(clean("a/./b/../c"), Path::new("a/c"));
    assert_eq!(clean("../a/b"), Path::new("../a/b"));
    assert_eq!(clean("/../a"), Path::new("/a"));
}

#[test]
fn layout_files_written() {
    let mapping = SourceMapping::new("/project/a/b.ts", "a/b.ts");

    let layout = OutputLayout::new("/out");
    assert_eq!(layout.files_written(&mapping), vec![PathBuf::from("/out/a/b.js")]);

    let layout = OutputLayout { declaration: true, source_map: true, ..OutputLayout::new("/out") };
    assert_eq!(
        layout.files_written(&mapping),
        vec![
            PathBuf::from("/out/a/b.js"),
            PathBuf::from("/out/a/b.d.ts"),
            PathBuf::from("/out/a/b.js.map"),
        ]
    );
}

#[test]
fn layout_bundle_bypasses_per_file_outputs() {
    let first = SourceMapping::new("/project/a.ts", "a.ts");
    let second = SourceMapping::new("/project/b/c.ts", "b/c.ts");
    let layout = OutputLayout {
        bundle: Some(PathBuf::from("/out/bundle.js")),
        source_map: true,
        ..OutputLayout::new("/out")
    };

    assert_eq!(
        layout.files_written(&first),
        vec![PathBuf::from("/out/bundle.js"), PathBuf::from("/out/bundle.js.map")]
    );
    assert_eq!(layout.primary(&second), Path::new("/out/bundle.js"));
}

#[test]
fn root_directories_policy() {
    let main = PathBuf::from("/project/src/main/assets");
    let test = PathBuf::from("/project/src/test/assets");

    let single = RootDirectories::from_assets(std::slice::from_ref(&main));
    assert_eq!(single, Ok(RootDirectories::Single(main.clone())));

    let split = RootDirectories::from_assets(&[main.clone(), test.clone()]);
    assert_eq!(split, Ok(RootDirectories::Split { main: main.clone(), test: test.clone() }));

    assert_eq!(RootDirectories::from_assets(&[]), Err(MappingError::AssetRootCount(0)));
    assert_eq!(
        RootDirectories::from_assets(&[main.clone(), test.clone(), main]),
        Err(MappingError::AssetRootCount(3))
    );
}
