use std::path::Path;

use mapping::RootDirectories;
use serde_json::json;
use toolchain::CompilerOptions;

use crate::Options;

/// Options handed to the compiler for validation: the user's
/// `compilerOptions` with the bundle path re-rooted under `target`, the
/// asset roots applied and emitted-file listing forced on.
pub fn raw_compiler_options(
    options: &Options,
    target: &Path,
    roots: &RootDirectories,
) -> CompilerOptions {
    let mut compiler_options = options.tsconfig.compiler_options.clone();

    if let Some(out_file) = compiler_options.out_file() {
        let out_file = target.join(out_file);
        tracing::debug!(target: "compiling", out_file = %out_file.display(), "Single outFile");
        compiler_options.set("outFile", display(&out_file));
    }

    match roots {
        RootDirectories::Single(root) => {
            compiler_options.set("rootDir", display(root));
        }
        RootDirectories::Split { main, test } => {
            compiler_options.set("rootDirs", vec![display(main), display(test)]);
        }
    }

    compiler_options.set("listEmittedFiles", true);
    compiler_options
}

/// Points the validated options at the target directory and sets up module
/// resolution, optionally searching the given `node_modules` directories.
pub fn resolve_compiler_options(
    compiler_options: &mut CompilerOptions,
    options: &Options,
    target: &Path,
) {
    compiler_options.set("outDir", display(target));
    compiler_options.set("baseUrl", ".");

    let mut paths = vec!["*".to_string()];
    if options.resolve_from_node_modules_dir {
        let node_modules = &options.node_modules_dirs;
        paths.extend(node_modules.iter().map(|directory| format!("{}/*", display(directory))));
        paths.extend(node_modules.iter().map(|directory| format!("{}/@types/*", display(directory))));

        let type_roots: Vec<String> =
            node_modules.iter().map(|directory| format!("{}/@types", display(directory))).collect();
        compiler_options.set("typeRoots", type_roots);
    }

    compiler_options.set("paths", json!({ "*": paths }));
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
