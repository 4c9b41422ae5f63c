//! End-to-end builds: graph contents, loaders and emitted bundle

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use common::{config, project};
use sling_bundler::{
    BuildConfig, Compiler, Error, LoaderPipeline, LoaderRegistry, ModuleRule, NativeFileSystem,
    loader_fn,
};
use tempfile::TempDir;

#[test]
fn two_module_project_on_disk() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::write(
        dir.path().join("src/index.js"),
        "const a = require(\"./a\");\nconsole.log(a.message);\n",
    )
    .unwrap();
    fs::write(dir.path().join("src/a.js"), "exports.message = 'hi';\n").unwrap();

    let config = BuildConfig::new(dir.path(), "./src/index.js");
    let output = Compiler::new(config).unwrap().run().unwrap();

    let ids: Vec<&str> = output.graph.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["./src/index.js", "./src/a.js"]);
    assert_eq!(output.graph.entry_id().as_str(), "./src/index.js");

    let written = fs::read_to_string(dir.path().join("dist/bundle.js")).unwrap();
    assert_eq!(written, output.bundle);
    assert!(written.contains("__sling_require__(\"./src/a.js\")"));
    assert!(written.contains("console.log(a.message)"));
    assert!(written.contains("exports.message = \"hi\"") || written.contains("exports.message = 'hi'"));
    assert!(written.contains("return __sling_require__(\"./src/index.js\");"));
}

#[test]
fn relative_root_builds_from_current_directory() {
    let fs = project(&[
        ("src/index.js", "const a = require('./a'); require('../lib/util');"),
        ("src/a.js", "module.exports = 'a';"),
        ("lib/util.js", ""),
    ]);

    let config = BuildConfig::new(".", "./src/index.js").file_system(Arc::new(fs.clone()));
    let output = Compiler::new(config).unwrap().run().unwrap();

    let ids: Vec<&str> = output.graph.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["./src/index.js", "./src/a.js", "./lib/util.js"]);
    assert!(output.bundle.contains("__sling_require__(\"./src/a.js\")"));
    assert_eq!(fs.file("/project/dist/bundle.js").as_deref(), Some(output.bundle.as_str()));
}

#[test]
fn leading_slash_request_resolves_under_requesting_directory() {
    let fs = project(&[
        ("src/index.js", "require('/abs/x');"),
        ("src/abs/x.js", "module.exports = 1;"),
    ]);

    let output = Compiler::new(config(&fs)).unwrap().run().unwrap();

    let entry = output.graph.entry().unwrap();
    assert_eq!(entry.dependencies()[0].as_str(), "./src/abs/x.js");
    assert!(output.graph.contains("./src/abs/x.js"));
}

#[test]
fn every_reachable_module_is_included() {
    let fs = project(&[
        ("src/index.js", "require('./ui/button'); require('../lib/util');"),
        ("src/ui/button.js", "require('./icon');"),
        ("src/ui/icon.js", ""),
        ("lib/util.js", "require('../src/ui/icon');"),
        ("src/unused.js", ""),
    ]);

    let output = Compiler::new(config(&fs)).unwrap().run().unwrap();
    let ids: Vec<&str> = output.graph.ids().map(|id| id.as_str()).collect();

    assert_eq!(
        ids,
        vec!["./src/index.js", "./src/ui/button.js", "./src/ui/icon.js", "./lib/util.js"]
    );
    assert!(!output.graph.contains("./src/unused.js"));
    for id in &ids {
        assert_eq!(output.bundle.matches(&format!("\"{id}\": function")).count(), 1);
    }
}

#[test]
fn circular_dependency_terminates() {
    let fs = project(&[
        ("src/index.js", "require('./a');"),
        ("src/a.js", "exports.b = require('./b');"),
        ("src/b.js", "exports.a = require('./a');"),
    ]);

    let output = Compiler::new(config(&fs)).unwrap().run().unwrap();

    assert_eq!(output.module_count(), 3);
    let a = output.graph.get("./src/a.js").unwrap();
    let b = output.graph.get("./src/b.js").unwrap();
    assert_eq!(a.dependencies()[0].as_str(), "./src/b.js");
    assert_eq!(b.dependencies()[0].as_str(), "./src/a.js");
}

#[test]
fn duplicate_requires_are_recorded_but_built_once() {
    let fs = project(&[
        ("src/index.js", "require('./a'); require('./a.js');"),
        ("src/a.js", ""),
    ]);

    let output = Compiler::new(config(&fs)).unwrap().run().unwrap();

    let entry = output.graph.entry().unwrap();
    let deps: Vec<&str> = entry.dependencies().iter().map(|id| id.as_str()).collect();
    assert_eq!(deps, vec!["./src/a.js", "./src/a.js"]);
    assert_eq!(output.module_count(), 2);
}

#[test]
fn dynamic_require_is_left_alone() {
    let fs = project(&[("src/index.js", "const name = './a';\nrequire(name);")]);

    let output = Compiler::new(config(&fs)).unwrap().run().unwrap();

    let entry = output.graph.entry().unwrap();
    assert!(entry.dependencies().is_empty());
    assert!(entry.source().contains("require(name)"));
}

#[test]
fn loaders_apply_last_to_first() {
    let fs = project(&[
        ("src/index.js", "require('./data.txt');"),
        ("src/data.txt", "seed"),
    ]);
    let config = config(&fs)
        .rule(ModuleRule::new("\\.txt$", ["t1", "t2", "t3"]).unwrap())
        .loader(loader_fn("t1", |s, _| Ok(format!("module.exports = {:?};", format!("{s}>t1")))))
        .loader(loader_fn("t2", |s, _| Ok(format!("{s}>t2"))))
        .loader(loader_fn("t3", |s, _| Ok(format!("{s}>t3"))));

    let output = Compiler::new(config).unwrap().run().unwrap();

    let data = output.graph.get("./src/data.txt").unwrap();
    assert!(data.source().contains("seed>t3>t2>t1"));
}

#[test]
fn built_in_loaders_wrap_assets() {
    let fs = project(&[
        (
            "src/index.js",
            "var pkg = require('./pkg.json'); var css = require('./app.css'); var t = require('./readme.txt');",
        ),
        ("src/pkg.json", "{ \"name\": \"demo\" }"),
        ("src/app.css", "body { margin: 0; }"),
        ("src/readme.txt", "plain text"),
    ]);
    let config = config(&fs)
        .rule(ModuleRule::new("\\.json$", ["json-loader"]).unwrap())
        .rule(ModuleRule::new("\\.css$", ["style-loader"]).unwrap())
        .rule(ModuleRule::new("\\.txt$", ["raw-loader"]).unwrap());

    let output = Compiler::new(config).unwrap().run().unwrap();

    assert_eq!(output.module_count(), 4);
    assert!(output.graph.get("./src/pkg.json").unwrap().source().contains("\"demo\""));
    assert!(output.graph.get("./src/app.css").unwrap().source().contains("document.head"));
    assert!(output.graph.get("./src/readme.txt").unwrap().source().contains("plain text"));
}

#[test]
fn uppercased_text_fails_to_parse() {
    let fs = project(&[
        ("src/index.js", "require('./notes.txt');"),
        ("src/notes.txt", "hello world"),
    ]);
    let upper = || loader_fn("upper", |s, _| Ok(s.to_uppercase()));

    let registry = {
        let mut registry = LoaderRegistry::new();
        registry.register(upper());
        registry
    };
    let rules = vec![ModuleRule::new("\\.txt$", ["upper"]).unwrap()];
    let pipeline = LoaderPipeline::new(&rules, &registry, Path::new(common::ROOT));
    let loaded = pipeline
        .load(Path::new("/project/src/notes.txt"), "hello world".to_string())
        .unwrap();
    assert_eq!(loaded, "HELLO WORLD");

    let config = config(&fs)
        .rule(ModuleRule::new("\\.txt$", ["upper"]).unwrap())
        .loader(upper());
    let err = Compiler::new(config).unwrap().run().unwrap_err();

    assert!(matches!(err, Error::Parse { ref module_id, .. } if module_id == "./src/notes.txt"));
    assert!(fs.file("/project/dist/bundle.js").is_none());
}

#[test]
fn unknown_loader_names_the_loader() {
    let fs = project(&[("src/index.js", "require('./a.md');"), ("src/a.md", "# hi")]);
    let config = config(&fs).rule(ModuleRule::new("\\.md$", ["markdown-loader"]).unwrap());

    let err = Compiler::new(config).unwrap().run().unwrap_err();
    match err {
        Error::Transformer { path, transformer, .. } => {
            assert_eq!(path, Path::new("/project/src/a.md"));
            assert_eq!(transformer, "markdown-loader");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_entry_is_file_not_found() {
    let fs = project(&[]);
    let err = Compiler::new(config(&fs)).unwrap().run().unwrap_err();
    assert!(
        matches!(err, Error::FileNotFound { ref path } if path == Path::new("/project/src/index.js"))
    );
}

#[test]
fn missing_output_directory_is_write_error() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/index.js"), "module.exports = 1;").unwrap();

    let config = BuildConfig::new(dir.path(), "./src/index.js")
        .output("does/not/exist", "bundle.js")
        .file_system(Arc::new(NativeFileSystem));
    let err = Compiler::new(config).unwrap().run().unwrap_err();

    assert!(matches!(err, Error::Write { .. }));
}
