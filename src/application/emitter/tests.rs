//! Emitter Tests

use super::*;
use crate::application::pipeline::BatchPipeline;
use crate::application::selection::Selection;
use crate::application::testing::{MockFileSystem, RecordingSink, StubRenderer};
use crate::domain::entities::PriorIndex;
use crate::domain::ports::NoopEventSink;
use serde_json::{json, Value};

const ROOT: &str = "/project";

fn batch(items: Vec<Value>) -> ResolvedBatch {
    let deriver = PathDeriver::default();
    BatchPipeline::new(&deriver)
        .prepare(&items, &Selection::all(), &PriorIndex::new())
        .unwrap()
        .batch
}

fn catalog() -> ResolvedBatch {
    batch(vec![
        json!({"class_name": "Product", "layer": "domain.entity", "attributes": ["id:int"]}),
        json!({"class_name": "IProductRepository", "layer": "application.interface", "methods": ["get"]}),
        json!({"class_name": "ProductRepository", "layer": "infrastructure.repository", "implements": "IProductRepository", "dependencies": ["Product"]}),
    ])
}

fn emitter() -> Emitter {
    Emitter::new(ROOT, PathDeriver::default())
}

#[test]
fn stage_derives_artifacts_in_batch_order() {
    let staged = emitter().stage(&catalog(), &StubRenderer::new()).unwrap();

    let paths: Vec<&str> = staged.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "domain/entities/product.py",
            "tests/unit/domain/entities/test_product.py",
            "application/interfaces/product_repository.py",
            "infrastructure/repositories/product_repository.py",
            "tests/integration/infrastructure/repositories/test_product_repository.py",
        ]
    );
    assert_eq!(staged.artifacts.len(), 3);
    assert_eq!(staged.artifacts[1].test_path, None);
    assert_eq!(staged.artifacts[0].code_raw_url, None);
}

#[test]
fn raw_urls_follow_the_template() {
    let emitter = emitter().with_raw_urls(Some(RawUrlTemplate::new(
        "https://raw.githubusercontent.com/{repo}/main/{path}",
        Some("acme/shop"),
    )));
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();
    assert_eq!(
        staged.artifacts[0].code_raw_url.as_deref(),
        Some("https://raw.githubusercontent.com/acme/shop/main/domain/entities/product.py")
    );
    assert_eq!(
        staged.artifacts[0].test_raw_url.as_deref(),
        Some("https://raw.githubusercontent.com/acme/shop/main/tests/unit/domain/entities/test_product.py")
    );
    assert_eq!(staged.artifacts[1].test_raw_url, None);
}

#[test]
fn router_gets_a_register_path() {
    let batch = batch(vec![
        json!({"class_name": "CreateProductUseCase", "layer": "application.use_case"}),
        json!({"class_name": "ProductRouter", "layer": "presentation.router", "base_name": "Product",
               "endpoints": [{"method": "POST", "path": "/", "use_case": "CreateProductUseCase"}]}),
    ]);
    let staged = emitter().stage(&batch, &StubRenderer::new()).unwrap();
    assert_eq!(staged.artifacts[1].register_path.as_deref(), Some("/product"));
    assert_eq!(staged.artifacts[1].code_path, "presentation/api/v1/routers/product.py");
    assert!(staged.files[2].content.contains("# mounted at /product"));
}

#[test]
fn render_failure_touches_nothing() {
    let result = emitter().stage(&catalog(), &StubRenderer::failing_on("ProductRepository"));
    let err = result.unwrap_err();
    assert_eq!(err.owner.class_name, "ProductRepository");
    assert!(matches!(err.cause, EmitCause::Render(_)));
}

#[test]
fn commit_writes_every_file() {
    let fs = MockFileSystem::new().with_dir(ROOT);
    let emitter = emitter();
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();

    let report = emitter.commit(&fs, &staged, &NoopEventSink).unwrap();
    assert_eq!(report.written.len(), 5);
    assert!(report.unchanged.is_empty());
    assert_eq!(
        fs.content("/project/domain/entities/product.py").as_deref(),
        Some(staged.files[0].content.as_str())
    );
}

#[test]
fn second_commit_is_a_no_op() {
    let fs = MockFileSystem::new().with_dir(ROOT);
    let emitter = emitter();
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();
    emitter.commit(&fs, &staged, &NoopEventSink).unwrap();
    let writes_after_first = fs.write_log.borrow().len();
    let before = fs.snapshot();

    let report = emitter.commit(&fs, &staged, &NoopEventSink).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.unchanged.len(), 5);
    assert_eq!(fs.write_log.borrow().len(), writes_after_first);
    assert_eq!(fs.snapshot(), before);
}

#[test]
fn unrelated_files_are_left_alone() {
    let fs = MockFileSystem::new()
        .with_file("/project/domain/entities/order.py", "class Order: ...\n")
        .with_file("/project/README.md", "hello\n");
    let emitter = emitter();
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();
    emitter.commit(&fs, &staged, &NoopEventSink).unwrap();

    assert_eq!(
        fs.content("/project/domain/entities/order.py").as_deref(),
        Some("class Order: ...\n")
    );
    assert_eq!(fs.content("/project/README.md").as_deref(), Some("hello\n"));
}

#[test]
fn failed_write_restores_the_previous_state() {
    let fs = MockFileSystem::new()
        .with_file("/project/domain/entities/product.py", "hand edited\n")
        .with_dir("/project/infrastructure");
    fs.fail_writes_to("/project/tests/integration/infrastructure/repositories/test_product_repository.py");
    let before = fs.snapshot();

    let emitter = emitter();
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();
    let sink = RecordingSink::default();
    let err = emitter.commit(&fs, &staged, &sink).unwrap_err();

    assert_eq!(err.owner.class_name, "ProductRepository");
    assert!(err.rollback_failures.is_empty(), "{:?}", err.rollback_failures);
    assert!(matches!(err.cause, EmitCause::Fs(FsError::PermissionDenied(_))));
    assert_eq!(fs.snapshot(), before);
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, GenerateEvent::RolledBack { .. })));
}

#[test]
fn commit_reports_each_file_to_the_sink() {
    let fs = MockFileSystem::new().with_dir(ROOT);
    let emitter = emitter();
    let staged = emitter.stage(&catalog(), &StubRenderer::new()).unwrap();
    let sink = RecordingSink::default();
    emitter.commit(&fs, &staged, &sink).unwrap();

    let written = sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, GenerateEvent::ArtifactWritten { .. }))
        .count();
    assert_eq!(written, 5);
}
