//! Integration tests for export orchestration.

use std::collections::BTreeMap;

use cloudscope_cli::input::DiagramSource;
use cloudscope_cli::{
    ExportKind, ExportOrchestrator, ExportSettings, OrchestratorConfig, OrchestratorError,
};
use cloudscope_model::{DependencySnapshot, EntityRef, ExportFormat, Relationship};
use cloudscope_output::{DirectorySink, MemorySink};
use cloudscope_raster::Rasterizer;

const DIAGRAM: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <rect x="10" y="10" width="60" height="30" fill="#1f4e79"/>
  <rect x="130" y="60" width="60" height="30" fill="#1f4e79"/>
  <line x1="70" y1="25" x2="130" y2="75" stroke="#333333" stroke-width="2"/>
</svg>"##;

const TOOLBAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <rect x="180" y="0" width="20" height="100" fill="#ff0000"/>
</svg>"##;

fn relationship(source: &str, target: &str, critical: bool) -> Relationship {
    Relationship {
        source: EntityRef::new(source, Some(source)),
        target: EntityRef::new(target, None),
        kind: Default::default(),
        status: Default::default(),
        is_critical: critical,
        tags: Some(vec!["http".to_string()]),
    }
}

fn snapshot() -> DependencySnapshot {
    DependencySnapshot {
        relationships: vec![
            relationship("gateway", "auth", true),
            relationship("auth", "users-db", false),
            relationship("billing", "auth", false),
        ],
        cycle_count: 1,
    }
}

fn diagram() -> DiagramSource {
    let mut overlays = BTreeMap::new();
    overlays.insert("toolbar".to_string(), TOOLBAR.as_bytes().to_vec());
    DiagramSource {
        svg: DIAGRAM.as_bytes().to_vec(),
        overlays,
    }
}

fn orchestrator() -> ExportOrchestrator {
    let settings = ExportSettings::default();
    ExportOrchestrator::new(OrchestratorConfig {
        product_name: settings.product_name.clone(),
        rasterizer: Rasterizer::new(settings.rasterizer_config().unwrap()),
    })
}

#[tokio::test(start_paused = true)]
async fn all_formats_save_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let diagram = diagram();

    let outcomes = orchestrator()
        .run_all(
            &[ExportKind::Csv, ExportKind::Png, ExportKind::Pdf],
            &snapshot(),
            Some(&diagram),
            &mut sink,
        )
        .await;

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        let saved = outcome.result.as_ref().unwrap();
        assert_eq!(saved.format, outcome.format);
        let path = saved.path.as_ref().unwrap();
        assert!(path.exists());
        assert!(saved.file_name.starts_with("cloudscope-"));
        assert!(outcome.note.is_none());
    }
    assert_eq!(outcomes[0].format, ExportFormat::Csv);
    assert_eq!(outcomes[2].format, ExportFormat::Pdf);
}

#[tokio::test(start_paused = true)]
async fn png_without_diagram_fails_with_surface_not_ready() {
    let mut sink = MemorySink::new();
    let outcome = orchestrator()
        .run(ExportKind::Png, &snapshot(), None, &mut sink)
        .await;

    assert!(!outcome.is_success());
    assert!(matches!(
        outcome.result,
        Err(OrchestratorError::Export(cloudscope_model::ExportError::SurfaceNotReady))
    ));
    assert!(sink.artifacts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_diagram_is_reported() {
    let mut sink = MemorySink::new();
    let broken = DiagramSource {
        svg: b"<svg".to_vec(),
        overlays: BTreeMap::new(),
    };
    let outcome = orchestrator()
        .run(ExportKind::Pdf, &snapshot(), Some(&broken), &mut sink)
        .await;

    assert!(matches!(outcome.result, Err(OrchestratorError::Diagram(_))));
    assert!(outcome.result.as_ref().unwrap_err().suggestion().is_some());
    assert!(sink.artifacts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_trigger_while_busy_is_rejected() {
    let orchestrator = orchestrator();
    let snapshot = snapshot();
    let diagram = diagram();
    let mut first_sink = MemorySink::new();
    let mut second_sink = MemorySink::new();

    let (first, second) = tokio::join!(
        orchestrator.run(ExportKind::Png, &snapshot, Some(&diagram), &mut first_sink),
        orchestrator.run(ExportKind::Csv, &snapshot, None, &mut second_sink),
    );

    assert!(first.is_success());
    assert!(matches!(second.result, Err(OrchestratorError::Busy)));
    assert!(second_sink.artifacts().is_empty());
    assert!(!orchestrator.is_busy());

    let retry = orchestrator
        .run(ExportKind::Csv, &snapshot, None, &mut second_sink)
        .await;
    assert!(retry.is_success());
}

#[tokio::test(start_paused = true)]
async fn each_export_builds_its_own_model() {
    let mut sink = MemorySink::new();
    let orchestrator = orchestrator();
    let mut snapshot = snapshot();

    orchestrator
        .run(ExportKind::Csv, &snapshot, None, &mut sink)
        .await;
    snapshot.relationships.push(relationship("search", "index", false));
    orchestrator
        .run(ExportKind::Csv, &snapshot, None, &mut sink)
        .await;

    let artifacts = sink.artifacts();
    assert_eq!(artifacts.len(), 2);
    let first = String::from_utf8(artifacts[0].bytes.clone()).unwrap();
    let second = String::from_utf8(artifacts[1].bytes.clone()).unwrap();
    assert!(first.contains("\"totalRelations\",\"3\""));
    assert!(second.contains("\"totalRelations\",\"4\""));
}
