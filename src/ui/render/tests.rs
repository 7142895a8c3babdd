use std::sync::Arc;

use ragdeck_backend::StatusCode;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use tempfile::TempDir;

use crate::controller::View;
use crate::picker::PickerOptions;
use crate::test_support::{
	Script, ScriptedBackend, report_pdf, runtime, sample_document, wait_idle,
};
use crate::ui::{App, PanelOptions};

fn buffer_to_string(buf: &Buffer) -> String {
	let mut lines = Vec::new();
	for y in 0..buf.area.height {
		let mut line = String::new();
		for x in 0..buf.area.width {
			line.push_str(buf[(x, y)].symbol());
		}
		lines.push(line);
	}
	lines.join("\n")
}

fn draw(app: &mut App<'_>) -> String {
	let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
	terminal.draw(|frame| app.draw(frame)).expect("draw frame");
	buffer_to_string(terminal.backend().buffer())
}

fn options(root: &TempDir) -> PanelOptions {
	PanelOptions {
		picker: PickerOptions {
			root: root.path().to_path_buf(),
			..PickerOptions::default()
		},
		backend_label: "http://rag.test".into(),
		..PanelOptions::default()
	}
}

fn pdf_root() -> TempDir {
	let dir = TempDir::new().expect("tempdir");
	std::fs::write(dir.path().join("report.pdf"), vec![0u8; 2048]).expect("write pdf");
	std::fs::write(dir.path().join("slides.pdf"), b"%PDF-1.7").expect("write pdf");
	dir
}

#[test]
fn upload_view_lists_pdfs_and_disabled_upload() {
	let root = pdf_root();
	let runtime = runtime();
	let mut app = App::new(
		Arc::new(ScriptedBackend::default()),
		runtime.handle().clone(),
		options(&root),
	);

	let screen = draw(&mut app);

	assert!(screen.contains("ragdeck > http://rag.test"), "{screen}");
	assert!(screen.contains(" Upload "));
	assert!(screen.contains("[ ] report.pdf"));
	assert!(screen.contains("slides.pdf"));
	assert!(screen.contains("Nothing selected"));
	assert!(screen.contains("[ Upload ]"));
	assert!(screen.contains("ready"));
}

#[test]
fn staged_selection_enables_upload() {
	let root = pdf_root();
	let runtime = runtime();
	let mut app = App::new(
		Arc::new(ScriptedBackend::default()),
		runtime.handle().clone(),
		options(&root),
	);
	app.picker.toggle();
	app.select_from_picker();

	let screen = draw(&mut app);

	assert!(screen.contains("[x] report.pdf"), "{screen}");
	assert!(screen.contains("1 file · 2.0 KiB"));
	assert!(screen.contains("[ Upload (u) ]"));
	assert!(screen.contains("1 file selected"));
}

#[test]
fn search_view_shows_query_count_and_answer() {
	let root = pdf_root();
	let runtime = runtime();
	let mut app = App::new(
		Arc::new(ScriptedBackend::default()),
		runtime.handle().clone(),
		PanelOptions {
			start_view: View::Search,
			..options(&root)
		},
	);
	for ch in "neural networks".chars() {
		app.query_input
			.input(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
	}
	app.query_edited();
	app.submit_search();
	wait_idle(&mut app);

	let screen = draw(&mut app);

	assert!(screen.contains("neural networks"), "{screen}");
	assert!(screen.contains("↑ 5 ↓"));
	assert!(screen.contains("Result text..."));
}

#[test]
fn failed_search_keeps_error_in_status_line() {
	let root = pdf_root();
	let runtime = runtime();
	let backend = Arc::new(
		ScriptedBackend::default().with_search(Script::Status(StatusCode::BAD_GATEWAY)),
	);
	let mut app = App::new(
		backend,
		runtime.handle().clone(),
		PanelOptions {
			start_view: View::Search,
			..options(&root)
		},
	);
	app.controller.update_query("rust");
	app.submit_search();
	wait_idle(&mut app);

	let screen = draw(&mut app);

	assert!(screen.contains("search failed: /search returned 502"), "{screen}");
	assert!(screen.contains("No search yet"));
}

#[test]
fn documents_view_renders_panels_for_selected_document() {
	let root = pdf_root();
	let runtime = runtime();
	let backend = Arc::new(
		ScriptedBackend::default().with_documents(Script::Reply(vec![sample_document()])),
	);
	let mut app = App::new(
		backend,
		runtime.handle().clone(),
		PanelOptions {
			start_view: View::Documents,
			..options(&root)
		},
	);
	wait_idle(&mut app);

	let screen = draw(&mut app);

	assert!(screen.contains("Indexed documents (1)"), "{screen}");
	assert!(screen.contains("File details"));
	assert!(screen.contains("2024-05-01 09:30 UTC"));
	assert!(screen.contains("/srv/rag/report.pdf"));
	assert!(screen.contains("Page 1"));
	assert!(screen.contains("Executive summary"));
}

#[test]
fn upload_success_lands_on_documents() {
	let root = pdf_root();
	let runtime = runtime();
	let backend = Arc::new(
		ScriptedBackend::default().with_documents(Script::Reply(vec![sample_document()])),
	);
	let mut app = App::new(backend, runtime.handle().clone(), options(&root));
	app.controller.select_files([report_pdf()]);
	app.submit_upload();
	wait_idle(&mut app);

	let screen = draw(&mut app);

	assert_eq!(app.view(), View::Documents);
	assert!(screen.contains("Documents processed and indexed successfully"), "{screen}");
	assert!(screen.contains("report.pdf"));
}
