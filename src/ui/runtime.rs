use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use ragdeck_backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use super::{App, PanelOptions};

const FRAME: Duration = Duration::from_millis(16);
/// Time given to in-flight requests once the user quits.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Build the request runtime and run the panel until the user quits.
pub fn run(backend: Arc<dyn Backend>, options: PanelOptions) -> Result<()> {
	let runtime = tokio::runtime::Builder::new_multi_thread()
		.worker_threads(2)
		.thread_name("ragdeck-io")
		.enable_all()
		.build()
		.context("failed to start the request runtime")?;

	let result = {
		let mut app = App::new(backend, runtime.handle().clone(), options);
		app.run()
	};

	runtime.shutdown_timeout(SHUTDOWN_GRACE);
	result
}

impl<'a> App<'a> {
	/// Pump the terminal event loop until the user exits.
	pub fn run(&mut self) -> Result<()> {
		let mut terminal = ratatui::init();
		terminal.clear()?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<()> = 'event_loop: loop {
			self.pump();
			if self.controller.any_pending() {
				self.throbber_state.calc_next();
			}

			loop {
				match event_rx.try_recv() {
					Ok(Event::Resize(_, _)) => {}
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
				break Err(err.into());
			}

			let mut quit = false;
			while let Some(event) = pending_events.pop_front() {
				if let Event::Key(key) = event
					&& key.kind == KeyEventKind::Press
					&& self.handle_key(key).is_break()
				{
					quit = true;
					break;
				}
			}
			if quit {
				tracing::debug!("quit requested");
				break Ok(());
			}

			thread::sleep(FRAME);
		};

		ratatui::restore();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		result
	}
}
