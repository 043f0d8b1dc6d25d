//! Application state and event loop.

use std::io;

use crossterm::event::EventStream;
use crossterm::style::Color;
use futures::StreamExt;
use log::{error, info, warn};
use tokio::sync::mpsc;

use nbconnect_lib::{ConnectClient, ConnectError, ConnectRequest, ConnectResponse, action};

use crate::browser::SystemBrowser;
use crate::modals::{AlertDialog, ConnectDialog, ConnectDialogEvent};
use crate::toolbar::{EXISTING_BUTTON, NEW_BUTTON, Toolbar};
use crate::ui::event::{InputEvent, Key, convert};
use crate::ui::{Screen, Style};

const ERROR_TITLE: &str = "Unable to connect to existing kernel";

type ConnectOutcome = Result<ConnectResponse, ConnectError>;
type OutcomeSender = mpsc::UnboundedSender<ConnectOutcome>;

enum Modal {
    Connect(ConnectDialog),
    Alert(AlertDialog),
}

/// The terminal client: a host toolbar with the Existing button installed,
/// plus whatever modal is currently open.
pub struct App {
    client: ConnectClient,
    windows: SystemBrowser,
    toolbar: Toolbar,
    modal: Option<Modal>,
    status: Option<String>,
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(client: ConnectClient, windows: SystemBrowser) -> Self {
        let mut toolbar = Toolbar::host_default();
        toolbar.install_existing_button();

        Self {
            client,
            windows,
            toolbar,
            modal: None,
            status: None,
            in_flight: 0,
            should_quit: false,
        }
    }

    /// Runs until quit. The event loop stays live while connect attempts
    /// are in flight; their outcomes come back over a channel.
    pub async fn run(mut self) -> io::Result<()> {
        let mut screen = Screen::new()?;
        let mut events = EventStream::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        self.draw(&mut screen)?;

        while !self.should_quit {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(input) = convert(event) {
                                self.handle_input(input, &tx);
                            }
                        }
                        Some(Err(e)) => error!("terminal event error: {e}"),
                        None => break,
                    }
                }
                Some(outcome) = rx.recv() => self.handle_outcome(outcome),
            }
            self.draw(&mut screen)?;
        }
        Ok(())
    }

    fn handle_input(&mut self, input: InputEvent, outcomes: &OutcomeSender) {
        if self.modal.is_some() {
            self.handle_modal_input(input, outcomes);
            return;
        }

        match input {
            InputEvent::Key {
                key: Key::Char('q'),
                modifiers,
            } if modifiers.ctrl => self.should_quit = true,
            InputEvent::Key {
                key: Key::Char('e'),
                ..
            } => self.open_connect_dialog(),
            InputEvent::Click { x, y } => match self.toolbar.hit(x, y) {
                Some(EXISTING_BUTTON) => self.open_connect_dialog(),
                Some(NEW_BUTTON) => {
                    self.status =
                        Some("Launching new kernels is left to the host application.".into());
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Routes input to the open modal. A resolved dialog is dismissed; an
    /// unresolved one goes back.
    fn handle_modal_input(&mut self, input: InputEvent, outcomes: &OutcomeSender) {
        let Some(mut modal) = self.modal.take() else {
            return;
        };
        match &mut modal {
            Modal::Connect(dialog) => match dialog.handle_input(&input) {
                Some(ConnectDialogEvent::Submit(request)) => self.spawn_connect(request, outcomes),
                Some(ConnectDialogEvent::Cancel) => {}
                None => self.modal = Some(modal),
            },
            Modal::Alert(alert) => {
                if !alert.handle_input(&input) {
                    self.modal = Some(modal);
                }
            }
        }
    }

    /// The prompt-for-connection entry point: show the modal form.
    fn open_connect_dialog(&mut self) {
        self.modal = Some(Modal::Connect(ConnectDialog::new()));
    }

    /// Fires one connect attempt as an independent task. Repeat submissions
    /// overlap freely; each gets its own placeholder window and request.
    fn spawn_connect(&mut self, request: ConnectRequest, outcomes: &OutcomeSender) {
        info!("connecting: {request:?}");
        self.in_flight += 1;

        let client = self.client.clone();
        let windows = self.windows.clone();
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let outcome = action::connect(&client, &windows, &request).await;
            let _ = outcomes.send(outcome);
        });
    }

    fn handle_outcome(&mut self, outcome: ConnectOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(response) => {
                info!("connected, notebook at {}", response.path);
                self.status = Some(format!("Opened {}", response.path));
            }
            Err(err) => {
                warn!("connect failed: {err}");
                self.modal = Some(Modal::Alert(
                    AlertDialog::new(err.to_string()).title(ERROR_TITLE),
                ));
            }
        }
    }

    fn draw(&mut self, screen: &mut Screen) -> io::Result<()> {
        screen.begin_frame()?;

        screen.put(2, 0, "nbconnect", Style::new().bold().fg(Color::Cyan))?;
        self.toolbar.draw(screen)?;
        screen.put(
            2,
            4,
            "Click Existing (or press e) to attach a notebook to a running kernel.",
            Style::new().dim(),
        )?;
        screen.put(2, 5, "Ctrl+Q quits.", Style::new().dim())?;

        let (_, height) = screen.size();
        if self.in_flight > 0 {
            screen.put(
                2,
                height.saturating_sub(2),
                "trying to connect, please wait...",
                Style::new(),
            )?;
        } else if let Some(status) = &self.status {
            screen.put(2, height.saturating_sub(2), status, Style::new().dim())?;
        }

        match &self.modal {
            Some(Modal::Connect(dialog)) => dialog.draw(screen)?,
            Some(Modal::Alert(alert)) => alert.draw(screen)?,
            None => {}
        }

        screen.flush()
    }
}
