//! The interactive event loop.
//!
//! # Design
//! One task owns the `TaskListClient`. Everything that can happen arrives as
//! an `Event` on a single channel: input lines from stdin, completed
//! requests and expired status timers. Requests and timers run as spawned
//! tasks that only post an event back, so state is never touched outside
//! the loop.
//!
//! A delete confirmation blocks the loop until it is answered. Events raised
//! in the meantime wait in the channel. Stdin is read on its own thread, one
//! line per request from the loop, so the reader is idle while a prompt owns
//! the terminal.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::mpsc as std_mpsc;

use task_list_core::{Command, HttpResponse, ItemId, Pending, TaskListClient, TransportError};
use tokio::sync::mpsc;

use crate::error::CliError;
use crate::transport::Transport;

pub const HELP: &str = "\
commands:
  title <text>    set the new item title
  desc <text>     set the new item description
  add             submit the new item
  edit <n>        start editing row n
  etitle <text>   set the edited title
  edesc <text>    set the edited description
  save            submit the edit
  cancel          leave edit mode
  delete <n>      delete row n (asks first)
  show            print the list again
  help            this text
  quit            exit";

#[derive(Debug)]
pub enum Event {
    Input(String),
    InputClosed,
    Completed {
        pending: Pending,
        result: Result<HttpResponse, TransportError>,
    },
    StatusExpired(u64),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Title(String),
    Description(String),
    Add,
    Edit(usize),
    EditTitle(String),
    EditDescription(String),
    Save,
    Cancel,
    Delete(usize),
    Show,
    Help,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));
        let row = |rest: &str| {
            rest.trim()
                .parse::<usize>()
                .map_err(|_| format!("`{word}` needs a row number"))
        };
        match word {
            "title" => Ok(Input::Title(rest.to_string())),
            "desc" => Ok(Input::Description(rest.to_string())),
            "add" => Ok(Input::Add),
            "edit" => row(rest).map(Input::Edit),
            "etitle" => Ok(Input::EditTitle(rest.to_string())),
            "edesc" => Ok(Input::EditDescription(rest.to_string())),
            "save" => Ok(Input::Save),
            "cancel" => Ok(Input::Cancel),
            "delete" => row(rest).map(Input::Delete),
            "show" | "" => Ok(Input::Show),
            "help" => Ok(Input::Help),
            "quit" | "exit" => Ok(Input::Quit),
            other => Err(format!("unknown command `{other}`, try `help`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Asks the user a yes/no question and waits for the answer.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError>;
}

/// Prompts on the terminal. Defaults to no.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        // Requires the multi-thread runtime.
        let confirmed = tokio::task::block_in_place(|| {
            dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        Ok(confirmed)
    }
}

pub struct Session<W, C> {
    client: TaskListClient,
    transport: Transport,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    confirm: C,
    out: W,
}

impl<W: Write, C: Confirm> Session<W, C> {
    pub fn new(client: TaskListClient, transport: Transport, out: W, confirm: C) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            transport,
            tx,
            rx,
            confirm,
            out,
        }
    }

    pub fn client(&self) -> &TaskListClient {
        &self.client
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn confirmer(&self) -> &C {
        &self.confirm
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Mount the client and print the empty page.
    pub fn start(&mut self) -> Result<(), CliError> {
        let commands = self.client.mount();
        self.run_commands(commands)?;
        self.render()
    }

    /// Read stdin and process events until `quit` or end of input.
    ///
    /// The reader thread may still be blocked on stdin when this returns;
    /// it does not hold up process exit.
    pub async fn run(mut self) -> Result<(), CliError> {
        let next_line = spawn_stdin_reader(self.sender())?;
        self.start()?;
        let _ = next_line.send(());
        while let Some(event) = self.rx.recv().await {
            let was_input = matches!(event, Event::Input(_));
            if self.handle(event)? == Flow::Quit {
                break;
            }
            if was_input {
                let _ = next_line.send(());
            }
        }
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, CliError> {
        match event {
            Event::Input(line) => return self.handle_line(&line),
            Event::InputClosed => return Ok(Flow::Quit),
            Event::Completed { pending, result } => {
                let commands = self.client.complete(pending, result);
                self.run_commands(commands)?;
            }
            Event::StatusExpired(generation) => self.client.expire_status(generation),
        }
        self.render()?;
        Ok(Flow::Continue)
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow, CliError> {
        let input = match Input::parse(line) {
            Ok(input) => input,
            Err(message) => {
                writeln!(self.out, "{message}")?;
                return Ok(Flow::Continue);
            }
        };

        let commands = match input {
            Input::Title(text) => {
                self.client.set_new_title(text);
                Vec::new()
            }
            Input::Description(text) => {
                self.client.set_new_description(text);
                Vec::new()
            }
            Input::Add => self.client.submit_new_item(),
            Input::Edit(row) => {
                if let Some(id) = self.row_id(row)? {
                    self.client.begin_edit(&id);
                }
                Vec::new()
            }
            Input::EditTitle(text) => {
                self.client.set_edit_title(text);
                Vec::new()
            }
            Input::EditDescription(text) => {
                self.client.set_edit_description(text);
                Vec::new()
            }
            Input::Save => self.client.submit_edit(),
            Input::Cancel => {
                self.client.cancel_edit();
                Vec::new()
            }
            Input::Delete(row) => match self.row_id(row)? {
                Some(id) => self.client.delete_item(&id),
                None => Vec::new(),
            },
            Input::Show => Vec::new(),
            Input::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Input::Quit => return Ok(Flow::Quit),
        };

        self.run_commands(commands)?;
        self.render()?;
        Ok(Flow::Continue)
    }

    /// Id of a displayed row, telling the user when there is none.
    fn row_id(&mut self, row: usize) -> Result<Option<ItemId>, CliError> {
        let view = self.client.view();
        match view.row(row) {
            Some(r) if r.id.is_some() => Ok(r.id.clone()),
            Some(_) => {
                writeln!(self.out, "row {row} has no server id yet; reload to edit or delete it")?;
                Ok(None)
            }
            None => {
                writeln!(self.out, "no row {row}")?;
                Ok(None)
            }
        }
    }

    fn run_commands(&mut self, commands: Vec<Command>) -> Result<(), CliError> {
        let mut queue = VecDeque::from(commands);
        while let Some(command) = queue.pop_front() {
            match command {
                Command::Send { pending, request } => {
                    let transport = self.transport.clone();
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = transport.execute(request).await;
                        let _ = tx.send(Event::Completed { pending, result });
                    });
                }
                Command::ClearStatusAfter { generation, delay } => {
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Event::StatusExpired(generation));
                    });
                }
                Command::Confirm { prompt, id } => {
                    self.out.flush()?;
                    let confirmed = self.confirm.confirm(prompt)?;
                    queue.extend(self.client.confirm_delete(id, confirmed));
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "{}", self.client.view())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Start the stdin thread. It reads one line each time `()` arrives on the
/// returned sender and stops after end of input.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<Event>) -> Result<std_mpsc::Sender<()>, CliError> {
    let (next_line, wanted) = std_mpsc::channel::<()>();
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();
            while wanted.recv().is_ok() {
                line.clear();
                let event = match stdin.lock().read_line(&mut line) {
                    Ok(0) => Event::InputClosed,
                    Ok(_) => Event::Input(line.trim_end_matches(['\n', '\r']).to_string()),
                    Err(err) => {
                        tracing::error!(error = %err, "stdin read failed");
                        Event::InputClosed
                    }
                };
                let closed = matches!(event, Event::InputClosed);
                if tx.send(event).is_err() || closed {
                    break;
                }
            }
        })?;
    Ok(next_line)
}
