//! Replay a scripted trace of signals and entry events through a gate.
//!
//! Scripts are TOML. Rows are declared once by name and referenced from the
//! steps:
//!
//! ```toml
//! [[rows]]
//! name = "x"
//! handle = 1
//! entry = 10
//!
//! [[steps]]
//! op = "screen_on"
//! value = true
//!
//! [[steps]]
//! op = "query"
//! row = "x"
//! ```
//!
//! Every step appends one line to the transcript; waiters that fire during a
//! step append a `fired <name>` line after it.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;

use steady_core::{EntryDispatcher, EntryEvent, StabilityGate, WaiterHandle};
use steady_types::{EntryKey, NotificationEntry, RowHandle, RowRef, Signals};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse script {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("step {step}: unknown row `{row}`")]
    UnknownRow { step: usize, row: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub rows: Vec<RowDecl>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowDecl {
    pub name: String,
    pub handle: u64,
    pub entry: u64,
}

impl RowDecl {
    fn row_ref(&self) -> RowRef {
        RowRef::new(RowHandle::new(self.handle), EntryKey::new(self.entry))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    ScreenOn {
        value: bool,
    },
    PanelExpanded {
        value: bool,
    },
    Pulsing {
        value: bool,
    },
    /// A new row was added to the list.
    Add {
        row: String,
    },
    HeadsUp {
        row: String,
        value: bool,
    },
    PreUpdate {
        row: String,
        #[serde(default)]
        ambient: bool,
        #[serde(default)]
        row_low_priority: bool,
    },
    PostUpdate {
        row: String,
    },
    /// Set what the visibility provider reports for the row's entry.
    Visible {
        row: String,
        value: bool,
    },
    /// Register a named waiter. Reusing a name reuses the same handle.
    Wait {
        name: String,
    },
    Finished,
    Query {
        row: String,
    },
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ReplayError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

struct Replay {
    dispatcher: EntryDispatcher,
    gate: Rc<RefCell<StabilityGate>>,
    rows: HashMap<String, RowRef>,
    visible: Rc<RefCell<HashSet<EntryKey>>>,
    waiters: HashMap<String, WaiterHandle>,
    fired: Rc<RefCell<Vec<String>>>,
    transcript: String,
}

impl Replay {
    fn new(script: &Script, signals: Signals) -> Self {
        let mut dispatcher = EntryDispatcher::new();
        let gate = StabilityGate::subscribe(&mut dispatcher, signals);
        let visible = Rc::new(RefCell::new(HashSet::new()));
        let oracle = Rc::clone(&visible);
        gate.borrow_mut()
            .set_visibility_location_provider(move |entry: EntryKey| {
                oracle.borrow().contains(&entry)
            });

        let rows = script
            .rows
            .iter()
            .map(|decl| (decl.name.clone(), decl.row_ref()))
            .collect();

        Self {
            dispatcher,
            gate,
            rows,
            visible,
            waiters: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
            transcript: String::new(),
        }
    }

    fn row(&self, index: usize, name: &str) -> Result<RowRef, ReplayError> {
        self.rows
            .get(name)
            .copied()
            .ok_or_else(|| ReplayError::UnknownRow {
                step: index + 1,
                row: name.to_string(),
            })
    }

    fn entry(&self, index: usize, name: &str) -> Result<NotificationEntry, ReplayError> {
        let row = self.row(index, name)?;
        Ok(NotificationEntry::new(row.entry, row.handle))
    }

    fn allowed(&self) -> bool {
        self.gate.borrow().is_reordering_allowed()
    }

    fn waiter(&mut self, name: &str) -> WaiterHandle {
        let fired = Rc::clone(&self.fired);
        let handle = self.waiters.entry(name.to_string()).or_insert_with(|| {
            let name = name.to_string();
            let handle: WaiterHandle =
                Rc::new(move |_: &mut StabilityGate| fired.borrow_mut().push(name.clone()));
            handle
        });
        Rc::clone(handle)
    }

    fn apply(&mut self, index: usize, step: &Step) -> Result<String, ReplayError> {
        let line = match step {
            Step::ScreenOn { value } => {
                self.gate.borrow_mut().set_screen_on(*value);
                format!("screen_on {value} (allowed={})", self.allowed())
            }
            Step::PanelExpanded { value } => {
                self.gate.borrow_mut().set_panel_expanded(*value);
                format!("panel_expanded {value} (allowed={})", self.allowed())
            }
            Step::Pulsing { value } => {
                self.gate.borrow_mut().set_pulsing(*value);
                format!("pulsing {value} (allowed={})", self.allowed())
            }
            Step::Add { row } => {
                let handle = self.row(index, row)?.handle;
                self.gate.borrow_mut().notify_view_addition(handle);
                format!("add {row}")
            }
            Step::HeadsUp { row, value } => {
                let entry = self.entry(index, row)?;
                self.dispatcher.dispatch(&EntryEvent::HeadsUpChanged {
                    entry,
                    is_heads_up: *value,
                });
                format!("heads_up {row} {value}")
            }
            Step::PreUpdate {
                row,
                ambient,
                row_low_priority,
            } => {
                let entry = self
                    .entry(index, row)?
                    .with_ambient(*ambient)
                    .with_row_low_priority(*row_low_priority);
                self.dispatcher.dispatch(&EntryEvent::PreUpdate(entry));
                format!("pre_update {row}")
            }
            Step::PostUpdate { row } => {
                let entry = self.entry(index, row)?;
                self.dispatcher.dispatch(&EntryEvent::PostUpdate(entry));
                format!("post_update {row}")
            }
            Step::Visible { row, value } => {
                let entry = self.row(index, row)?.entry;
                let mut visible = self.visible.borrow_mut();
                if *value {
                    visible.insert(entry);
                } else {
                    visible.remove(&entry);
                }
                format!("visible {row} {value}")
            }
            Step::Wait { name } => {
                let waiter = self.waiter(name);
                let mut gate = self.gate.borrow_mut();
                gate.add_reordering_allowed_callback(waiter);
                format!("wait {name} (pending={})", gate.pending_waiters())
            }
            Step::Finished => {
                self.gate.borrow_mut().on_reordering_finished();
                "finished".to_string()
            }
            Step::Query { row } => {
                let row_ref = self.row(index, row)?;
                let can = self.gate.borrow().can_reorder_notification(row_ref);
                format!("can_reorder {row} = {can}")
            }
        };
        Ok(line)
    }

    fn run(mut self, steps: &[Step]) -> Result<String, ReplayError> {
        for (index, step) in steps.iter().enumerate() {
            let line = self.apply(index, step)?;
            tracing::debug!(step = index + 1, "{line}");
            let _ = writeln!(self.transcript, "{line}");
            for name in self.fired.borrow_mut().drain(..) {
                let _ = writeln!(self.transcript, "  fired {name}");
            }
        }
        Ok(self.transcript)
    }
}

/// Run `script` against a fresh gate starting from `signals`, returning the
/// transcript.
pub fn run(script: &Script, signals: Signals) -> Result<String, ReplayError> {
    Replay::new(script, signals).run(&script.steps)
}
